use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::process::ExitCode;

use huffman_tree::{count_symbols, BitReader, BitWriter, CodecConfig, HuffmanTree, Result, Symbol};

const USAGE: &str = "usage:
  huffman compress <input> <code-file> <bits-file>
  huffman decompress <code-file> <bits-file> <output>";

fn compress(input: &str, code_file: &str, bits_file: &str) -> Result<()> {
    let config = CodecConfig::default();
    let data = fs::read(input)?;
    let counts = count_symbols(&data, config.alphabet_size)?;
    let tree = HuffmanTree::from_counts(&counts)?;
    tree.write(BufWriter::new(File::create(code_file)?))?;

    let table = tree.code_table()?;
    let longest = table.iter().map(|(_, code)| code.len()).max().unwrap_or(0);
    let mut writer = BitWriter::new(BufWriter::new(File::create(bits_file)?));
    let bits = table.encode(data.iter().map(|&b| Symbol::from(b)), config.eof(), &mut writer)?;
    writer.finish()?;

    println!(
        "{}: {} bytes -> {} bits ({} codes, longest {} bits)",
        input,
        data.len(),
        bits,
        table.len(),
        longest
    );
    Ok(())
}

fn decompress(code_file: &str, bits_file: &str, output: &str) -> Result<()> {
    let config = CodecConfig::default();
    let tree = HuffmanTree::from_serialized(BufReader::new(File::open(code_file)?))?;
    let mut bits = BitReader::new(BufReader::new(File::open(bits_file)?));
    let decoded = tree.decode_to_writer(
        &mut bits,
        BufWriter::new(File::create(output)?),
        config.eof(),
    )?;

    println!("{}: {} bytes", output, decoded);
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["compress", input, code_file, bits_file] => compress(input, code_file, bits_file),
        ["decompress", code_file, bits_file, output] => decompress(code_file, bits_file, output),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
