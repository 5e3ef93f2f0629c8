// src/main.rs
mod logger;
mod report;

use clap::{Parser, Subcommand};
use huffpack::{CodeTable, FrequencyTable, HuffError, HuffmanTree, codes::format_code};
use report::RunRecord;
use sha2::{Digest, Sha256};
use std::{
    error::Error,
    fs::{self, File, OpenOptions},
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
    process::{self, ExitCode},
};

const TEMP_EXT: &str = "tmp"; // For atomic writes

#[derive(Parser)]
#[command(name = "huffpack", version = "0.1.0")]
#[command(about = "Static Huffman compressor for arbitrary files.", long_about = None)]
struct Cli {
    /// Print one JSON record per run instead of a summary line
    #[arg(long, global = true)]
    json: bool,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a container
    Encode { input: PathBuf, output: PathBuf },
    /// Restore the original file from a container
    Decode { input: PathBuf, output: PathBuf },
    /// Encode and decode in memory and compare SHA-256 digests
    Check { input: PathBuf },
    /// Print the code assigned to every byte value in a file
    Codes { input: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    match run(cli.command, cli.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, json: bool) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Encode { input, output } => {
            let source = File::open(&input)?;
            let stats = write_atomic(&output, |dest| huffpack::encode(source, dest))?;
            let (input, output) = (input.display().to_string(), output.display().to_string());
            report::emit(&RunRecord::new("encode", &input, Some(&output), &stats), json)?;
        }
        Commands::Decode { input, output } => {
            let source = File::open(&input)?;
            let stats = write_atomic(&output, |dest| huffpack::decode(source, dest))?;
            let (input, output) = (input.display().to_string(), output.display().to_string());
            report::emit(&RunRecord::new("decode", &input, Some(&output), &stats), json)?;
        }
        Commands::Check { input } => check(&input, json)?,
        Commands::Codes { input } => print_codes(&input)?,
    }
    Ok(())
}

// Writes to a hidden sibling temp file and renames it over `path` only on
// success, so a failed run never leaves a partial container or output behind.
fn write_atomic<T>(
    path: &Path,
    body: impl FnOnce(&mut File) -> huffpack::Result<T>,
) -> huffpack::Result<T> {
    let temp_path = temp_path_for(path);

    // create_new: never clobber a file we did not create ourselves.
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)?;
    let result = body(&mut file).and_then(|value| {
        file.sync_all()?;
        Ok(value)
    });
    drop(file);

    match result {
        Ok(value) => {
            fs::rename(&temp_path, path)?;
            Ok(value)
        }
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.{}", name, process::id(), TEMP_EXT))
}

fn check(input: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let mut hasher = Sha256::default();
    io::copy(&mut BufReader::new(File::open(input)?), &mut hasher)?;
    let original = hasher.finalize();

    let mut container = Vec::new();
    let stats = huffpack::encode(File::open(input)?, &mut container)?;

    let mut hasher = Sha256::default();
    huffpack::decode(container.as_slice(), &mut hasher)?;
    let restored = hasher.finalize();

    let name = input.display().to_string();
    report::emit(&RunRecord::new("check", &name, None, &stats), json)?;

    if original != restored {
        return Err(Box::new(HuffError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("round trip of {} does not match the original", name),
        ))));
    }
    if !json {
        println!("round trip ok, sha256 {}", hex(&original));
    }
    Ok(())
}

fn print_codes(input: &Path) -> Result<(), Box<dyn Error>> {
    let freqs = FrequencyTable::from_reader(BufReader::new(File::open(input)?))?;
    if freqs.is_empty() {
        println!("{} is empty, no codes", input.display());
        return Ok(());
    }
    let codes = CodeTable::from_tree(&HuffmanTree::build(&freqs)?);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{:>6} {:>12}  code", "byte", "count")?;
    for (symbol, code) in codes.iter() {
        writeln!(
            out,
            "{:>#6x} {:>12}  {}",
            symbol,
            freqs.get(symbol),
            format_code(code)
        )?;
    }
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
