use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use huffenc::pipeline::{FAILURE_STATUS, encode_files};

/// Encode a file with a Huffman code built from another file's character
/// frequencies.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File to encode
    input_file: PathBuf,

    /// File whose character frequencies define the code
    encoding_file: PathBuf,

    /// Destination for the '0'/'1' encoding; must be new or empty
    output_file: PathBuf,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let outcome = encode_files(&args.input_file, &args.encoding_file, &args.output_file)
        .with_context(|| {
            format!(
                "encode {} using {}",
                args.input_file.display(),
                args.encoding_file.display()
            )
        });

    match outcome {
        Ok(outcome) => {
            println!("{}", outcome.report());
            println!("{}", outcome.status());
        }
        Err(e) => {
            eprintln!("Error: {e:?}");
            println!("{FAILURE_STATUS}");
            return Ok(ExitCode::FAILURE);
        }
    };

    Ok(ExitCode::SUCCESS)
}
