#![forbid(unsafe_code)]
//! Ledger command line: format, hash, compress or verify a ledger file.

use clap::{Parser, ValueEnum};
use colored::*;
use ledgerchain::blockchain::BlockChain;
use ledgerchain::config::load_config;
use std::fs;
use std::fs::File;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Operation {
    /// Write the human-readable ledger listing to the target file
    Format,
    /// Write one digest per block to the target file
    Hash,
    /// Merge same-party blocks, then write the listing to the target file
    Compress,
    /// Check the digests in the target file against the ledger
    Verify,
}

#[derive(Parser)]
#[command(name = "ledgerchain", version, about = "Append-only transaction ledger tools")]
struct Cli {
    #[arg(value_enum)]
    operation: Operation,
    /// Ledger source file; falls back to files.source in config.toml
    source: Option<String>,
    /// Output file (digest file for verify); falls back to files.target
    target: Option<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = load_config()?;
    let source = cli.source.unwrap_or(config.files.source);
    let target = cli.target.unwrap_or(config.files.target);

    let mut chain = BlockChain::load(File::open(&source)?)?;
    log::info!("loaded {} blocks from {}", chain.len(), source);

    match cli.operation {
        Operation::Format => {
            fs::write(&target, chain.dump())?;
            println!("{}", format!("Wrote ledger listing to {}", target).green());
        }
        Operation::Hash => {
            fs::write(&target, chain.dump_hashed())?;
            println!("{}", format!("Wrote block digests to {}", target).green());
        }
        Operation::Compress => {
            let before = chain.len();
            chain.compress();
            log::info!("compressed {} blocks down to {}", before, chain.len());
            fs::write(&target, chain.dump())?;
            println!("{}", format!("Wrote compressed ledger to {}", target).green());
        }
        Operation::Verify => {
            let passed = chain.verify_reader(File::open(&target)?)?;
            if passed {
                println!("Verification {}", "passed".green().bold());
            } else {
                println!("Verification {}", "failed".red().bold());
            }
            return Ok(passed);
        }
    }

    Ok(true)
}
