#![forbid(unsafe_code)]
use ledgerchain::blockchain::BlockChain;
use ledgerchain::config::load_config;
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let name = args
        .next()
        .ok_or("usage: ledger-balance <name> [source-file]")?;
    let source = match args.next() {
        Some(path) => path,
        None => load_config()?.files.source,
    };

    let chain = BlockChain::load(File::open(&source)?)?;

    println!("Name: {}", name);
    println!("Chain size: {}", chain.len());
    println!("Balance: {}", chain.personal_balance(&name));

    Ok(())
}
