use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use client::{
    config::Config,
    error::Stage,
    keypair::load_keypair,
    logs::log_error_chain,
    print_kv,
    rpc::connect,
    run::greet_program,
};
use solana_sdk::signer::Signer;

fn main() -> ExitCode {
    let config = Config::parse();

    match say_hello(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log_error_chain(&error);
            ExitCode::FAILURE
        }
    }
}

fn say_hello(config: &Config) -> anyhow::Result<()> {
    println!("Let's say hello to a Solana account...");

    let rpc = connect(config).context(Stage::Connect)?;
    let payer = load_keypair(&config.keypair_path).context(Stage::LoadIdentity)?;
    print_kv!("Payer", payer.pubkey());

    greet_program(&rpc, &payer, &config.program_keypair_path())?;
    println!("Success");

    Ok(())
}
