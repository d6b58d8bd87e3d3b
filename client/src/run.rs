//! The greeting run once a connection and a payer exist: fee check, account resolution, greet,
//! and report, in that order.

use std::path::Path;

use anyhow::Context;
use solana_sdk::signature::Keypair;

use crate::{
    error::Stage,
    fees::{
        check_fees,
        FeeEstimate,
    },
    greet::{
        report,
        say_hello,
        GreetingReport,
    },
    provision::{
        load_program_id,
        resolve_greeting_account,
        GreetingTarget,
    },
    rpc::LedgerRpc,
};

#[derive(Clone, Copy, Debug)]
pub struct RunOutcome {
    pub fees: FeeEstimate,
    pub target: GreetingTarget,
    pub report: GreetingReport,
}

/// Runs every stage after connecting and loading the payer. The program keypair is only read
/// once the fee check has run. The first failing stage ends the run; transactions already
/// confirmed by then stay on the ledger.
pub fn greet_program<R: LedgerRpc>(
    rpc: &R,
    payer: &Keypair,
    program_keypair_path: &Path,
) -> anyhow::Result<RunOutcome> {
    let fees = check_fees(rpc, payer).context(Stage::CheckFees)?;
    let target = load_program_id(program_keypair_path)
        .and_then(|program_id| resolve_greeting_account(rpc, payer, &program_id))
        .context(Stage::ResolveAccount)?;
    say_hello(rpc, payer, &target).context(Stage::Invoke)?;
    let report = report(rpc, &target.greeting_account).context(Stage::Report)?;

    Ok(RunOutcome {
        fees,
        target,
        report,
    })
}
