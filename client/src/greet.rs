use std::fmt::{
    self,
    Display,
    Formatter,
};

use anyhow::Context;
use colored::Colorize;
use helloworld_interface::{
    instructions::greet,
    state::GreetingAccount,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
    },
};

use crate::{
    error::GreetingError,
    logs::{
        log_info,
        Level,
    },
    provision::GreetingTarget,
    rpc::LedgerRpc,
    transactions::send_transaction,
};

/// Sends the greet instruction for `target` and waits for it to be confirmed.
pub fn say_hello<R: LedgerRpc>(
    rpc: &R,
    payer: &Keypair,
    target: &GreetingTarget,
) -> anyhow::Result<Signature> {
    log_info("Saying hello to", target.greeting_account);
    send_transaction(
        rpc,
        payer,
        &[greet(&target.program_id, &target.greeting_account)],
    )
}

/// The greeting count read back from a greeting account.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GreetingReport {
    pub greeting_account: Pubkey,
    pub greeting: GreetingAccount,
}

impl Display for GreetingReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has been greeted {} time(s)",
            self.greeting_account,
            self.greeting.counter.to_string().color(Level::Success.color())
        )
    }
}

/// Fetches and decodes the greeting account.
pub fn report<R: LedgerRpc>(rpc: &R, greeting_account: &Pubkey) -> anyhow::Result<GreetingReport> {
    let account = rpc
        .get_account(greeting_account)?
        .ok_or(GreetingError::GreetedAccountNotFound(*greeting_account))?;

    let greeting = GreetingAccount::unpack(&account.data).with_context(|| {
        format!(
            "Couldn't decode {} bytes of greeting account {greeting_account}",
            account.data.len()
        )
    })?;

    let report = GreetingReport {
        greeting_account: *greeting_account,
        greeting,
    };
    println!("{report}");

    Ok(report)
}
