//! Errors that identify what went wrong on the ledger side, plus the pipeline [`Stage`] every
//! failure is tagged with.

use std::fmt;

use solana_sdk::pubkey::Pubkey;

/// The ledger doesn't hold what the client expects it to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GreetingError {
    ProgramNotDeployed(Pubkey),
    ProgramNotExecutable(Pubkey),
    GreetedAccountNotFound(Pubkey),
    GreetedAccountMismatch {
        address: Pubkey,
        owner: Pubkey,
        data_len: usize,
    },
}

impl fmt::Display for GreetingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgramNotDeployed(program_id) => {
                write!(f, "Program needs to be built and deployed: {program_id}")
            }
            Self::ProgramNotExecutable(program_id) => {
                write!(f, "Program is not executable: {program_id}")
            }
            Self::GreetedAccountNotFound(address) => {
                write!(f, "Cannot find the greeted account {address}")
            }
            Self::GreetedAccountMismatch {
                address,
                owner,
                data_len,
            } => write!(
                f,
                "Greeted account {address} is not a greeting account (owner: {owner}, data length: \
                 {data_len})"
            ),
        }
    }
}

impl std::error::Error for GreetingError {}

/// The steps of a run, in order. Used as the outermost error context so a failure names the
/// step it happened in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display)]
pub enum Stage {
    #[strum(to_string = "Failed to connect to the RPC endpoint")]
    Connect,
    #[strum(to_string = "Failed to load the payer keypair")]
    LoadIdentity,
    #[strum(to_string = "Failed to check the payer's balance and fees")]
    CheckFees,
    #[strum(to_string = "Failed to resolve the greeted account")]
    ResolveAccount,
    #[strum(to_string = "Failed to say hello")]
    Invoke,
    #[strum(to_string = "Failed to report the greeting count")]
    Report,
}
