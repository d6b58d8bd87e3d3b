//! An advisory check of whether the payer can cover the run's fees.

use std::fmt;

use helloworld_interface::state::GREETING_SIZE;
use solana_sdk::{
    message::Message,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

use crate::{
    logs::{
        log_info,
        log_warning,
    },
    rpc::LedgerRpc,
};

/// How many signatures' worth of fees the estimate budgets for.
pub const SIGNATURE_BUDGET: u64 = 100;

/// A lamport amount that displays in SOL.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sol(pub u64);

impl fmt::Display for Sol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / LAMPORTS_PER_SOL;
        let fractional = self.0 % LAMPORTS_PER_SOL;
        let fractional = format!("{fractional:09}");
        let fractional = fractional.trim_end_matches('0');
        if fractional.is_empty() {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{fractional}")
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeeEstimate {
    pub lamports_per_signature: u64,
    /// The rent exempt minimum for a [`GREETING_SIZE`] byte account.
    pub rent_exempt_minimum: u64,
    pub balance: u64,
}

impl FeeEstimate {
    /// The rent exempt minimum plus [`SIGNATURE_BUDGET`] signatures.
    pub fn estimated_fees(&self) -> u64 {
        self.rent_exempt_minimum
            .saturating_add(self.lamports_per_signature.saturating_mul(SIGNATURE_BUDGET))
    }

    pub fn is_covered(&self) -> bool {
        self.balance >= self.estimated_fees()
    }
}

/// Queries the fee rate, the greeting account's rent exempt minimum, and the payer's balance, and
/// logs them. Never fails because the balance is too low; that's left to the ledger.
pub fn check_fees<R: LedgerRpc>(rpc: &R, payer: &Keypair) -> anyhow::Result<FeeEstimate> {
    let payer_address = payer.pubkey();

    let estimate = FeeEstimate {
        lamports_per_signature: lamports_per_signature(rpc, &payer_address)?,
        rent_exempt_minimum: rpc.get_minimum_balance_for_rent_exemption(GREETING_SIZE)?,
        balance: rpc.get_balance(&payer_address)?,
    };

    log_info(
        "Using account",
        format!(
            "{payer_address} containing {} SOL to pay for fees {} SOL",
            Sol(estimate.balance),
            Sol(estimate.estimated_fees()),
        ),
    );
    if !estimate.is_covered() {
        log_warning(
            "Low balance",
            format!(
                "{payer_address} may not cover the estimated {} SOL in fees",
                Sol(estimate.estimated_fees())
            ),
        );
    }

    Ok(estimate)
}

/// The fee for a message with a single signature, i.e. the per-signature rate.
fn lamports_per_signature<R: LedgerRpc>(rpc: &R, payer: &Pubkey) -> anyhow::Result<u64> {
    let mut message = Message::new(&[], Some(payer));
    message.recent_blockhash = rpc.get_latest_blockhash()?;
    rpc.get_fee_for_message(&message)
}
