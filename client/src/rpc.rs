//! The slice of the ledger's RPC surface the client relies on, and the connection to a live node.

use anyhow::Context;
use solana_account::Account;
use solana_client::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    hash::Hash,
    message::Message,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};

use crate::{
    config::Config,
    logs::log_success,
    transactions::log_transaction_error,
};

/// Read and submit operations against a ledger node.
///
/// Implemented for [`RpcClient`] to talk to a real node and by
/// [`TestLedger`](crate::test_ledger::TestLedger) to run the client against an in-memory ledger.
pub trait LedgerRpc {
    fn get_latest_blockhash(&self) -> anyhow::Result<Hash>;

    /// The fee the ledger would charge to process `message`.
    fn get_fee_for_message(&self, message: &Message) -> anyhow::Result<u64>;

    fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> anyhow::Result<u64>;

    fn get_balance(&self, address: &Pubkey) -> anyhow::Result<u64>;

    /// Returns `None` if no account exists at `address`.
    fn get_account(&self, address: &Pubkey) -> anyhow::Result<Option<Account>>;

    /// Submits a signed transaction and blocks until it reaches the client's commitment level.
    fn send_and_confirm_transaction(&self, transaction: &Transaction) -> anyhow::Result<Signature>;
}

impl LedgerRpc for RpcClient {
    fn get_latest_blockhash(&self) -> anyhow::Result<Hash> {
        RpcClient::get_latest_blockhash(self).context("Couldn't fetch the latest blockhash")
    }

    fn get_fee_for_message(&self, message: &Message) -> anyhow::Result<u64> {
        RpcClient::get_fee_for_message(self, message).context("Couldn't fetch the message fee")
    }

    fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> anyhow::Result<u64> {
        RpcClient::get_minimum_balance_for_rent_exemption(self, data_len)
            .context("Couldn't fetch the rent exempt minimum balance")
    }

    fn get_balance(&self, address: &Pubkey) -> anyhow::Result<u64> {
        RpcClient::get_balance(self, address)
            .with_context(|| format!("Couldn't fetch the balance of {address}"))
    }

    fn get_account(&self, address: &Pubkey) -> anyhow::Result<Option<Account>> {
        self.get_account_with_commitment(address, self.commitment())
            .map(|response| response.value)
            .with_context(|| format!("Couldn't fetch account info for {address}"))
    }

    fn send_and_confirm_transaction(&self, transaction: &Transaction) -> anyhow::Result<Signature> {
        RpcClient::send_and_confirm_transaction(self, transaction).map_err(|error| {
            log_transaction_error(&error, &transaction.message);
            anyhow::Error::from(error).context("Failed transaction submission")
        })
    }
}

/// Creates an [`RpcClient`] that treats transactions as final once they're `confirmed`, then
/// checks that the node answers.
pub fn connect(config: &Config) -> anyhow::Result<RpcClient> {
    let rpc = RpcClient::new_with_timeout_and_commitment(
        config.rpc_url.to_string(),
        config.timeout(),
        CommitmentConfig::confirmed(),
    );

    let version = rpc
        .get_version()
        .with_context(|| format!("{} didn't respond", config.rpc_url))?;
    log_success(
        "Connection to cluster established",
        format!("{} (version {})", config.rpc_url, version.solana_core),
    );

    Ok(rpc)
}
