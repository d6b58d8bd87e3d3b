use anyhow::Context;
use colored::Colorize;
use solana_client::{
    client_error::{
        ClientError,
        ClientErrorKind,
    },
    rpc_response::RpcSimulateTransactionResult,
};
use solana_sdk::{
    instruction::Instruction,
    message::Message,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
    transaction::Transaction,
};

use crate::{
    logs::{
        log_error,
        log_info,
        log_success,
        KEY_COLOR,
    },
    rpc::LedgerRpc,
};

/// Builds a transaction from `instructions` with `payer` as the fee payer and only signer, then
/// submits it and waits for confirmation.
pub fn send_transaction<R: LedgerRpc>(
    rpc: &R,
    payer: &Keypair,
    instructions: &[Instruction],
) -> anyhow::Result<Signature> {
    let blockhash = rpc.get_latest_blockhash()?;

    let msg = Message::new(instructions, Some(&payer.pubkey()));
    let mut tx = Transaction::new_unsigned(msg);
    tx.try_sign(&[payer], blockhash)
        .context("Couldn't sign the transaction")?;

    let sig = rpc.send_and_confirm_transaction(&tx)?;

    let sender_info = format!("{}: {}", "sender".color(KEY_COLOR), payer.pubkey());
    log_success("Signature", format!("{sig}\n{sender_info}"));

    Ok(sig)
}

/// Logs what's known about a rejected transaction: the failing instruction and its program, and
/// the simulation logs if the node returned any.
pub fn log_transaction_error(error: &ClientError, message: &Message) {
    use solana_client::rpc_request::{
        RpcError::RpcResponseError,
        RpcResponseErrorData,
    };
    use solana_transaction_error::TransactionError;

    let ClientErrorKind::RpcError(RpcResponseError {
        data:
            RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                err,
                logs,
                ..
            }),
        ..
    }) = error.kind()
    else {
        log_error("Transaction error", error);
        return;
    };

    match err.clone().map(TransactionError::from) {
        Some(TransactionError::InstructionError(ixn_idx, ixn_error)) => {
            let program_id = message
                .instructions
                .get(ixn_idx as usize)
                .and_then(|ixn| message.account_keys.get(ixn.program_id_index as usize));
            let program = program_id.map_or("unknown program".to_string(), |p| p.to_string());
            log_error(
                format!("Instruction {ixn_idx} failed"),
                format!("{ixn_error} ({program})"),
            );
        }
        Some(tx_error) => log_error("Transaction error", tx_error),
        None => log_error("Transaction error", error),
    }

    for line in logs.iter().flatten() {
        log_info("Program log", line);
    }
}
