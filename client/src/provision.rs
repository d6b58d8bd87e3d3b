//! Checks that the greeting program is deployed and makes sure the payer's greeting account exists.

use std::path::Path;

use anyhow::Context;
use helloworld_interface::{
    instructions::create_greeting_account,
    state::GREETING_SIZE,
};
use solana_account::Account;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

use crate::{
    address::greeting_account_address,
    error::GreetingError,
    keypair::load_keypair,
    logs::log_info,
    rpc::LedgerRpc,
    transactions::send_transaction,
};

/// The resolved greeting account and the program that owns it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GreetingTarget {
    pub program_id: Pubkey,
    pub greeting_account: Pubkey,
    /// Whether this run created the greeting account.
    pub created: bool,
}

/// Reads the program's keypair file and returns the program's address.
pub fn load_program_id(program_keypair_path: &Path) -> anyhow::Result<Pubkey> {
    let program = load_keypair(program_keypair_path)
        .context("Couldn't load the program keypair. Has the program been built?")?;

    Ok(program.pubkey())
}

/// Fails unless an executable account exists at `program_id`.
pub fn check_program<R: LedgerRpc>(rpc: &R, program_id: &Pubkey) -> anyhow::Result<()> {
    match rpc.get_account(program_id)? {
        None => Err(GreetingError::ProgramNotDeployed(*program_id).into()),
        Some(program) if !program.executable => {
            Err(GreetingError::ProgramNotExecutable(*program_id).into())
        }
        Some(_) => {
            log_info("Using program", program_id);
            Ok(())
        }
    }
}

/// Checks the program, then derives the payer's greeting account and creates it if it doesn't
/// exist yet. An existing account is reused only if it looks like a greeting account owned by
/// the program.
pub fn resolve_greeting_account<R: LedgerRpc>(
    rpc: &R,
    payer: &Keypair,
    program_id: &Pubkey,
) -> anyhow::Result<GreetingTarget> {
    check_program(rpc, program_id)?;

    let greeting_account = greeting_account_address(&payer.pubkey(), program_id)?;
    let created = match rpc.get_account(&greeting_account)? {
        Some(existing) => {
            validate_greeting_account(&greeting_account, &existing, program_id)?;
            false
        }
        None => {
            log_info("Creating account", format!("{greeting_account} to say hello to"));
            let lamports = rpc.get_minimum_balance_for_rent_exemption(GREETING_SIZE)?;
            let create =
                create_greeting_account(&payer.pubkey(), &greeting_account, program_id, lamports);
            send_transaction(rpc, payer, &[create])?;
            true
        }
    };

    Ok(GreetingTarget {
        program_id: *program_id,
        greeting_account,
        created,
    })
}

fn validate_greeting_account(
    address: &Pubkey,
    account: &Account,
    program_id: &Pubkey,
) -> Result<(), GreetingError> {
    if account.owner != *program_id || account.data.len() != GREETING_SIZE {
        return Err(GreetingError::GreetedAccountMismatch {
            address: *address,
            owner: account.owner,
            data_len: account.data.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_account_must_match_owner_and_size() {
        let address = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();

        let valid = Account::new(1, GREETING_SIZE, &program_id);
        assert!(validate_greeting_account(&address, &valid, &program_id).is_ok());

        let wrong_owner = Account::new(1, GREETING_SIZE, &Pubkey::new_unique());
        assert_eq!(
            validate_greeting_account(&address, &wrong_owner, &program_id),
            Err(GreetingError::GreetedAccountMismatch {
                address,
                owner: wrong_owner.owner,
                data_len: GREETING_SIZE,
            })
        );

        let wrong_size = Account::new(1, GREETING_SIZE + 1, &program_id);
        assert!(validate_greeting_account(&address, &wrong_size, &program_id).is_err());
    }
}
