//! Instruction builders for provisioning and greeting a greeting account.

use solana_sdk::{
    instruction::{
        AccountMeta,
        Instruction,
    },
    pubkey::Pubkey,
};
use solana_system_interface::instruction::create_account_with_seed;

use crate::{
    state::GREETING_SIZE,
    GREETING_SEED,
};

/// Builds the system instruction that allocates a [`GREETING_SIZE`] byte account at the address
/// derived from `payer` and [`GREETING_SEED`], owned by `program_id`.
///
/// The payer funds the account with `lamports` and also acts as the seed base, so it's the only
/// signer.
pub fn create_greeting_account(
    payer: &Pubkey,
    greeting_account: &Pubkey,
    program_id: &Pubkey,
    lamports: u64,
) -> Instruction {
    create_account_with_seed(
        payer,
        greeting_account,
        payer,
        GREETING_SEED,
        lamports,
        GREETING_SIZE as u64,
        program_id,
    )
}

/// Builds the greet instruction: an empty payload with the greeting account as the only,
/// writable and non-signing, account.
pub fn greet(program_id: &Pubkey, greeting_account: &Pubkey) -> Instruction {
    Instruction::new_with_bytes(
        *program_id,
        &[],
        vec![AccountMeta::new(*greeting_account, false)],
    )
}

#[cfg(test)]
mod tests {
    use solana_system_interface::instruction::SystemInstruction;

    use super::*;

    #[test]
    fn greet_has_an_empty_payload_and_one_writable_account() {
        let program_id = Pubkey::new_unique();
        let greeting_account = Pubkey::new_unique();
        let instruction = greet(&program_id, &greeting_account);

        assert_eq!(instruction.program_id, program_id);
        assert!(instruction.data.is_empty());
        assert_eq!(
            instruction.accounts,
            vec![AccountMeta::new(greeting_account, false)]
        );
    }

    #[test]
    fn create_greeting_account_allocates_greeting_size() {
        let payer = Pubkey::new_unique();
        let greeting_account = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();
        let instruction = create_greeting_account(&payer, &greeting_account, &program_id, 1_000);

        assert_eq!(instruction.program_id, solana_system_interface::program::ID);
        match bincode::deserialize::<SystemInstruction>(&instruction.data).unwrap() {
            SystemInstruction::CreateAccountWithSeed {
                base,
                seed,
                lamports,
                space,
                owner,
            } => {
                assert_eq!(base, payer);
                assert_eq!(seed, GREETING_SEED);
                assert_eq!(lamports, 1_000);
                assert_eq!(space, GREETING_SIZE as u64);
                assert_eq!(owner, program_id);
            }
            other => panic!("Unexpected system instruction: {other:?}"),
        }

        let signers: Vec<_> = instruction
            .accounts
            .iter()
            .filter(|meta| meta.is_signer)
            .map(|meta| meta.pubkey)
            .collect();
        assert!(signers.iter().all(|signer| *signer == payer));
    }
}
