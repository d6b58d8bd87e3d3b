//! Derivation of the greeting account address.

use helloworld_interface::GREETING_SEED;
use solana_sdk::pubkey::Pubkey;

/// Derives the greeting account address for `payer` from the payer's pubkey, [`GREETING_SEED`],
/// and the owning program.
pub fn greeting_account_address(payer: &Pubkey, program_id: &Pubkey) -> anyhow::Result<Pubkey> {
    Pubkey::create_with_seed(payer, GREETING_SEED, program_id).map_err(|e| {
        anyhow::anyhow!("Couldn't derive the greeting account address for {payer}: {e}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let payer = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();

        let first = greeting_account_address(&payer, &program_id).unwrap();
        let second = greeting_account_address(&payer, &program_id).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            Pubkey::create_with_seed(&payer, "hello", &program_id).unwrap()
        );
    }

    #[test]
    fn derivation_depends_on_payer_and_program() {
        let payer = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();
        let address = greeting_account_address(&payer, &program_id).unwrap();

        let other_payer = greeting_account_address(&Pubkey::new_unique(), &program_id).unwrap();
        let other_program = greeting_account_address(&payer, &Pubkey::new_unique()).unwrap();
        assert_ne!(address, other_payer);
        assert_ne!(address, other_program);
        assert_ne!(other_payer, other_program);
    }
}
