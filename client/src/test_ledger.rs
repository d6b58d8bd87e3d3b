//! An in-memory [`LedgerRpc`] for exercising the client without a validator.
//!
//! Transactions are applied atomically and synchronously, so "confirmed" means "applied". The
//! system program's `CreateAccountWithSeed` is executed natively; any other program must be
//! registered with [`TestLedger::deploy_program`] along with a handler that stands in for it.

use std::{
    cell::RefCell,
    collections::HashMap,
    path::{
        Path,
        PathBuf,
    },
};

use helloworld_interface::{
    state::GreetingAccount,
    PROGRAM_KEYPAIR_FILE,
};
use solana_account::Account;
use solana_sdk::{
    hash::Hash,
    message::Message,
    pubkey::Pubkey,
    rent::Rent,
    signature::{
        Keypair,
        Signature,
    },
    signer::Signer,
    transaction::Transaction,
};
use solana_system_interface::instruction::SystemInstruction;
use tempfile::TempDir;

use crate::{
    keypair::write_keypair,
    rpc::LedgerRpc,
};

pub const DEFAULT_LAMPORTS_PER_SIGNATURE: u64 = 5_000;

/// Owner of the executable accounts created by [`TestLedger::deploy_program`].
pub const LOADER_ID: Pubkey = Pubkey::from_str_const("BPFLoaderUpgradeab1e11111111111111111111111");

/// The rent exempt minimum under the default rent parameters.
pub fn rent_exempt_minimum(data_len: usize) -> u64 {
    Rent::default().minimum_balance(data_len)
}

/// An account passed to a program handler.
#[derive(Debug)]
pub struct HandlerAccount {
    pub address: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
    pub account: Account,
}

/// Stands in for an on-chain program: `(program_id, instruction_data, accounts)`.
pub type ProgramHandler = Box<dyn Fn(&Pubkey, &[u8], &mut [HandlerAccount]) -> anyhow::Result<()>>;

pub struct TestLedger {
    accounts: RefCell<HashMap<Pubkey, Account>>,
    programs: HashMap<Pubkey, ProgramHandler>,
    confirmed: RefCell<Vec<Transaction>>,
    requests: RefCell<Vec<&'static str>>,
    blockhash: Hash,
    lamports_per_signature: u64,
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLedger {
    pub fn new() -> Self {
        Self {
            accounts: RefCell::new(HashMap::new()),
            programs: HashMap::new(),
            confirmed: RefCell::new(vec![]),
            requests: RefCell::new(vec![]),
            blockhash: Hash::new_unique(),
            lamports_per_signature: DEFAULT_LAMPORTS_PER_SIGNATURE,
        }
    }

    /// Credits `lamports` to `address`, creating a system account if there isn't one.
    pub fn fund(&self, address: &Pubkey, lamports: u64) {
        self.accounts
            .borrow_mut()
            .entry(*address)
            .or_insert_with(|| Account::new(0, 0, &solana_system_interface::program::ID))
            .lamports += lamports;
    }

    pub fn set_account(&self, address: &Pubkey, account: Account) {
        self.accounts.borrow_mut().insert(*address, account);
    }

    pub fn account(&self, address: &Pubkey) -> Option<Account> {
        self.accounts.borrow().get(address).cloned()
    }

    /// Creates an executable account at `program_id` and routes its instructions to `handler`.
    pub fn deploy_program(
        &mut self,
        program_id: &Pubkey,
        handler: impl Fn(&Pubkey, &[u8], &mut [HandlerAccount]) -> anyhow::Result<()> + 'static,
    ) {
        let mut program = Account::new(1, 0, &LOADER_ID);
        program.executable = true;
        self.set_account(program_id, program);
        self.programs.insert(*program_id, Box::new(handler));
    }

    /// Every transaction that was applied, in submission order.
    pub fn confirmed_transactions(&self) -> Vec<Transaction> {
        self.confirmed.borrow().clone()
    }

    /// The JSON-RPC method names of every [`LedgerRpc`] call served so far, in order.
    pub fn requests(&self) -> Vec<&'static str> {
        self.requests.borrow().clone()
    }

    fn record(&self, method: &'static str) {
        self.requests.borrow_mut().push(method);
    }

    /// The number of applied transactions with at least one instruction for `program_id`.
    pub fn transactions_invoking(&self, program_id: &Pubkey) -> usize {
        self.confirmed
            .borrow()
            .iter()
            .filter(|tx| {
                tx.message.instructions.iter().any(|ixn| {
                    tx.message.account_keys.get(ixn.program_id_index as usize) == Some(program_id)
                })
            })
            .count()
    }

    fn fee(&self, message: &Message) -> u64 {
        self.lamports_per_signature * message.header.num_required_signatures as u64
    }

    fn process(&self, transaction: &Transaction) -> anyhow::Result<()> {
        let message = &transaction.message;
        if message.recent_blockhash != self.blockhash {
            anyhow::bail!("Blockhash not found");
        }
        if !transaction.is_signed() {
            anyhow::bail!("Transaction is missing signatures");
        }

        // Work on a copy so a failed instruction leaves the ledger untouched.
        let mut accounts = self.accounts.borrow().clone();

        let fee_payer = message
            .account_keys
            .first()
            .ok_or_else(|| anyhow::anyhow!("Transaction has no fee payer"))?;
        let fee = self.fee(message);
        match accounts.get_mut(fee_payer) {
            Some(payer) if payer.lamports >= fee => payer.lamports -= fee,
            _ => anyhow::bail!("Insufficient funds for fee"),
        }

        for (index, ixn) in message.instructions.iter().enumerate() {
            let key = |i: usize| {
                message
                    .account_keys
                    .get(i)
                    .copied()
                    .ok_or_else(|| {
                        anyhow::anyhow!("Instruction {index} has an invalid account index")
                    })
            };
            let program_id = key(ixn.program_id_index as usize)?;
            let metas = ixn
                .accounts
                .iter()
                .map(|&i| -> anyhow::Result<_> {
                    let i = i as usize;
                    Ok((key(i)?, message.is_signer(i), message.is_maybe_writable(i, None)))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let res = if program_id == solana_system_interface::program::ID {
                process_system_instruction(&mut accounts, &ixn.data, &metas)
            } else {
                self.process_program_instruction(&mut accounts, &program_id, &ixn.data, &metas)
            };
            res.map_err(|e| e.context(format!("Instruction {index} failed")))?;
        }

        *self.accounts.borrow_mut() = accounts;
        Ok(())
    }

    fn process_program_instruction(
        &self,
        accounts: &mut HashMap<Pubkey, Account>,
        program_id: &Pubkey,
        data: &[u8],
        metas: &[(Pubkey, bool, bool)],
    ) -> anyhow::Result<()> {
        let handler = match (accounts.get(program_id), self.programs.get(program_id)) {
            (Some(program), Some(handler)) if program.executable => handler,
            _ => anyhow::bail!("Program {program_id} isn't deployed"),
        };

        let mut handler_accounts = metas
            .iter()
            .map(|&(address, is_signer, is_writable)| HandlerAccount {
                address,
                is_signer,
                is_writable,
                account: accounts.get(&address).cloned().unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        handler(program_id, data, &mut handler_accounts)?;

        for HandlerAccount {
            address,
            is_writable,
            account,
            ..
        } in handler_accounts
        {
            let before = accounts.get(&address).cloned().unwrap_or_default();
            if before == account {
                continue;
            }
            if !is_writable {
                anyhow::bail!("Program {program_id} modified read-only account {address}");
            }
            if before.owner != *program_id && before.data != account.data {
                anyhow::bail!(
                    "Program {program_id} modified data of account {address} it doesn't own"
                );
            }
            // Accounts drained of lamports don't survive the transaction.
            if account.lamports == 0 {
                accounts.remove(&address);
            } else {
                accounts.insert(address, account);
            }
        }

        Ok(())
    }
}

fn process_system_instruction(
    accounts: &mut HashMap<Pubkey, Account>,
    data: &[u8],
    metas: &[(Pubkey, bool, bool)],
) -> anyhow::Result<()> {
    let (base, seed, lamports, space, owner) =
        match bincode::deserialize::<SystemInstruction>(data)? {
            SystemInstruction::CreateAccountWithSeed {
                base,
                seed,
                lamports,
                space,
                owner,
            } => (base, seed, lamports, space, owner),
            other => anyhow::bail!("Unsupported system instruction: {other:?}"),
        };

    let [(funder, funder_signed, funder_writable), (to, _, to_writable), rest @ ..] = metas else {
        anyhow::bail!("CreateAccountWithSeed requires at least two accounts");
    };
    if !funder_signed || !funder_writable || !to_writable {
        anyhow::bail!("CreateAccountWithSeed requires a signing funder and a writable new account");
    }
    let base_signed = *funder == base && *funder_signed
        || rest.iter().any(|(key, signed, _)| *key == base && *signed);
    if !base_signed {
        anyhow::bail!("Base {base} must sign CreateAccountWithSeed");
    }

    let expected = Pubkey::create_with_seed(&base, &seed, &owner)
        .map_err(|e| anyhow::anyhow!("Invalid seed: {e}"))?;
    if expected != *to {
        anyhow::bail!("Address {to} doesn't match the address derived from the seed: {expected}");
    }

    if let Some(existing) = accounts.get(to) {
        if existing.lamports > 0 || !existing.data.is_empty() {
            anyhow::bail!("Account {to} already in use");
        }
    }

    let funder_account = accounts
        .get_mut(funder)
        .filter(|account| account.lamports >= lamports)
        .ok_or_else(|| anyhow::anyhow!("Funder {funder} has insufficient lamports"))?;
    funder_account.lamports -= lamports;

    accounts.insert(*to, Account::new(lamports, space as usize, &owner));
    Ok(())
}

/// A handler for a greeting program that adds one to the counter of the first account.
pub fn increment_greeting_counter(
    program_id: &Pubkey,
    _data: &[u8],
    accounts: &mut [HandlerAccount],
) -> anyhow::Result<()> {
    let greeted = accounts
        .first_mut()
        .ok_or_else(|| anyhow::anyhow!("Missing greeting account"))?;
    if greeted.account.owner != *program_id {
        anyhow::bail!("Greeted account does not have the correct program id");
    }

    let mut greeting = GreetingAccount::unpack(&greeted.account.data)?;
    greeting.counter = greeting
        .counter
        .checked_add(1)
        .ok_or_else(|| anyhow::anyhow!("Greeting counter overflow"))?;
    greeted.account.data = greeting.pack()?;

    Ok(())
}

/// A program keypair written to a temporary directory laid out like a program's build output.
pub struct ProgramDir {
    dir: TempDir,
    pub program_id: Pubkey,
}

impl ProgramDir {
    /// Writes a fresh program keypair to `<tempdir>/helloworld-keypair.json`.
    pub fn new() -> anyhow::Result<Self> {
        let program = Keypair::new();
        let dir = tempfile::tempdir()?;
        write_keypair(dir.path().join(PROGRAM_KEYPAIR_FILE), &program)?;

        Ok(Self {
            dir,
            program_id: program.pubkey(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn keypair_path(&self) -> PathBuf {
        self.path().join(PROGRAM_KEYPAIR_FILE)
    }
}

impl LedgerRpc for TestLedger {
    fn get_latest_blockhash(&self) -> anyhow::Result<Hash> {
        self.record("getLatestBlockhash");
        Ok(self.blockhash)
    }

    fn get_fee_for_message(&self, message: &Message) -> anyhow::Result<u64> {
        self.record("getFeeForMessage");
        Ok(self.fee(message))
    }

    fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> anyhow::Result<u64> {
        self.record("getMinimumBalanceForRentExemption");
        Ok(rent_exempt_minimum(data_len))
    }

    fn get_balance(&self, address: &Pubkey) -> anyhow::Result<u64> {
        self.record("getBalance");
        Ok(self.account(address).map_or(0, |account| account.lamports))
    }

    fn get_account(&self, address: &Pubkey) -> anyhow::Result<Option<Account>> {
        self.record("getAccountInfo");
        Ok(self.account(address))
    }

    fn send_and_confirm_transaction(&self, transaction: &Transaction) -> anyhow::Result<Signature> {
        self.record("sendTransaction");
        self.process(transaction)
            .map_err(|e| e.context("Failed transaction submission"))?;
        self.confirmed.borrow_mut().push(transaction.clone());

        Ok(transaction.signatures.first().copied().unwrap_or_default())
    }
}
