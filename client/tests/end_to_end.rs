use client::{
    address::greeting_account_address,
    run::greet_program,
    test_ledger::{
        increment_greeting_counter,
        rent_exempt_minimum,
        ProgramDir,
        TestLedger,
        DEFAULT_LAMPORTS_PER_SIGNATURE,
    },
};
use helloworld_interface::state::{
    GreetingAccount,
    GREETING_SIZE,
};
use solana_sdk::{
    signature::Keypair,
    signer::Signer,
};

const PAYER_LAMPORTS: u64 = 10_000_000_000;

#[test]
fn first_run_creates_then_greets() -> anyhow::Result<()> {
    let payer = Keypair::new();
    let program = ProgramDir::new()?;
    let program_id = program.program_id;
    let mut ledger = TestLedger::new();
    ledger.fund(&payer.pubkey(), PAYER_LAMPORTS);
    ledger.deploy_program(&program_id, increment_greeting_counter);

    let outcome = greet_program(&ledger, &payer, &program.keypair_path())?;

    // Exactly two transactions: create the account, then greet it.
    let transactions = ledger.confirmed_transactions();
    assert_eq!(transactions.len(), 2);
    assert_eq!(
        ledger.transactions_invoking(&solana_system_interface::program::ID),
        1
    );
    assert_eq!(ledger.transactions_invoking(&program_id), 1);

    let greeting_account = greeting_account_address(&payer.pubkey(), &program_id)?;
    assert!(outcome.target.created);
    assert_eq!(outcome.target.greeting_account, greeting_account);
    assert_eq!(outcome.report.greeting_account, greeting_account);
    assert_eq!(outcome.report.greeting, GreetingAccount::new(1));

    // The reported value is exactly what's stored on the ledger.
    let stored = ledger
        .account(&greeting_account)
        .expect("Greeting account should exist");
    assert_eq!(stored.owner, program_id);
    assert_eq!(stored.data.len(), GREETING_SIZE);
    assert_eq!(stored.lamports, rent_exempt_minimum(GREETING_SIZE));
    assert_eq!(GreetingAccount::unpack(&stored.data)?, outcome.report.greeting);

    // The payer paid for the account's rent plus one signature per transaction.
    assert_eq!(
        ledger.account(&payer.pubkey()).unwrap().lamports,
        PAYER_LAMPORTS - rent_exempt_minimum(GREETING_SIZE) - 2 * DEFAULT_LAMPORTS_PER_SIGNATURE
    );

    Ok(())
}

#[test]
fn fee_check_reports_balance_and_estimate() -> anyhow::Result<()> {
    let payer = Keypair::new();
    let program = ProgramDir::new()?;
    let program_id = program.program_id;
    let mut ledger = TestLedger::new();
    ledger.fund(&payer.pubkey(), PAYER_LAMPORTS);
    ledger.deploy_program(&program_id, increment_greeting_counter);

    let outcome = greet_program(&ledger, &payer, &program.keypair_path())?;

    assert_eq!(outcome.fees.balance, PAYER_LAMPORTS);
    assert_eq!(
        outcome.fees.lamports_per_signature,
        DEFAULT_LAMPORTS_PER_SIGNATURE
    );
    assert_eq!(
        outcome.fees.rent_exempt_minimum,
        rent_exempt_minimum(GREETING_SIZE)
    );
    assert_eq!(
        outcome.fees.estimated_fees(),
        rent_exempt_minimum(GREETING_SIZE) + 100 * DEFAULT_LAMPORTS_PER_SIGNATURE
    );

    Ok(())
}

#[test]
fn low_balance_is_only_advisory() -> anyhow::Result<()> {
    let payer = Keypair::new();
    let program = ProgramDir::new()?;
    let program_id = program.program_id;
    let mut ledger = TestLedger::new();
    // Enough for the account and both transactions, but below the 100 signature estimate.
    let just_enough = rent_exempt_minimum(GREETING_SIZE) + 2 * DEFAULT_LAMPORTS_PER_SIGNATURE;
    ledger.fund(&payer.pubkey(), just_enough);
    ledger.deploy_program(&program_id, increment_greeting_counter);

    let outcome = greet_program(&ledger, &payer, &program.keypair_path())?;

    assert!(!outcome.fees.is_covered());
    assert_eq!(outcome.report.greeting.counter, 1);
    assert_eq!(ledger.account(&payer.pubkey()).map_or(0, |a| a.lamports), 0);

    Ok(())
}

#[test]
fn report_reads_whatever_the_program_wrote() -> anyhow::Result<()> {
    let payer = Keypair::new();
    let program = ProgramDir::new()?;
    let program_id = program.program_id;
    let mut ledger = TestLedger::new();
    ledger.fund(&payer.pubkey(), PAYER_LAMPORTS);
    // The program is opaque to the client; this one sets the counter to a fixed value.
    ledger.deploy_program(&program_id, |_, _, accounts| {
        accounts[0].account.data = GreetingAccount::new(0xdead_beef).pack()?;
        Ok(())
    });

    let outcome = greet_program(&ledger, &payer, &program.keypair_path())?;
    assert_eq!(outcome.report.greeting.counter, 0xdead_beef);

    Ok(())
}
