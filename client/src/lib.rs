//! Client for the hello-world greeting program.
//!
//! Connects to a ledger node, makes sure the payer's greeting account exists, greets it, and
//! reports how many times it has been greeted.

pub mod address;
pub mod config;
pub mod error;
pub mod fees;
pub mod greet;
pub mod keypair;
pub mod logs;
pub mod provision;
pub mod rpc;
pub mod run;
pub mod test_ledger;
pub mod transactions;
