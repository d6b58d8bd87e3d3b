//! Account layout, seeds, and instruction builders shared by anything that talks to the
//! hello-world greeting program.

pub mod instructions;
pub mod state;

/// The seed used with the payer's pubkey to derive the greeting account address.
pub const GREETING_SEED: &str = "hello";

/// File name of the deployed program's keypair inside the program build directory.
pub const PROGRAM_KEYPAIR_FILE: &str = "helloworld-keypair.json";
