use borsh::{
    BorshDeserialize,
    BorshSerialize,
};
use static_assertions::const_assert_eq;

/// The number of bytes a [`GreetingAccount`] occupies on chain: the sum of its fields' borsh
/// encoded widths. Borsh writes fields back to back with no padding, so this isn't `size_of`.
pub const GREETING_SIZE: usize = size_of::<u32>();

/// The data stored in a greeting account.
///
/// The on-chain layout is the borsh encoding of this struct: a single little-endian `u32`. Adding
/// a field means adding its encoded width to [`GREETING_SIZE`].
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GreetingAccount {
    /// The number of times the account has been greeted.
    pub counter: u32,
}

const_assert_eq!(GREETING_SIZE, 4);

impl GreetingAccount {
    pub const fn new(counter: u32) -> Self {
        Self { counter }
    }

    /// Decodes account data. Fails if `data` isn't exactly [`GREETING_SIZE`] bytes.
    pub fn unpack(data: &[u8]) -> borsh::io::Result<Self> {
        borsh::from_slice(data)
    }

    pub fn pack(&self) -> borsh::io::Result<Vec<u8>> {
        borsh::to_vec(self)
    }
}
