use std::convert::TryInto;

/// The network a key or address belongs to. Copay stores mainnet and
/// testnet wallets in the same profile, discriminated by the version
/// prefix of the stored xpubs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Network {
    Bitcoin,
    Testnet,
}

/**
    Converts a vector into a fixed size array.

    Panics if the length does not match, so only use this on slices
    whose length is already guaranteed (eg. halves of a HMAC output).
*/
pub fn try_into<T, const N: usize>(v: Vec<T>) -> [T; N] {
    v.try_into()
        .unwrap_or_else(|v: Vec<T>| panic!("Expected {}, found {}", N, v.len()))
}

//Converts a big-endian byte array to int
pub fn as_u32_be(array: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*array)
}
