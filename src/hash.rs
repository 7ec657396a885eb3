/*
    Hash module with the digest compositions needed to turn public keys
    and scripts into addresses, and to run BIP-32 child key derivation.

    Everything here is a pure function of its input.
*/

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

use crate::util::try_into;

type HmacSha512 = Hmac<Sha512>;

/// Single SHA-256
pub fn sha256<T>(input: T) -> [u8; 32]
where
    T: AsRef<[u8]>,
{
    let mut hasher = Sha256::new();
    hasher.update(input);
    try_into(hasher.finalize().to_vec())
}

/// Double SHA-256, used for Base58Check checksums
pub fn sha256d<T>(input: T) -> [u8; 32]
where
    T: AsRef<[u8]>,
{
    sha256(sha256(input))
}

/// RIPEMD-160
pub fn ripemd160<T>(input: T) -> [u8; 20]
where
    T: AsRef<[u8]>,
{
    let mut hasher = Ripemd160::new();
    hasher.update(input);
    try_into(hasher.finalize().to_vec())
}

/// HASH160 = RIPEMD160(SHA256(x)), used for script hashes and key fingerprints
pub fn hash160<T>(input: T) -> [u8; 20]
where
    T: AsRef<[u8]>,
{
    ripemd160(sha256(input))
}

/// HMAC-SHA512 keyed with `key`, the BIP-32 derivation primitive
pub fn hmac_sha512(data: &[u8], key: &[u8]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    try_into(mac.finalize().into_bytes().to_vec())
}
