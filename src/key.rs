/*
    Public key wrapper over the secp256k1 crate.

    The group law has to match the consensus curve bit-for-bit, since a
    divergence would silently produce wrong addresses rather than an
    error. That is why the curve arithmetic is delegated to the same
    vetted library the rest of the ecosystem uses instead of being
    reimplemented here.
*/

use std::fmt;

use secp256k1::{PublicKey, Scalar, Secp256k1};
use thiserror::Error;

use crate::hash;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("bytes do not encode a point on the secp256k1 curve")]
    InvalidPoint,
    #[error("scalar not below the curve order, or derived point at infinity")]
    InvalidScalar,
}

/// A compressed public key, guaranteed to be a valid curve point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PubKey(PublicKey);

impl PubKey {
    /**
        Parses a public key from its 33 byte compressed SEC1 encoding
        (0x02/0x03 parity byte followed by the big-endian x coordinate).
    */
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let key = PublicKey::from_slice(bytes).map_err(|_| KeyError::InvalidPoint)?;
        Ok(Self(key))
    }

    /// Returns the compressed public key as a byte array.
    pub fn as_bytes(&self) -> [u8; 33] {
        self.0.serialize()
    }

    /// HASH160 of the compressed key. The first four bytes of this are
    /// the BIP-32 parent fingerprint.
    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(self.as_bytes())
    }

    /**
        Computes `tweak*G + self`, the child public key point of BIP-32
        non-hardened derivation.

        Fails with `InvalidScalar` when the tweak is not below the curve
        order or the sum is the point at infinity (the astronomically
        rare derivation-index collision).
    */
    pub fn add_scalar(&self, tweak: &[u8; 32]) -> Result<PubKey, KeyError> {
        let scalar = Scalar::from_be_bytes(*tweak).map_err(|_| KeyError::InvalidScalar)?;
        let secp = Secp256k1::verification_only();
        let point = self
            .0
            .add_exp_tweak(&secp, &scalar)
            .map_err(|_| KeyError::InvalidScalar)?;

        Ok(PubKey(point))
    }

    /// Return the compressed public key as a hex string.
    pub fn hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //Generator point of secp256k1 in compressed form
    const GENERATOR_HEX: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn parses_valid_compressed_keys() {
        let key = PubKey::from_slice(&hex::decode(GENERATOR_HEX).unwrap()).unwrap();
        assert_eq!(key.hex(), GENERATOR_HEX);
    }

    #[test]
    fn rejects_non_curve_bytes() {
        //x = 5 has no square root mod p for either parity
        let mut bytes = [0u8; 33];
        bytes[0] = 0x02;
        bytes[32] = 0x05;
        assert_eq!(PubKey::from_slice(&bytes), Err(KeyError::InvalidPoint));

        //Wrong length
        assert_eq!(PubKey::from_slice(&[0x02; 12]), Err(KeyError::InvalidPoint));
    }

    #[test]
    fn tweak_addition_matches_generator_arithmetic() {
        //G + 1*G = 2*G
        let g = PubKey::from_slice(&hex::decode(GENERATOR_HEX).unwrap()).unwrap();
        let mut one = [0u8; 32];
        one[31] = 1;
        let two_g = g.add_scalar(&one).unwrap();
        assert_eq!(
            two_g.hex(),
            "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
        );
    }

    #[test]
    fn rejects_scalar_above_curve_order() {
        let g = PubKey::from_slice(&hex::decode(GENERATOR_HEX).unwrap()).unwrap();
        let too_large = [0xFF; 32];
        assert_eq!(g.add_scalar(&too_large), Err(KeyError::InvalidScalar));
    }
}
