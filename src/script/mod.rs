/*
    Minimal script support: the m-of-n multisig redeem script
    (BIP-11, keys ordered per BIP-67) and its HASH160 used for
    P2SH addresses.
*/

use thiserror::Error;

use crate::{hash, key::PubKey};

/// OP_CHECKMULTISIG rejects scripts with more than 20 keys
pub const MAX_MULTISIG_KEYS: usize = 20;

const OP_CHECKMULTISIG: u8 = 0xAE;
const OP_PUSHBYTES_33: u8 = 0x21;
//OP_1 is 0x51; OP_2..OP_16 follow consecutively
const OP_1: u8 = 0x51;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("invalid threshold: {m} of {n}")]
    InvalidThreshold { m: u8, n: usize },
    #[error("multisig script supports at most {MAX_MULTISIG_KEYS} keys, found {0}")]
    TooManyKeys(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemScript {
    pub code: Vec<u8>,
}

impl RedeemScript {
    pub fn new(code: Vec<u8>) -> Self {
        Self { code }
    }

    /// Hash the serialized script with HASH160
    pub fn hash(&self) -> [u8; 20] {
        hash::hash160(&self.code)
    }

    /**
        Creates the redeem script for an m-of-n multisig wallet:
            OP_m <key_1> ... <key_n> OP_n OP_CHECKMULTISIG

        Keys are sorted lexicographically by their compressed encoding
        (BIP-67) so the same key set always produces the same script no
        matter what order the cosigners are stored in.
    */
    pub fn multisig(m: u8, keys: &[PubKey]) -> Result<Self, ScriptError> {
        let n = keys.len();
        if m == 0 || m as usize > n {
            return Err(ScriptError::InvalidThreshold { m, n });
        }
        if n > MAX_MULTISIG_KEYS {
            return Err(ScriptError::TooManyKeys(n));
        }

        let mut key_bytes: Vec<[u8; 33]> = keys.iter().map(|k| k.as_bytes()).collect();
        key_bytes.sort();

        let mut code: Vec<u8> = Vec::with_capacity(3 + n * 34);
        push_small_int(&mut code, m);
        for key in &key_bytes {
            code.push(OP_PUSHBYTES_33);
            code.extend_from_slice(key);
        }
        push_small_int(&mut code, n as u8);
        code.push(OP_CHECKMULTISIG);

        Ok(RedeemScript::new(code))
    }
}

/// Pushes the number x onto the script. OP_1 through OP_16 encode 1..=16
/// directly; 17..=20 need a one byte data push.
fn push_small_int(code: &mut Vec<u8>, x: u8) {
    debug_assert!((1..=MAX_MULTISIG_KEYS as u8).contains(&x));
    if x <= 16 {
        code.push(OP_1 + (x - 1));
    } else {
        code.push(0x01);
        code.push(x);
    }
}
