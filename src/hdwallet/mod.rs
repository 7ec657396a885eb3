/*
    Hierarchical deterministic wallet support under the BIP-32 standard,
    restricted to what a watch-only multisig wallet can do: extended
    public keys and non-hardened child derivation. Hardened steps need a
    private key and are rejected up front.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

mod ckd;
mod extended_keys;
mod hdmultisig;
mod path;

pub use ckd::derive_xpub;
pub use extended_keys::Xpub;
pub use hdmultisig::{AddressSequence, HDMultisig};
pub use path::{Path, HARDENED_THRESHOLD};

use thiserror::Error;

use crate::{encoding::Base58Error, key::KeyError, script::ScriptError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HDWError {
    #[error("not a valid serialized extended public key")]
    BadKey,
    #[error("unknown extended key version prefix {}", hex::encode(.0))]
    BadPrefix(Vec<u8>),
    #[error("bad derivation path '{0}'")]
    BadPath(String),
    #[error("index {0} requests hardened derivation, which needs a private key")]
    HardenedIndex(u32),
    #[error("wallet has no extended public keys")]
    NoKeys,
    #[error("extended public keys belong to different networks")]
    MixedNetworks,
    #[error(transparent)]
    Base58(#[from] Base58Error),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Script(#[from] ScriptError),
}
