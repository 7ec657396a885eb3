/*
    Extended public keys: a compressed public key bundled with the chain
    code and serialization metadata of BIP-32.

    Serialized form is 78 bytes under Base58Check:
        version (4) || depth (1) || parent fingerprint (4) ||
        child number (4) || chain code (32) || compressed key (33)
*/

use std::str::FromStr;

use crate::{
    encoding::{Base58, VersionPrefix},
    hdwallet::{ckd, HDWError, Path},
    key::PubKey,
    util::{as_u32_be, try_into, Network},
};

/// An extended public key. Immutable; derivation hands back a fresh
/// value, so one parent can be derived from repeatedly or concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xpub {
    key: PubKey,
    chaincode: [u8; 32],
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub index: [u8; 4],
    pub network: Network,
}

impl Xpub {
    pub fn construct(
        key: PubKey,
        chaincode: [u8; 32],
        depth: u8,
        pf: [u8; 4],
        index: [u8; 4],
        network: Network,
    ) -> Self {
        Self {
            key,
            chaincode,
            depth,
            parent_fingerprint: pf,
            index,
            network,
        }
    }

    /// The compressed public key part of the extended key
    pub fn public_key(&self) -> PubKey {
        self.key
    }

    /// The chain code part of the extended key
    pub fn chaincode(&self) -> [u8; 32] {
        self.chaincode
    }

    /// First four bytes of HASH160 of the compressed key; children
    /// record this as their parent fingerprint.
    pub fn fingerprint(&self) -> [u8; 4] {
        try_into(self.key.hash160()[0..4].to_vec())
    }

    /// Serialize with the network's xpub version prefix
    pub fn serialize(&self) -> String {
        let mut payload: Vec<u8> = Vec::with_capacity(74);
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.index);
        payload.extend_from_slice(&self.chaincode);
        payload.extend_from_slice(&self.key.as_bytes());

        Base58::new(Some(VersionPrefix::xpub_for(self.network)), &payload).check_encode()
    }

    /// Derives the non-hardened child at `index`
    pub fn derive_child(&self, index: u32) -> Result<Xpub, HDWError> {
        ckd::derive_xpub(self, index)
    }

    /**
        Derives the key at the given path, applying single-step
        derivation once per path component, left to right.
    */
    pub fn derive_from_path(&self, path: &Path) -> Result<Xpub, HDWError> {
        let mut current = *self;
        for &index in &path.indexes {
            current = current.derive_child(index)?;
        }
        Ok(current)
    }
}

impl FromStr for Xpub {
    type Err = HDWError;

    /// Import an extended public key from its Base58Check string,
    /// "xpub..." for mainnet or "tpub..." for testnet.
    fn from_str(key: &str) -> Result<Self, HDWError> {
        let bytes = Base58::check_decode(key)?;
        if bytes.len() != 78 {
            return Err(HDWError::BadKey);
        }

        let version = as_u32_be(&try_into(bytes[0..4].to_vec()));
        let network = VersionPrefix::xpub_network(version)
            .ok_or_else(|| HDWError::BadPrefix(bytes[0..4].to_vec()))?;

        let depth: u8 = bytes[4];
        let fingerprint: [u8; 4] = try_into(bytes[5..9].to_vec());
        let index: [u8; 4] = try_into(bytes[9..13].to_vec());
        let chaincode: [u8; 32] = try_into(bytes[13..45].to_vec());
        let key = PubKey::from_slice(&bytes[45..78])?;

        Ok(Self::construct(
            key,
            chaincode,
            depth,
            fingerprint,
            index,
            network,
        ))
    }
}
