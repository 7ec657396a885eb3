/*
    Watch-only m-of-n multisig HD wallet.

    Every cosigner xpub is derived over the same path, the resulting
    child keys are combined into a sorted multisig redeem script and
    the address is the P2SH encoding of its hash. Keys are never mixed
    mid-path; they only meet in the final script.
*/

use std::str::FromStr;

use crate::{
    address::Address,
    hdwallet::{HDWError, Path, Xpub},
    script::{RedeemScript, ScriptError, MAX_MULTISIG_KEYS},
    util::Network,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HDMultisig {
    xpubs: Vec<Xpub>,
    m: u8,
    network: Network,
}

impl HDMultisig {
    /**
        Builds a watch-only multisig wallet from its cosigner xpubs and
        required-signature count. The threshold and the network
        consistency of the keys are checked once here, so every later
        derivation can only fail on the cryptographic side.
    */
    pub fn new(xpubs: Vec<Xpub>, m: u8) -> Result<Self, HDWError> {
        let network = xpubs.first().ok_or(HDWError::NoKeys)?.network;
        if xpubs.iter().any(|xpub| xpub.network != network) {
            return Err(HDWError::MixedNetworks);
        }

        let n = xpubs.len();
        if m == 0 || m as usize > n {
            return Err(ScriptError::InvalidThreshold { m, n }.into());
        }
        if n > MAX_MULTISIG_KEYS {
            return Err(ScriptError::TooManyKeys(n).into());
        }

        Ok(Self { xpubs, m, network })
    }

    /// Parses each serialized xpub and builds the wallet
    pub fn from_encoded_keys<S: AsRef<str>>(keys: &[S], m: u8) -> Result<Self, HDWError> {
        let xpubs = keys
            .iter()
            .map(|key| Xpub::from_str(key.as_ref()))
            .collect::<Result<Vec<Xpub>, HDWError>>()?;
        Self::new(xpubs, m)
    }

    pub fn m(&self) -> u8 {
        self.m
    }

    pub fn n(&self) -> u8 {
        self.xpubs.len() as u8
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /**
        Returns the redeem script at the given path.

        Each xpub is derived across the full path independently; the
        child keys are sorted by RedeemScript::multisig, so the stored
        cosigner order never influences the result.
    */
    pub fn redeem_script_at(&self, path: &Path) -> Result<RedeemScript, HDWError> {
        let mut keys = Vec::with_capacity(self.xpubs.len());
        for xpub in &self.xpubs {
            keys.push(xpub.derive_from_path(path)?.public_key());
        }

        Ok(RedeemScript::multisig(self.m, &keys)?)
    }

    /// Returns the P2SH address at the given path
    pub fn address_at(&self, path: &Path) -> Result<String, HDWError> {
        let script = self.redeem_script_at(path)?;
        Ok(Address::p2sh(&script, self.network))
    }

    /**
        Returns a lazy sequence of the addresses at prefix/i for i in
        [start, start+count). Elements are independent of each other,
        and the sequence can be restarted with any start/count since no
        state is shared between calls.
    */
    pub fn addresses(&self, prefix: &Path, start: u32, count: u32) -> AddressSequence<'_> {
        AddressSequence {
            wallet: self,
            prefix: prefix.clone(),
            next: start,
            remaining: count,
        }
    }
}

/// Iterator over consecutive receiving addresses of a wallet
pub struct AddressSequence<'a> {
    wallet: &'a HDMultisig,
    prefix: Path,
    next: u32,
    remaining: u32,
}

impl Iterator for AddressSequence<'_> {
    type Item = Result<String, HDWError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let address = self.wallet.address_at(&self.prefix.extended(self.next));
        self.next = self.next.saturating_add(1);
        self.remaining -= 1;
        Some(address)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for AddressSequence<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    //Master xpubs of two reference cosigners. The expected addresses
    //below were produced with an independent BIP-32/BIP-67
    //implementation that reproduces the BIP-32 test vectors.
    const PUB1: &str = "xpub661MyMwAqRbcGLUj3Uff2UaHg15FUna4ZbLFwz5EVkCXBSi7bSTXU69RubGEwVFUUh5jgzxmFp9aHHLuLhMyNF4Gs9EACFdLaQBB5RQW128";
    const PUB2: &str = "xpub661MyMwAqRbcGhoynaKYKYMrPfjVSL38zWaLCxZxsHeqD4crYePujxi2DYA2TBaLCb4vZH6BKF9xMMDcHtdRgTKkmWQpYKzpJXiHf4ukdVR";
    const PUB3: &str = "xpub661MyMwAqRbcGxYJmREjBDpZNsb1agpxXry2tEgaUNedzrqGddpSPdJqQt56EApBgybxzCt3QLUiUX4PL4pxQgtqB5yXDMx2Jwte9r7woKo";

    const TWO_OF_TWO_ADDRESSES: [&str; 5] = [
        "3QDQUcqBj2M2hmzHh85kZvrz8p2p85vjYT",
        "3ELZhfS3NbJnQsEdWxywatTf3YMs2ipC7F",
        "34LYuJhq52M4QTL3Zuj6gBr3eMuaTMmpXp",
        "3KCQorWDr5cFakd3dWekWWFP9eLF2Ny1VU",
        "3LCh9mu5w6BPGtTD8NsGFcHSozKgBt28zp",
    ];

    fn two_of_two() -> HDMultisig {
        HDMultisig::from_encoded_keys(&[PUB1, PUB2], 2).unwrap()
    }

    #[test]
    fn known_two_of_two_addresses() {
        let wallet = two_of_two();
        for (i, expected) in TWO_OF_TWO_ADDRESSES.iter().enumerate() {
            let path = Path::new(vec![0, i as u32]);
            assert_eq!(&wallet.address_at(&path).unwrap(), expected);
        }
    }

    #[test]
    fn cosigner_order_does_not_matter() {
        let forward = two_of_two();
        let backward = HDMultisig::from_encoded_keys(&[PUB2, PUB1], 2).unwrap();
        let path = Path::new(vec![0, 0]);
        assert_eq!(
            forward.address_at(&path).unwrap(),
            backward.address_at(&path).unwrap()
        );
    }

    #[test]
    fn known_two_of_three_addresses() {
        let wallet = HDMultisig::from_encoded_keys(&[PUB1, PUB2, PUB3], 2).unwrap();
        assert_eq!(
            wallet.address_at(&Path::new(vec![0, 0])).unwrap(),
            "3H9HVLRJNr1fUiJqQDEDToEMNLs4X4mqhq"
        );

        let shuffled = HDMultisig::from_encoded_keys(&[PUB3, PUB1, PUB2], 2).unwrap();
        assert_eq!(
            shuffled.address_at(&Path::new(vec![0, 7])).unwrap(),
            "3JNsgtEZt5Mouo7d12nyznRDgTBRQaECJM"
        );
    }

    #[test]
    fn known_one_of_one_address() {
        let wallet = HDMultisig::from_encoded_keys(&[PUB1], 1).unwrap();
        assert_eq!(
            wallet.address_at(&Path::new(vec![0, 0])).unwrap(),
            "38yf3bMqZPseTAZHdodEbPE7JDDW9qniaT"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let wallet = two_of_two();
        let path = Path::new(vec![0, 3]);
        assert_eq!(
            wallet.address_at(&path).unwrap(),
            wallet.address_at(&path).unwrap()
        );
    }

    #[test]
    fn sequence_matches_per_index_derivation() {
        let wallet = two_of_two();
        let prefix = Path::new(vec![0]);

        let from_sequence: Vec<String> = wallet
            .addresses(&prefix, 2, 3)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(from_sequence, &TWO_OF_TWO_ADDRESSES[2..5]);
    }

    #[test]
    fn sequence_is_restartable() {
        let wallet = two_of_two();
        let prefix = Path::new(vec![0]);

        let first: Vec<String> = wallet
            .addresses(&prefix, 0, 5)
            .collect::<Result<_, _>>()
            .unwrap();
        let again: Vec<String> = wallet
            .addresses(&prefix, 0, 5)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(first, again);
        assert_eq!(first, TWO_OF_TWO_ADDRESSES);
    }

    #[test]
    fn sequence_addresses_are_distinct() {
        let wallet = two_of_two();
        let addresses: HashSet<String> = wallet
            .addresses(&Path::new(vec![0]), 0, 20)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(addresses.len(), 20);
    }

    #[test]
    fn rejects_invalid_thresholds() {
        assert_eq!(
            HDMultisig::from_encoded_keys(&[PUB1, PUB2], 0),
            Err(HDWError::Script(ScriptError::InvalidThreshold { m: 0, n: 2 }))
        );
        assert_eq!(
            HDMultisig::from_encoded_keys(&[PUB1, PUB2], 3),
            Err(HDWError::Script(ScriptError::InvalidThreshold { m: 3, n: 2 }))
        );
        assert_eq!(
            HDMultisig::from_encoded_keys::<&str>(&[], 1),
            Err(HDWError::NoKeys)
        );
    }

    #[test]
    fn rejects_mixed_networks() {
        let mainnet = Xpub::from_str(PUB1).unwrap();
        let testnet = Xpub::construct(
            mainnet.public_key(),
            mainnet.chaincode(),
            mainnet.depth,
            mainnet.parent_fingerprint,
            mainnet.index,
            Network::Testnet,
        );

        assert_eq!(
            HDMultisig::new(vec![mainnet, testnet], 2),
            Err(HDWError::MixedNetworks)
        );
    }

    #[test]
    fn hardened_prefix_fails() {
        let wallet = two_of_two();
        assert!(matches!(
            wallet.address_at(&Path::new(vec![0x8000_0000])),
            Err(HDWError::HardenedIndex(_))
        ));
    }
}
