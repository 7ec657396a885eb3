/*
    P2SH address construction: Base58Check of the HASH160 of a redeem
    script, with the network's script-address version byte.
*/

use crate::{
    encoding::{Base58, VersionPrefix},
    script::RedeemScript,
    util::Network,
};

pub struct Address;

impl Address {
    /**
        Creates a P2SH address from a redeem script.

        Mainnet addresses start with '3', testnet addresses with '2'.
    */
    pub fn p2sh(script: &RedeemScript, network: Network) -> String {
        Base58::new(Some(VersionPrefix::p2sh_for(network)), &script.hash()).check_encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn p2sh_address_vector() {
        let script = RedeemScript::new(vec![0x6a, 0x29, 0x05, 0x20, 0x03]);
        assert_eq!(
            Address::p2sh(&script, Network::Bitcoin),
            "33SjjXog5Tqm3kCYNGCQBH46gc48a4SUXn"
        );
    }

    #[test]
    fn p2sh_address_prefixes() {
        for i in 0..5u8 {
            let script = RedeemScript::new(vec![i; 5]);
            assert!(Address::p2sh(&script, Network::Bitcoin).starts_with('3'));
            assert!(Address::p2sh(&script, Network::Testnet).starts_with('2'));
        }
    }
}
