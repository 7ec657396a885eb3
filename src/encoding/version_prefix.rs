use crate::util::Network;

/// Version prefixes prepended to Base58Check payloads. Only the ones a
/// watch-only multisig wallet needs: extended public keys in and P2SH
/// addresses out, on either network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPrefix {
    //One byte version prefixes
    P2ScriptAddress = 0x05,
    TestnetP2SHAddress = 0xC4,

    //Four byte version prefixes (BIP-32)
    Xpub = 0x0488B21E,
    Tpub = 0x043587CF,
}

impl VersionPrefix {
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            VersionPrefix::P2ScriptAddress => vec![0x05],
            VersionPrefix::TestnetP2SHAddress => vec![0xC4],

            //Four byte cases
            _ => (self as u32).to_be_bytes().to_vec(),
        }
    }

    /// Version prefix of serialized extended public keys on the given network
    pub fn xpub_for(network: Network) -> Self {
        match network {
            Network::Bitcoin => VersionPrefix::Xpub,
            Network::Testnet => VersionPrefix::Tpub,
        }
    }

    /// Version prefix of P2SH addresses on the given network
    pub fn p2sh_for(network: Network) -> Self {
        match network {
            Network::Bitcoin => VersionPrefix::P2ScriptAddress,
            Network::Testnet => VersionPrefix::TestnetP2SHAddress,
        }
    }

    /// The network implied by a 4-byte extended key version, if it is one
    /// this library understands.
    pub fn xpub_network(version: u32) -> Option<Network> {
        match version {
            0x0488B21E => Some(Network::Bitcoin),
            0x043587CF => Some(Network::Testnet),
            _ => None,
        }
    }
}
