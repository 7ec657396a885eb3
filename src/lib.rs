/*
    Library to regenerate the public receiving addresses of a
    Copay-style m-of-n HD multisig wallet, given nothing but the
    wallet's extended public keys and its signature threshold.

    No private keys are ever touched. Derivation is the plain BIP-32
    public child key derivation (non-hardened only, since only the
    public chain code is available), the locking script is a sorted
    BIP-11/BIP-67 multisig redeem script and the address is its
    Base58Check encoded P2SH hash.

    References:
        - BIP-32 (https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki)
        - BIP-67 for the lexicographical key ordering multisig wallets rely on
        - The Rust-Bitcoin repository for reference code to work against
*/

//Outward facing modules
pub mod address;
pub mod encoding;
pub mod hdwallet;
pub mod key;
pub mod profile;
pub mod script;
pub mod util;

//Modules for internal use
mod hash;

pub mod prelude {
    /*
        Default imports for the library.

        Import with:
            use copaygen::prelude::*;
    */
    pub use crate::{
        address::Address,
        hdwallet::{AddressSequence, HDMultisig, HDWError, Path, Xpub},
        key::{KeyError, PubKey},
        profile::{Profile, ProfileError, WalletCredentials},
        script::{RedeemScript, ScriptError},
        util::Network,
    };
}
