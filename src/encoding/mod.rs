/*
    Module that bundles together the encoding schemes used by the wallet:
    Base58Check and the version prefixes that discriminate key and
    address types on the two networks.
*/

pub mod base58;
pub mod version_prefix;

pub use base58::{Base58, Base58Error};
pub use version_prefix::VersionPrefix;
