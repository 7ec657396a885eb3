/*
    The wallet profile collaborator: everything that gets the wallet
    metadata out of Copay's browser-style localstorage and into the
    core's hands. The localstorage file is a Chromium sqlite database
    whose ItemTable holds the profile JSON under the key 'profile'.

    Nothing in here touches derivation; the core only ever consumes the
    xPubKey strings and the m threshold extracted here.
*/

use std::fmt;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::debug;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("localstorage path '{}' does not exist (try --localstorage?)", .0.display())]
    MissingStorage(PathBuf),
    #[error("could not read localstorage database: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("localstorage has no profile entry")]
    MissingProfile,
    #[error("could not decode the wallet profile: {0}")]
    Json(#[from] serde_json::Error),
    #[error("walletId '{0}' not found")]
    WalletNotFound(String),
    #[error("no wallets found")]
    NoWallets,
    #[error("multiple wallets found")]
    MultipleWallets,
}

/// The decoded Copay profile. Unknown fields (encrypted private data,
/// preferences, ...) are ignored; only public material is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub credentials: Vec<WalletCredentials>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCredentials {
    pub wallet_id: String,
    pub wallet_name: String,
    pub m: u8,
    pub n: u8,
    pub public_key_ring: Vec<PublicKeyRingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyRingEntry {
    pub x_pub_key: String,
}

impl WalletCredentials {
    /// The serialized cosigner xpubs, in stored order
    pub fn xpub_strings(&self) -> Vec<&str> {
        self.public_key_ring
            .iter()
            .map(|entry| entry.x_pub_key.as_str())
            .collect()
    }
}

impl fmt::Display for WalletCredentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}-of-{}) (id: {})",
            self.wallet_name, self.m, self.n, self.wallet_id
        )
    }
}

/**
    Extracts and decodes the wallet profile from a Copay localstorage
    file. The database is opened read-only and closed again around the
    single query.
*/
pub fn read_profile(path: &Path) -> Result<Profile, ProfileError> {
    if !path.exists() {
        return Err(ProfileError::MissingStorage(path.to_path_buf()));
    }

    debug!("reading wallet profile from {}", path.display());
    let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let json: Option<String> = connection
        .query_row(
            "SELECT CAST(value AS TEXT) FROM ItemTable WHERE key = 'profile'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let profile: Profile = serde_json::from_str(&json.ok_or(ProfileError::MissingProfile)?)?;
    debug!("profile holds {} wallet(s)", profile.credentials.len());
    Ok(profile)
}

/**
    Picks a wallet out of the profile. With an id, that wallet or
    `WalletNotFound`. Without one, the only wallet there is, `NoWallets`
    for an empty profile, or `MultipleWallets` when the caller has to
    ask the user (the interactive picker lives in the binary, not here).
*/
pub fn select_wallet<'a>(
    wallets: &'a [WalletCredentials],
    wallet_id: Option<&str>,
) -> Result<&'a WalletCredentials, ProfileError> {
    if let Some(id) = wallet_id {
        return wallets
            .iter()
            .find(|wallet| wallet.wallet_id == id)
            .ok_or_else(|| ProfileError::WalletNotFound(id.to_string()));
    }

    match wallets {
        [] => Err(ProfileError::NoWallets),
        [wallet] => Ok(wallet),
        _ => Err(ProfileError::MultipleWallets),
    }
}

/// The localstorage path the Copay desktop app uses on this platform
pub fn default_localstorage_path() -> Option<PathBuf> {
    let dirs = BaseDirs::new()?;
    let base = if cfg!(target_os = "windows") {
        dirs.data_local_dir().join("copay")
    } else {
        //~/.config/copay on Linux, ~/Library/Application Support/copay on macOS
        dirs.config_dir().join("copay")
    };
    Some(base.join("Local Storage").join("file__0.localstorage"))
}
