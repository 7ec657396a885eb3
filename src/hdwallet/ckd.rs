/*
    Single-step non-hardened child key derivation for extended public
    keys (CKDpub in BIP-32 terms).
*/

use crate::{
    hash,
    hdwallet::{path::HARDENED_THRESHOLD, HDWError, Xpub},
    util::try_into,
};

/**
    Derives the child extended public key of `parent` at `index`.

    Only non-hardened indices (below 2^31) can be derived from public
    material; anything above fails with `HardenedIndex`. The left half
    of HMAC-SHA512(chaincode, serP(parent) || index) is a tweak added
    to the parent point, the right half becomes the child chain code.

    An out-of-range tweak or a point-at-infinity sum surfaces as an
    `InvalidScalar` error. BIP-32 treats this as an index collision;
    callers may move on to the next index, this library never retries
    on its own.
*/
pub fn derive_xpub(parent: &Xpub, index: u32) -> Result<Xpub, HDWError> {
    if index >= HARDENED_THRESHOLD {
        return Err(HDWError::HardenedIndex(index));
    }

    //Normal public key child is HMAC over [parent pub bytes || index bytes]
    let mut data: Vec<u8> = parent.public_key().as_bytes().to_vec();
    data.extend_from_slice(&index.to_be_bytes());

    let hash: [u8; 64] = hash::hmac_sha512(&data, &parent.chaincode());
    let left_bytes: [u8; 32] = try_into(hash[0..32].to_vec());
    let child_chaincode: [u8; 32] = try_into(hash[32..64].to_vec());

    let child_key = parent.public_key().add_scalar(&left_bytes)?;

    Ok(Xpub::construct(
        child_key,
        child_chaincode,
        parent.depth + 1,
        parent.fingerprint(),
        index.to_be_bytes(),
        parent.network,
    ))
}
