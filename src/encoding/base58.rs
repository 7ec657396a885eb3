/*
    Base58Check codec.

    Check encoding appends the first four bytes of
    sha256d(version || payload) as a checksum before mapping the whole
    byte string through base-58. Leading zero bytes survive as leading
    '1' characters.
*/

use thiserror::Error;

use crate::{encoding::version_prefix::VersionPrefix, hash};

const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base58Error {
    #[error("character '{0}' is not in the base58 alphabet")]
    BadChar(char),
    #[error("checksum mismatch")]
    BadChecksum,
}

/// A version prefix and payload about to be base58 encoded.
#[derive(Debug)]
pub struct Base58 {
    prefix: Option<VersionPrefix>,
    payload: Vec<u8>,
}

impl Base58 {
    pub fn new(prefix: Option<VersionPrefix>, payload: &[u8]) -> Base58 {
        Base58 {
            prefix,
            payload: payload.to_vec(),
        }
    }

    /// Check encode data by appending the sha256d checksum and then encoding it.
    pub fn check_encode(self) -> String {
        let mut bytes: Vec<u8> = match self.prefix {
            Some(x) => x.to_bytes(),
            None => Vec::new(),
        };
        bytes.extend_from_slice(&self.payload);
        let checksum = hash::sha256d(&bytes);
        bytes.extend_from_slice(&checksum[0..4]);

        //Prefix and checksum are already part of the payload here
        Self::new(None, &bytes).encode()
    }

    /// Encode data in plain base58 (no checksum).
    pub fn encode(self) -> String {
        let mut data: Vec<u8> = match self.prefix {
            Some(x) => x.to_bytes(),
            None => Vec::new(),
        };
        data.extend_from_slice(&self.payload);

        let zeroes = data.iter().take_while(|&&byte| byte == 0).count();

        //Digits of the base58 representation, least significant first
        let mut digits: Vec<u8> = Vec::new();
        for &byte in &data[zeroes..] {
            let mut carry = byte as u32;
            for digit in digits.iter_mut() {
                carry += (*digit as u32) << 8;
                *digit = (carry % 58) as u8;
                carry /= 58;
            }
            while carry > 0 {
                digits.push((carry % 58) as u8);
                carry /= 58;
            }
        }

        let mut encoded = String::with_capacity(zeroes + digits.len());
        for _ in 0..zeroes {
            encoded.push('1');
        }
        encoded.extend(
            digits
                .iter()
                .rev()
                .map(|&d| BASE58_ALPHABET[d as usize] as char),
        );
        encoded
    }

    /// Decodes a base58 string into a byte vector.
    /// DOES NOT remove the checksum or version prefix if present.
    pub fn decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
        let zeroes = encoded.chars().take_while(|&c| c == '1').count();

        //Bytes of the base256 representation, least significant first
        let mut bytes: Vec<u8> = Vec::new();
        for c in encoded.chars() {
            let value = BASE58_ALPHABET
                .iter()
                .position(|&a| a as char == c)
                .ok_or(Base58Error::BadChar(c))? as u32;

            let mut carry = value;
            for byte in bytes.iter_mut() {
                carry += 58 * (*byte as u32);
                *byte = (carry & 0xFF) as u8;
                carry >>= 8;
            }
            while carry > 0 {
                bytes.push((carry & 0xFF) as u8);
                carry >>= 8;
            }
        }

        let mut result: Vec<u8> = vec![0x00; zeroes];
        result.extend(bytes.iter().rev());
        Ok(result)
    }

    /// Checks if a base58 check encoded string carries a valid checksum.
    pub fn validate_checksum(encoded: &str) -> Result<bool, Base58Error> {
        let bytes = Base58::decode(encoded)?;
        if bytes.len() < 4 {
            return Ok(false);
        }

        let (data, checksum) = bytes.split_at(bytes.len() - 4);
        Ok(hash::sha256d(data)[0..4] == *checksum)
    }

    /// Returns the decoded payload with the checksum verified and removed.
    /// The version prefix is NOT removed as its length depends on context.
    pub fn check_decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
        if !Self::validate_checksum(encoded)? {
            return Err(Base58Error::BadChecksum);
        }

        let bytes = Base58::decode(encoded)?;
        Ok(bytes[..bytes.len() - 4].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Plain encoding vectors sourced from https://tools.ietf.org/id/draft-msporny-base58-01.html
    fn base58_ietf_test_vectors() {
        assert_eq!(Base58::new(None, b"Hello World!").encode(), "2NEpo7TZRRrLZSi2U");
        assert_eq!(
            Base58::new(None, b"The quick brown fox jumps over the lazy dog.").encode(),
            "USm3fpXnKG5EUBx2ndxBDMPVciP5hGey2Jh4NDv6gmeo1LkMeiKrLJUUBk6Z"
        );
        assert_eq!(
            Base58::new(None, &[0x00, 0x00, 0x28, 0x7f, 0xb4, 0xcd]).encode(),
            "11233QC4"
        );
    }

    #[test]
    /// Plain encoding vectors sourced from the Bitcoin Core repository
    /// (src/test/data/base58_encode_decode.json)
    fn base58_bitcoin_core_test_vectors() {
        let test_data: [(&str, &str); 10] = [
            ("", ""),
            ("61", "2g"),
            ("626262", "a3gV"),
            ("636363", "aPEr"),
            ("73696d706c792061206c6f6e6720737472696e67", "2cFupjhnEsSn59qHXstmK2ffpLv2"),
            ("00eb15231dfceb60925886b67d065299925915aeb172c06647", "1NS17iag9jJgTHD1VXjvLCEnZuQ3rJDE9L"),
            ("516b6fcd0f", "ABnLTmg"),
            ("bf4f89001e670274dd", "3SEo3LWLoPntC"),
            ("572e4794", "3EFU7m"),
            ("00000000000000000000", "1111111111"),
        ];

        for (hex, expected) in test_data {
            let bytes = hex::decode(hex).unwrap();
            assert_eq!(Base58::new(None, &bytes).encode(), expected);
            assert_eq!(Base58::decode(expected).unwrap(), bytes);
        }
    }

    #[test]
    fn check_encode_round_trip() {
        let payload =
            hex::decode("0b9492c088247d60b4150ed1d10d01c1c1029a1c").unwrap();
        let encoded =
            Base58::new(Some(VersionPrefix::P2ScriptAddress), &payload).check_encode();

        let decoded = Base58::check_decode(&encoded).expect("decode failed");
        assert_eq!(decoded[0], 0x05);
        assert_eq!(decoded[1..], payload);
    }

    #[test]
    fn rejects_bad_characters() {
        //'0', 'O', 'I' and 'l' are excluded from the alphabet
        assert_eq!(Base58::decode("11O1"), Err(Base58Error::BadChar('O')));
        assert_eq!(
            Base58::check_decode("3GMC0odvfc"),
            Err(Base58Error::BadChar('0'))
        );
    }

    #[test]
    fn rejects_bad_checksum() {
        let payload = [0xAB; 20];
        let mut encoded = Base58::new(Some(VersionPrefix::P2ScriptAddress), &payload).check_encode();

        //Corrupt the last character
        let last = encoded.pop().unwrap();
        encoded.push(if last == '2' { '3' } else { '2' });

        assert_eq!(Base58::check_decode(&encoded), Err(Base58Error::BadChecksum));
        assert_eq!(Base58::validate_checksum(&encoded), Ok(false));
    }

    #[test]
    fn short_strings_fail_checksum() {
        assert_eq!(Base58::validate_checksum("21"), Ok(false));
        assert_eq!(Base58::check_decode(""), Err(Base58Error::BadChecksum));
    }
}
