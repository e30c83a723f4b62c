//! Address handling for Substrate (SS58) and EVM-compatible chains.
//!
//! Recipient validation and the sender/recipient type-match rules only
//! need classification and checksum verification, so this module works
//! on encoded address strings and raw public keys. Key derivation lives
//! in the keyring service.

use blake2::{Blake2b512, Digest};
use serde::{Deserialize, Serialize};
use sha3::Keccak256;

/// The "no network" SS58 prefix, used when a chain does not register
/// its own.
pub const SS58_GENERIC_PREFIX: u16 = 42;

const SS58_CHECKSUM_PREIMAGE: &[u8] = b"SS58PRE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressKind {
    Substrate,
    Evm,
}

impl core::fmt::Display for AddressKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Substrate => "Substrate",
            Self::Evm => "EVM",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("not valid base58")]
    BadBase58,
    #[error("unexpected address length")]
    BadLength,
    #[error("checksum mismatch")]
    BadChecksum,
}

/// An EVM address is `0x` followed by exactly 40 hex digits. Mixed-case
/// inputs are accepted without verifying the EIP-55 checksum.
pub fn is_ethereum_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(body) => body.len() == 40 && body.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

pub fn is_substrate_address(address: &str) -> bool {
    ss58_decode(address).is_ok()
}

pub fn address_kind(address: &str) -> Option<AddressKind> {
    if is_ethereum_address(address) {
        Some(AddressKind::Evm)
    } else if is_substrate_address(address) {
        Some(AddressKind::Substrate)
    } else {
        None
    }
}

fn ss58_checksum(payload: &[u8]) -> [u8; 2] {
    let mut hasher = Blake2b512::new();
    hasher.update(SS58_CHECKSUM_PREIMAGE);
    hasher.update(payload);
    let hash = hasher.finalize();
    [hash[0], hash[1]]
}

/// SS58-encode a 32-byte public key under the given network prefix.
pub fn ss58_encode(pubkey: &[u8; 32], prefix: u16) -> String {
    let mut data = Vec::with_capacity(36);

    if prefix < 64 {
        data.push(prefix as u8);
    } else {
        data.push(((prefix & 0x00FC) >> 2) as u8 | 0x40);
        data.push(((prefix >> 8) as u8) | ((prefix & 0x0003) << 6) as u8);
    }

    data.extend_from_slice(pubkey);
    let checksum = ss58_checksum(&data);
    data.extend_from_slice(&checksum);

    bs58::encode(data).into_string()
}

/// Decode an SS58 address, verifying its checksum. Returns the raw
/// public key.
pub fn ss58_decode(address: &str) -> Result<[u8; 32], AddressError> {
    let data = bs58::decode(address)
        .into_vec()
        .map_err(|_| AddressError::BadBase58)?;

    // prefix (1 or 2 bytes) + 32-byte public key + 2-byte checksum
    let prefix_len = match data.len() {
        35 => 1,
        36 => 2,
        _ => return Err(AddressError::BadLength),
    };

    let (payload, checksum) = data.split_at(data.len() - 2);
    if ss58_checksum(payload) != checksum[..] {
        return Err(AddressError::BadChecksum);
    }

    let mut pubkey = [0u8; 32];
    pubkey.copy_from_slice(&payload[prefix_len..]);
    Ok(pubkey)
}

/// Derive the EVM address from an uncompressed secp256k1 public key
/// (64 bytes, without the 0x04 tag): last 20 bytes of its Keccak-256.
pub fn evm_address(uncompressed_pubkey: &[u8]) -> String {
    let hash = Keccak256::digest(uncompressed_pubkey);
    format!("0x{}", hex::encode(&hash[12..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known sr25519 dev account ("Alice"), generic SS58 prefix.
    const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    #[test]
    fn recognizes_ethereum_addresses() {
        assert!(is_ethereum_address(
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
        ));
        assert!(!is_ethereum_address(
            "d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
        ));
        assert!(!is_ethereum_address("0x1234"));
        assert!(!is_ethereum_address(
            "0xzzzz6BF26964aF9D7eEd9e03E53415D37aA96045"
        ));
    }

    #[test]
    fn recognizes_substrate_addresses() {
        assert!(is_substrate_address(ALICE));
        assert_eq!(address_kind(ALICE), Some(AddressKind::Substrate));
    }

    #[test]
    fn rejects_garbage_addresses() {
        assert_eq!(address_kind(""), None);
        assert_eq!(address_kind("not-an-address"), None);
        // Flipping a character breaks the decoded payload.
        let mut corrupted = ALICE.to_owned();
        corrupted.replace_range(12..13, "3");
        assert!(ss58_decode(&corrupted).is_err());
    }

    #[test]
    fn ss58_round_trips() {
        let pubkey = ss58_decode(ALICE).unwrap();
        assert_eq!(ss58_encode(&pubkey, SS58_GENERIC_PREFIX), ALICE);

        let other = [7u8; 32];
        let encoded = ss58_encode(&other, 0);
        assert_eq!(ss58_decode(&encoded).unwrap(), other);
    }

    #[test]
    fn ss58_supports_wide_prefixes() {
        let pubkey = [42u8; 32];
        let encoded = ss58_encode(&pubkey, 2206);
        assert_eq!(ss58_decode(&encoded).unwrap(), pubkey);
    }

    #[test]
    fn evm_address_shape() {
        let addr = evm_address(&[1u8; 64]);
        assert!(addr.starts_with("0x"));
        assert_eq!(addr.len(), 42);
        assert!(is_ethereum_address(&addr));
        assert_eq!(addr, evm_address(&[1u8; 64]));
    }
}
