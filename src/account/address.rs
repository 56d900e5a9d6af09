//! Account addresses for the ledger
//!
//! An address is an opaque 20-byte identifier derived by hashing seed
//! material (RIPEMD160 of SHA256, truncating key material to the account
//! width). Addresses render as `0x`-prefixed lowercase hex and serialize
//! as that string so they can key JSON maps directly.

use rand::rngs::OsRng;
use rand::RngCore;
use ripemd::Ripemd160;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width of an account address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Errors that can occur when parsing an address string
#[derive(Error, Debug)]
pub enum AddressParseError {
    #[error("Address must start with 0x")]
    MissingPrefix,
    #[error("Address contains invalid hex")]
    InvalidHex,
    #[error("Address must be 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// An account identity on the ledger
///
/// Two addresses compare equal only if they are bit-identical. The all-zero
/// address is the reserved null identity and can never hold tokens.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The reserved null identity.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Create an address from raw bytes
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }

    /// Derive an address from arbitrary seed material
    ///
    /// Uses RIPEMD160(SHA256(seed)), which yields exactly the account width.
    pub fn derive(seed: &[u8]) -> Self {
        let sha256_hash = {
            let mut hasher = Sha256::new();
            hasher.update(seed);
            hasher.finalize()
        };

        let mut ripemd = Ripemd160::new();
        ripemd.update(sha256_hash);
        let ripemd_hash = ripemd.finalize();

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&ripemd_hash);
        Address(bytes)
    }

    /// Generate a fresh random address
    pub fn random() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        Self::derive(&seed)
    }

    /// Whether this is the reserved null identity
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Raw address bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AddressParseError::MissingPrefix)?;

        let bytes = hex::decode(hex_part).map_err(|_| AddressParseError::InvalidHex)?;
        if bytes.len() != ADDRESS_LEN {
            return Err(AddressParseError::InvalidLength(bytes.len()));
        }

        let mut buf = [0u8; ADDRESS_LEN];
        buf.copy_from_slice(&bytes);
        Ok(Address(buf))
    }
}

// Serialized as the display string so addresses can key JSON maps.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic() {
        let a = Address::derive(b"alice");
        let b = Address::derive(b"alice");
        let c = Address::derive(b"bob");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_zero());
    }

    #[test]
    fn test_display_round_trip() {
        let address = Address::derive(b"alice");
        let rendered = address.to_string();

        assert!(rendered.starts_with("0x"));
        assert_eq!(rendered.len(), 2 + ADDRESS_LEN * 2);

        let parsed: Address = rendered.parse().unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "deadbeef".parse::<Address>(),
            Err(AddressParseError::MissingPrefix)
        ));
        assert!(matches!(
            "0xzz".parse::<Address>(),
            Err(AddressParseError::InvalidHex)
        ));
        assert!(matches!(
            "0xdeadbeef".parse::<Address>(),
            Err(AddressParseError::InvalidLength(4))
        ));
    }

    #[test]
    fn test_zero_address() {
        let zero: Address = "0x0000000000000000000000000000000000000000".parse().unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, Address::ZERO);
    }

    #[test]
    fn test_random_addresses_differ() {
        assert_ne!(Address::random(), Address::random());
    }

    #[test]
    fn test_serde_as_string() {
        let address = Address::derive(b"alice");
        let json = serde_json::to_string(&address).unwrap();

        assert_eq!(json, format!("\"{}\"", address));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
