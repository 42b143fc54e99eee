// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Signature algorithms
//!
//! The platform accepts exactly two algorithms, selected once per
//! environment by the `signType` setting:
//!
//! - `SM3withSM2`: SM2 digital signature over an SM3 digest
//! - `RSA`: SHA-256 with PKCS#1 v1.5 padding
//!
//! Each algorithm is a [`SignatureStrategy`]. Key material is handed in as
//! base64 DER strings and parsed per call; strategies keep no state.

mod asn1;
mod rsa;
mod sm2;

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SigningError;

pub use self::rsa::RsaStrategy;
pub use self::sm2::{DEFAULT_DIST_ID, Sm2Strategy};

/// Sign/verify primitive over a canonical string.
pub trait SignatureStrategy: Send + Sync {
	/// Sign `canonical` and return the base64-encoded signature.
	fn sign(&self, canonical: &str, private_key: &str) -> Result<String, SigningError>;

	/// Check `signature` against `canonical`.
	///
	/// Returns `Ok(false)` for a malformed or mismatching signature and an
	/// error only when the public key itself cannot be used.
	fn verify(&self, canonical: &str, signature: &str, public_key: &str)
	-> Result<bool, SigningError>;

	/// Parse a private key without using it.
	fn validate_private_key(&self, private_key: &str) -> Result<(), SigningError>;

	/// Parse a public key without using it.
	fn validate_public_key(&self, public_key: &str) -> Result<(), SigningError>;
}

/// Signature algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignAlgorithm {
	#[default]
	Sm3WithSm2,
	Rsa,
}

impl SignAlgorithm {
	/// Identifier used in the `signType` envelope field.
	pub const fn as_str(&self) -> &'static str {
		match self {
			SignAlgorithm::Sm3WithSm2 => "SM3withSM2",
			SignAlgorithm::Rsa => "RSA",
		}
	}

	pub fn strategy(&self) -> &'static dyn SignatureStrategy {
		match self {
			SignAlgorithm::Sm3WithSm2 => &Sm2Strategy,
			SignAlgorithm::Rsa => &RsaStrategy,
		}
	}
}

impl fmt::Display for SignAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SignAlgorithm {
	type Err = SigningError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"SM3withSM2" => Ok(SignAlgorithm::Sm3WithSm2),
			"RSA" => Ok(SignAlgorithm::Rsa),
			other => Err(SigningError::Configuration(format!(
				"Unsupported sign type: {}",
				other
			))),
		}
	}
}

impl Serialize for SignAlgorithm {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for SignAlgorithm {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}

/// Decode a base64 DER key, tolerating PEM armour and line breaks.
pub(crate) fn decode_key_der(key: &str) -> Result<Vec<u8>, SigningError> {
	let body: String = key
		.lines()
		.filter(|line| !line.trim_start().starts_with("-----"))
		.flat_map(str::chars)
		.filter(|c| !c.is_whitespace())
		.collect();

	if body.is_empty() {
		return Err(SigningError::KeyFormat("Key is empty".to_string()));
	}

	STANDARD
		.decode(body)
		.map_err(|e| SigningError::KeyFormat(format!("Invalid base64: {}", e)))
}

pub(crate) fn encode_signature(bytes: &[u8]) -> String {
	STANDARD.encode(bytes)
}

/// Decode a base64 signature. Malformed input is a verification failure, not an error.
pub(crate) fn decode_signature(signature: &str) -> Option<Vec<u8>> {
	STANDARD.decode(signature.trim()).ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_identifiers() {
		assert_eq!("SM3withSM2".parse::<SignAlgorithm>().unwrap(), SignAlgorithm::Sm3WithSm2);
		assert_eq!("RSA".parse::<SignAlgorithm>().unwrap(), SignAlgorithm::Rsa);
	}

	#[test]
	fn test_unknown_identifier_is_configuration_error() {
		for bad in ["sm2", "rsa", "HMAC", ""] {
			assert!(matches!(
				bad.parse::<SignAlgorithm>(),
				Err(SigningError::Configuration(_))
			));
		}
	}

	#[test]
	fn test_serde_uses_wire_identifiers() {
		let json = serde_json::to_string(&SignAlgorithm::Sm3WithSm2).unwrap();
		assert_eq!(json, "\"SM3withSM2\"");

		let parsed: SignAlgorithm = serde_json::from_str("\"RSA\"").unwrap();
		assert_eq!(parsed, SignAlgorithm::Rsa);
		assert!(serde_json::from_str::<SignAlgorithm>("\"DSA\"").is_err());
	}

	#[test]
	fn test_decode_key_strips_pem_armour() {
		let pem = "-----BEGIN PUBLIC KEY-----\nAAEC\nAwQ=\n-----END PUBLIC KEY-----\n";
		assert_eq!(decode_key_der(pem).unwrap(), vec![0, 1, 2, 3, 4]);
	}

	#[test]
	fn test_decode_key_rejects_garbage() {
		assert!(matches!(decode_key_der("   "), Err(SigningError::KeyFormat(_))));
		assert!(matches!(decode_key_der("not base64!"), Err(SigningError::KeyFormat(_))));
	}
}
