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

use signature::{Signer, Verifier};
use sm2::dsa::{Signature, SigningKey, VerifyingKey};
use sm2::elliptic_curve::pkcs8::{DecodePrivateKey, DecodePublicKey};
use sm2::{PublicKey, SecretKey};

use super::{SignatureStrategy, asn1, decode_key_der, decode_signature, encode_signature};
use crate::error::SigningError;

/// Distinguishing identifier mixed into the SM3 digest (`Z_A`) when the
/// counterparty does not agree on another one.
pub const DEFAULT_DIST_ID: &str = "1234567812345678";

/// `SM3withSM2` signatures.
///
/// Keys are PKCS#8 (private) and SubjectPublicKeyInfo (public) DER on the
/// SM2 curve. Signatures are emitted as base64 DER; verification also
/// accepts the raw 64-byte `r || s` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sm2Strategy;

impl Sm2Strategy {
	fn signing_key(private_key: &str) -> Result<SigningKey, SigningError> {
		let der = decode_key_der(private_key)?;
		let secret = SecretKey::from_pkcs8_der(&der)
			.map_err(|e| SigningError::KeyFormat(format!("Invalid SM2 private key: {}", e)))?;
		SigningKey::new(DEFAULT_DIST_ID, &secret)
			.map_err(|e| SigningError::KeyFormat(format!("Invalid SM2 private key: {}", e)))
	}

	fn verifying_key(public_key: &str) -> Result<VerifyingKey, SigningError> {
		let der = decode_key_der(public_key)?;
		let public = PublicKey::from_public_key_der(&der)
			.map_err(|e| SigningError::KeyFormat(format!("Invalid SM2 public key: {}", e)))?;
		VerifyingKey::new(DEFAULT_DIST_ID, public)
			.map_err(|e| SigningError::KeyFormat(format!("Invalid SM2 public key: {}", e)))
	}

	fn parse_signature(signature: &str) -> Option<Signature> {
		let bytes = decode_signature(signature)?;
		let raw = match asn1::decode(&bytes) {
			Some(raw) => raw.to_vec(),
			None => bytes,
		};
		Signature::from_slice(&raw).ok()
	}
}

impl SignatureStrategy for Sm2Strategy {
	fn sign(&self, canonical: &str, private_key: &str) -> Result<String, SigningError> {
		let signing_key = Self::signing_key(private_key)?;
		let signature: Signature = signing_key
			.try_sign(canonical.as_bytes())
			.map_err(|e| SigningError::SignatureComputation(format!("SM2 signing failed: {}", e)))?;

		let mut raw = [0u8; 64];
		raw.copy_from_slice(&signature.to_bytes()[..]);
		let der = asn1::encode(&raw).map_err(|e| {
			SigningError::SignatureComputation(format!("SM2 signature encoding failed: {}", e))
		})?;
		Ok(encode_signature(&der))
	}

	fn verify(
		&self,
		canonical: &str,
		signature: &str,
		public_key: &str,
	) -> Result<bool, SigningError> {
		let verifying_key = Self::verifying_key(public_key)?;
		let Some(signature) = Self::parse_signature(signature) else {
			return Ok(false);
		};
		Ok(verifying_key
			.verify(canonical.as_bytes(), &signature)
			.is_ok())
	}

	fn validate_private_key(&self, private_key: &str) -> Result<(), SigningError> {
		Self::signing_key(private_key).map(|_| ())
	}

	fn validate_public_key(&self, public_key: &str) -> Result<(), SigningError> {
		Self::verifying_key(public_key).map(|_| ())
	}
}
