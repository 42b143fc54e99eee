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

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use signature::{SignatureEncoding, Signer, Verifier};

use super::{SignatureStrategy, decode_key_der, decode_signature, encode_signature};
use crate::error::SigningError;

/// RSA PKCS#1 v1.5 signatures with SHA-256 digest.
///
/// Keys are PKCS#8 / SubjectPublicKeyInfo DER; bare PKCS#1 keys are accepted
/// as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaStrategy;

impl RsaStrategy {
	fn signing_key(private_key: &str) -> Result<SigningKey<Sha256>, SigningError> {
		let der = decode_key_der(private_key)?;
		let key = RsaPrivateKey::from_pkcs8_der(&der)
			.or_else(|_| RsaPrivateKey::from_pkcs1_der(&der))
			.map_err(|e| SigningError::KeyFormat(format!("Invalid RSA private key: {}", e)))?;
		Ok(SigningKey::<Sha256>::new(key))
	}

	fn verifying_key(public_key: &str) -> Result<VerifyingKey<Sha256>, SigningError> {
		let der = decode_key_der(public_key)?;
		let key = RsaPublicKey::from_public_key_der(&der)
			.or_else(|_| RsaPublicKey::from_pkcs1_der(&der))
			.map_err(|e| SigningError::KeyFormat(format!("Invalid RSA public key: {}", e)))?;
		Ok(VerifyingKey::<Sha256>::new(key))
	}
}

impl SignatureStrategy for RsaStrategy {
	fn sign(&self, canonical: &str, private_key: &str) -> Result<String, SigningError> {
		let signing_key = Self::signing_key(private_key)?;
		let signature = signing_key
			.try_sign(canonical.as_bytes())
			.map_err(|e| SigningError::SignatureComputation(format!("RSA signing failed: {}", e)))?;
		Ok(encode_signature(&signature.to_vec()))
	}

	fn verify(
		&self,
		canonical: &str,
		signature: &str,
		public_key: &str,
	) -> Result<bool, SigningError> {
		let verifying_key = Self::verifying_key(public_key)?;
		let Some(bytes) = decode_signature(signature) else {
			return Ok(false);
		};
		let Ok(signature) = Signature::try_from(bytes.as_slice()) else {
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
