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

//! Signer facade
//!
//! Binds one [`SignAlgorithm`] to one environment's [`KeyMaterial`] and
//! exposes the two protocol operations: signing an outbound field mapping
//! and verifying an inbound one.

use crate::algorithm::{SignAlgorithm, SignatureStrategy};
use crate::canonical::canonicalize;
use crate::error::SigningError;
use crate::fields::{Fields, SIGN_FIELD};
use crate::keys::KeyMaterial;

/// Stateless signer for one environment.
///
/// Holds only immutable configuration, so it can be cloned freely and shared
/// across threads. Calls never perform I/O.
#[derive(Debug, Clone)]
pub struct Signer {
	algorithm: SignAlgorithm,
	keys: KeyMaterial,
}

impl Signer {
	/// Create a signer, failing fast on unusable key material.
	///
	/// The private key is required. The public key is optional; without it
	/// response verification returns a configuration error.
	pub fn new(algorithm: SignAlgorithm, keys: KeyMaterial) -> Result<Self, SigningError> {
		let strategy = algorithm.strategy();
		strategy.validate_private_key(keys.private_key()?)?;
		if keys.has_public_key() {
			strategy.validate_public_key(keys.public_key()?)?;
		}

		Ok(Self { algorithm, keys })
	}

	pub fn algorithm(&self) -> SignAlgorithm {
		self.algorithm
	}

	fn strategy(&self) -> &'static dyn SignatureStrategy {
		self.algorithm.strategy()
	}

	/// Compute the signature of `fields` (any `sign` entry is ignored).
	pub fn generate_sign(&self, fields: &Fields) -> Result<String, SigningError> {
		let canonical = canonicalize(fields);
		self.strategy().sign(&canonical, self.keys.private_key()?)
	}

	/// Compute the signature and store it under the `sign` key.
	pub fn sign_fields(&self, fields: &mut Fields) -> Result<(), SigningError> {
		let signature = self.generate_sign(fields)?;
		fields.insert(SIGN_FIELD, signature);
		Ok(())
	}

	/// Check `signature` against the canonical form of `fields`.
	pub fn verify_sign(&self, fields: &Fields, signature: &str) -> Result<bool, SigningError> {
		let canonical = canonicalize(fields);
		self.strategy()
			.verify(&canonical, signature, self.keys.public_key()?)
	}

	/// Verify a response envelope against its own `sign` field.
	///
	/// Fails closed: a missing, empty or non-string `sign` yields `Ok(false)`.
	pub fn verify_response_sign(&self, fields: &Fields) -> Result<bool, SigningError> {
		let Some(signature) = fields.get_str(SIGN_FIELD).filter(|s| !s.is_empty()) else {
			return Ok(false);
		};
		self.verify_sign(fields, signature)
	}
}
