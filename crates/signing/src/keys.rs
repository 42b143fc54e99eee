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

use std::fmt;

use crate::error::SigningError;

/// Asymmetric key material for one environment.
///
/// The private key signs outbound requests; the public key is the
/// platform's key and verifies inbound responses. Both are base64 DER
/// strings. Empty strings count as absent.
///
/// `Debug` output never includes key contents.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct KeyMaterial {
	private_key: Option<String>,
	public_key: Option<String>,
}

impl KeyMaterial {
	pub fn new(private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
		Self::default()
			.with_private_key(private_key)
			.with_public_key(public_key)
	}

	pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
		self.private_key = non_empty(private_key.into());
		self
	}

	pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
		self.public_key = non_empty(public_key.into());
		self
	}

	pub fn private_key(&self) -> Result<&str, SigningError> {
		self.private_key
			.as_deref()
			.ok_or_else(|| SigningError::Configuration("Missing private key".to_string()))
	}

	pub fn public_key(&self) -> Result<&str, SigningError> {
		self.public_key
			.as_deref()
			.ok_or_else(|| SigningError::Configuration("Missing public key".to_string()))
	}

	pub fn has_private_key(&self) -> bool {
		self.private_key.is_some()
	}

	pub fn has_public_key(&self) -> bool {
		self.public_key.is_some()
	}
}

fn non_empty(key: String) -> Option<String> {
	let key = key.trim();
	(!key.is_empty()).then(|| key.to_string())
}

impl fmt::Debug for KeyMaterial {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
		f.debug_struct("KeyMaterial")
			.field("private_key", &redact(&self.private_key))
			.field("public_key", &redact(&self.public_key))
			.finish()
	}
}
