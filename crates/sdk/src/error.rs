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

use thiserror::Error;
use yst_signing::SigningError;

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Serialization error: {0}")]
	Serialization(String),
	#[error("Server error: {0}")]
	Server(String),
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
	#[error("Signing error: {0}")]
	Signing(#[from] SigningError),
	#[error("Configuration error: {0}")]
	Configuration(String),
	#[error("Validation failed: {}", .0.join("; "))]
	Validation(Vec<String>),
	#[error("Platform error: {code} - {message}")]
	Platform { code: String, message: String },
	#[error("Business error: {code} - {message}")]
	Business { code: String, message: String },
	#[error("Response signature verification failed")]
	UnverifiedResponse,
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl ClientError {
	/// Configuration and key problems cannot be fixed by retrying.
	pub fn is_configuration(&self) -> bool {
		matches!(
			self,
			ClientError::Configuration(_)
				| ClientError::Signing(SigningError::Configuration(_))
				| ClientError::Signing(SigningError::KeyFormat(_))
		)
	}
}
