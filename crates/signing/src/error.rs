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

/// Error types for signing operations
///
/// A signature that does not match is not an error: verification reports it
/// as `Ok(false)`.
#[derive(Debug, Error)]
pub enum SigningError {
	#[error("Configuration error: {0}")]
	Configuration(String),
	#[error("Key format error: {0}")]
	KeyFormat(String),
	#[error("Signature computation error: {0}")]
	SignatureComputation(String),
}
