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

//! Yunshangtong request signing
//!
//! This crate implements the canonical signing protocol shared by the SDK
//! and the payment platform:
//!
//! - [`canonicalize`]: deterministic `key=value&...` serialization of a
//!   field mapping
//! - [`SignAlgorithm`]: `SM3withSM2` or `RSA`, each backed by a
//!   [`SignatureStrategy`]
//! - [`Signer`]: signs outbound envelopes and verifies inbound ones
//!
//! Nothing here performs I/O, logs, or caches key material.

pub mod algorithm;
pub mod canonical;
pub mod error;
pub mod fields;
pub mod keys;
pub mod signer;

pub use algorithm::{DEFAULT_DIST_ID, RsaStrategy, SignAlgorithm, SignatureStrategy, Sm2Strategy};
pub use canonical::canonicalize;
pub use error::SigningError;
pub use fields::{Fields, SIGN_FIELD};
pub use keys::KeyMaterial;
pub use signer::Signer;
