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

//! Yunshangtong SDK - client library for the payment platform API
//!
//! This crate wraps the platform's signed request protocol:
//! - Every request is an envelope signed over its canonical form
//!   (see [`yst_signing`]) and posted to the endpoint of its transaction code
//! - Responses are parsed into [`ApiResponse`] and their signature is checked
//!   against the platform public key of the active environment
//! - Service facades ([`Client::member`], [`Client::order`], ...) name every
//!   interface the platform offers
//!
//! Configuration is an immutable [`ClientConfig`] value; switching
//! environments produces a new [`Client`].

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod interface;
pub mod logging;
pub mod services;
pub mod validation;

pub use client::{Client, SyncClient};
pub use config::{ClientConfig, Environment};
pub use envelope::{ApiResponse, RequestEnvelope, SUCCESS_CODE};
pub use error::ClientError;
pub use interface::{Endpoint, TransCode};
pub use logging::init_logging;
pub use services::{
	DetailQuery, FileService, FileType, MemberService, MerchantService, OrderService,
	QueryService, UploadItem, UploadOutcome,
};
pub use yst_signing::{Fields, SignAlgorithm, Signer};
