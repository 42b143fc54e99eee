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

//! Client configuration
//!
//! A [`ClientConfig`] is an immutable value describing one environment:
//! where to send requests, which application is calling, and which keys and
//! algorithm sign the traffic. Switching environment produces a new value
//! via [`ClientConfig::with_environment`]; nothing is mutated in place.
//!
//! # Loading
//!
//! - [`ClientConfig::new`]: explicit values plus environment presets
//! - [`ClientConfig::from_env`]: `YST_*` environment variables (a `.env`
//!   file is honoured)
//! - [`ClientConfig::from_file`]: a config file, overlaid by `YST_*` variables
//!
//! Recognised keys: `environment`, `base_url`, `app_id`, `sp_app_id`,
//! `sign_type`, `private_key`, `public_key`, `version`, `timeout_secs`,
//! `verify_response_sign`.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use yst_signing::{KeyMaterial, SignAlgorithm, Signer};

use crate::error::ClientError;
use crate::interface::Endpoint;

// Logging configuration constants
/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory component name
pub const LOG_COMPONENT_NAME: &str = "yst-sdk";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = false;

// Protocol constants
/// Prefix of the environment variables read by [`ClientConfig::from_env`]
pub const ENV_PREFIX: &str = "YST";

/// Only JSON bodies are supported by the platform
pub const DEFAULT_FORMAT: &str = "json";

pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Interface version sent in every envelope
pub const DEFAULT_VERSION: &str = "1.0";

/// Default HTTP timeout in seconds (can be overridden by YST_TIMEOUT_SECS)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const TEST_BASE_URL: &str = "https://ibstest.allinpay.com/yst/yst-service-api";
pub const PRODUCTION_BASE_URL: &str = "https://ibsapi.allinpay.com/yst-service-api";

/// Platform SM2 public key of the test environment
pub const TEST_PLATFORM_PUBLIC_KEY: &str = "MFkwEwYHKoZIzj0CAQYIKoEcz1UBgi0DQgAEu9LNkJlyLtjJxtQWIGlcZ/hyHt5eZ7LEH1nfOiK1H9HsE1cMPu5KK5jZVTtAyc7lPMXixUMirf6A3tMbuMbgqg==";

/// Platform SM2 public key of the production environment
pub const PRODUCTION_PLATFORM_PUBLIC_KEY: &str = "MFkwEwYHKoZIzj0CAQYIKoEcz1UBgi0DQgAE/VKHBem28IXD30yuZN1QcNgGE4gzqgd/eX1ZEouUleLNfrnQJkOs7LzAag3q10uaH/e9+5JyJDx3ULfKS4QZPw==";

/// Deployment environment of the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	#[default]
	Test,
	Production,
}

impl Environment {
	pub const fn as_str(&self) -> &'static str {
		match self {
			Environment::Test => "test",
			Environment::Production => "production",
		}
	}

	pub const fn default_base_url(&self) -> &'static str {
		match self {
			Environment::Test => TEST_BASE_URL,
			Environment::Production => PRODUCTION_BASE_URL,
		}
	}

	/// Preset platform key. Only valid for `SM3withSM2` deployments.
	pub const fn platform_public_key(&self) -> &'static str {
		match self {
			Environment::Test => TEST_PLATFORM_PUBLIC_KEY,
			Environment::Production => PRODUCTION_PLATFORM_PUBLIC_KEY,
		}
	}
}

impl fmt::Display for Environment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Environment {
	type Err = ClientError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"test" => Ok(Environment::Test),
			"production" => Ok(Environment::Production),
			other => Err(ClientError::Configuration(format!(
				"Invalid environment: {}",
				other
			))),
		}
	}
}

/// Client configuration for one environment
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
	pub environment: Environment,
	pub base_url: String,
	/// Application ID assigned by the platform
	pub app_id: String,
	/// Service-provider application ID, sent only when set
	pub sp_app_id: Option<String>,
	pub sign_type: SignAlgorithm,
	/// Merchant private key (base64 DER). Never logged.
	pub private_key: String,
	/// Platform public key (base64 DER) used for response verification
	pub public_key: String,
	pub format: String,
	pub charset: String,
	pub version: String,
	pub timeout: Duration,
	/// Verify the `sign` field of every response
	pub verify_response_sign: bool,
}

impl ClientConfig {
	/// Create a configuration using the presets of `environment`.
	pub fn new(
		environment: Environment,
		app_id: impl Into<String>,
		private_key: impl Into<String>,
	) -> Self {
		Self {
			environment,
			base_url: environment.default_base_url().to_string(),
			app_id: app_id.into(),
			sp_app_id: None,
			sign_type: SignAlgorithm::default(),
			private_key: private_key.into(),
			public_key: environment.platform_public_key().to_string(),
			format: DEFAULT_FORMAT.to_string(),
			charset: DEFAULT_CHARSET.to_string(),
			version: DEFAULT_VERSION.to_string(),
			timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
			verify_response_sign: true,
		}
	}

	/// Load configuration from `YST_*` environment variables
	pub fn from_env() -> Result<Self, ClientError> {
		dotenv::dotenv().ok();

		let cfg = config::Config::builder()
			.add_source(config::Environment::with_prefix(ENV_PREFIX))
			.build()
			.map_err(config_error)?;

		Self::from_source(cfg)
	}

	/// Load configuration from file, overlaid by `YST_*` environment variables
	pub fn from_file(path: &str) -> Result<Self, ClientError> {
		let cfg = config::Config::builder()
			.add_source(config::File::with_name(path))
			.add_source(config::Environment::with_prefix(ENV_PREFIX))
			.build()
			.map_err(config_error)?;

		Self::from_source(cfg)
	}

	fn from_source(cfg: config::Config) -> Result<Self, ClientError> {
		let raw: RawConfig = cfg.try_deserialize().map_err(config_error)?;
		raw.into_config()
	}

	/// Same credentials against another environment.
	///
	/// The base URL is replaced with the preset of `environment`. The platform
	/// public key follows the preset only for `SM3withSM2` configurations still
	/// using the current environment's preset key; an explicitly configured key
	/// (and every RSA key) is kept. The application credentials are kept too,
	/// so they must be valid in the target environment.
	pub fn with_environment(&self, environment: Environment) -> Self {
		let uses_preset_key = self.sign_type == SignAlgorithm::Sm3WithSm2
			&& self.public_key == self.environment.platform_public_key();
		let public_key = if uses_preset_key {
			environment.platform_public_key().to_string()
		} else {
			self.public_key.clone()
		};

		Self {
			environment,
			base_url: environment.default_base_url().to_string(),
			public_key,
			..self.clone()
		}
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	pub fn with_sp_app_id(mut self, sp_app_id: impl Into<String>) -> Self {
		self.sp_app_id = Some(sp_app_id.into()).filter(|id| !id.is_empty());
		self
	}

	pub fn with_sign_type(mut self, sign_type: SignAlgorithm) -> Self {
		self.sign_type = sign_type;
		self
	}

	pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
		self.public_key = public_key.into();
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_verify_response_sign(mut self, verify: bool) -> Self {
		self.verify_response_sign = verify;
		self
	}

	/// Full URL of an endpoint in this environment
	pub fn url_for(&self, endpoint: Endpoint) -> String {
		format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
	}

	pub fn key_material(&self) -> KeyMaterial {
		KeyMaterial::new(self.private_key.as_str(), self.public_key.as_str())
	}

	/// Check the values that cannot be caught by key parsing.
	pub fn validate(&self) -> Result<(), ClientError> {
		if self.app_id.trim().is_empty() {
			return Err(ClientError::Configuration("Missing app_id".to_string()));
		}
		if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
			return Err(ClientError::Configuration(format!(
				"Invalid base_url: {}",
				self.base_url
			)));
		}
		if self.verify_response_sign && self.public_key.trim().is_empty() {
			return Err(ClientError::Configuration(
				"Response verification enabled without a platform public key".to_string(),
			));
		}
		Ok(())
	}

	/// Build the signer for this environment, failing fast on bad keys.
	pub fn signer(&self) -> Result<Signer, ClientError> {
		Ok(Signer::new(self.sign_type, self.key_material())?)
	}

	pub fn is_test(&self) -> bool {
		self.environment == Environment::Test
	}

	pub fn is_production(&self) -> bool {
		self.environment == Environment::Production
	}
}

impl fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientConfig")
			.field("environment", &self.environment)
			.field("base_url", &self.base_url)
			.field("app_id", &self.app_id)
			.field("sp_app_id", &self.sp_app_id)
			.field("sign_type", &self.sign_type)
			.field("private_key", &"<redacted>")
			.field("format", &self.format)
			.field("charset", &self.charset)
			.field("version", &self.version)
			.field("timeout", &self.timeout)
			.field("verify_response_sign", &self.verify_response_sign)
			.finish()
	}
}

/// Shape of a config file / environment; everything but credentials is optional.
#[derive(Debug, Deserialize)]
struct RawConfig {
	environment: Option<String>,
	base_url: Option<String>,
	app_id: String,
	sp_app_id: Option<String>,
	sign_type: Option<String>,
	private_key: String,
	public_key: Option<String>,
	version: Option<String>,
	timeout_secs: Option<u64>,
	verify_response_sign: Option<bool>,
}

impl RawConfig {
	fn into_config(self) -> Result<ClientConfig, ClientError> {
		let environment = match self.environment.as_deref() {
			Some(env) => env.parse()?,
			None => Environment::default(),
		};

		let mut config = ClientConfig::new(environment, self.app_id, self.private_key);
		if let Some(sign_type) = self.sign_type {
			config.sign_type = sign_type
				.parse()
				.map_err(|e: yst_signing::SigningError| ClientError::Configuration(e.to_string()))?;
		}
		if let Some(base_url) = self.base_url {
			config.base_url = base_url;
		}
		if let Some(sp_app_id) = self.sp_app_id {
			config = config.with_sp_app_id(sp_app_id);
		}
		if let Some(public_key) = self.public_key {
			config.public_key = public_key;
		}
		if let Some(version) = self.version {
			config.version = version;
		}
		if let Some(secs) = self.timeout_secs {
			config.timeout = Duration::from_secs(secs);
		}
		if let Some(verify) = self.verify_response_sign {
			config.verify_response_sign = verify;
		}

		config.validate()?;
		Ok(config)
	}
}

fn config_error(e: config::ConfigError) -> ClientError {
	ClientError::Configuration(e.to_string())
}
