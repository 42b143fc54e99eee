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

use std::future::Future;
use std::sync::Arc;

use reqwest::Client as ReqwestClient;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use yst_signing::{Fields, Signer};

use crate::config::{ClientConfig, Environment};
use crate::envelope::{ApiResponse, RequestEnvelope, encode_biz_data};
use crate::error::ClientError;
use crate::interface::TransCode;
use crate::services::{
	FileService, FileType, MemberService, MerchantService, OrderService, QueryService,
};

/// Client for the platform API
///
/// Every interface goes through [`Client::call`]: the business payload is
/// wrapped in a signed envelope, posted to the endpoint of its transaction
/// code, and the response envelope is parsed and verified. Cloning is cheap
/// and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Client {
	config: Arc<ClientConfig>,
	signer: Arc<Signer>,
	http: ReqwestClient,
}

impl Client {
	/// Create a client, failing fast on invalid configuration or keys.
	pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
		config.validate()?;
		let signer = config.signer()?;

		let http = ReqwestClient::builder()
			.timeout(config.timeout)
			.build()
			.map_err(|e| ClientError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

		Ok(Self {
			config: Arc::new(config),
			signer: Arc::new(signer),
			http,
		})
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	pub fn signer(&self) -> &Signer {
		&self.signer
	}

	pub fn environment(&self) -> Environment {
		self.config.environment
	}

	/// A new client for another environment; `self` is left untouched.
	pub fn with_environment(&self, environment: Environment) -> Result<Self, ClientError> {
		Self::new(self.config.with_environment(environment))
	}

	/// Build the signed envelope for `code` stamped with the current local time.
	pub fn build_request(
		&self,
		code: TransCode,
		biz_data: impl Into<String>,
	) -> Result<RequestEnvelope, ClientError> {
		let now = chrono::Local::now().naive_local();
		RequestEnvelope::new(&self.config, code, biz_data, now).sign_with(&self.signer)
	}

	/// Invoke a platform interface.
	///
	/// Platform and business failure codes are returned inside the
	/// [`ApiResponse`]; use [`ApiResponse::into_result`] to turn them into errors.
	#[tracing::instrument(skip_all, fields(trans_code = %code))]
	pub async fn call<T: Serialize + ?Sized>(
		&self,
		code: TransCode,
		biz: &T,
	) -> Result<ApiResponse, ClientError> {
		let biz_data = encode_biz_data(biz)?;
		let envelope = self.build_request(code, biz_data)?;
		let url = self.config.url_for(code.endpoint());

		debug!(%url, "Dispatching request");
		let fields = self.send(&url, &envelope).await?;
		self.parse_response(fields)
	}

	async fn send(&self, url: &str, envelope: &RequestEnvelope) -> Result<Fields, ClientError> {
		let response = self
			.http
			.post(url)
			.json(envelope)
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "Request failed");
				ClientError::Network(format!("Request failed: {}", e))
			})?;

		if !response.status().is_success() {
			let status = response.status();
			let error_text = response
				.text()
				.await
				.unwrap_or_else(|_| format!("HTTP {}", status));
			error!(%status, "Platform returned an HTTP error");
			return Err(ClientError::Server(format!("{}: {}", status, error_text)));
		}

		let body: Value = response
			.json()
			.await
			.map_err(|e| ClientError::Serialization(format!("Failed to parse response: {}", e)))?;

		Fields::from_json(body).ok_or_else(|| {
			ClientError::InvalidResponse("Response body is not a JSON object".to_string())
		})
	}

	/// Decode a response envelope, verifying its signature when enabled.
	pub fn parse_response(&self, fields: Fields) -> Result<ApiResponse, ClientError> {
		let verified = if self.config.verify_response_sign {
			let valid = self.signer.verify_response_sign(&fields)?;
			if !valid {
				warn!("Response signature verification failed");
			}
			Some(valid)
		} else {
			None
		};

		let mut response = ApiResponse::from_fields(fields)?;
		response.verified = verified;

		info!(
			code = %response.code,
			resp_code = response.resp_code.as_deref().unwrap_or(""),
			"Received response"
		);
		Ok(response)
	}

	pub fn member(&self) -> MemberService<'_> {
		MemberService::new(self)
	}

	pub fn merchant(&self) -> MerchantService<'_> {
		MerchantService::new(self)
	}

	pub fn order(&self) -> OrderService<'_> {
		OrderService::new(self)
	}

	pub fn query(&self) -> QueryService<'_> {
		QueryService::new(self)
	}

	pub fn file(&self) -> FileService<'_> {
		FileService::new(self)
	}

	pub async fn quick_create_personal_member<T: Serialize + ?Sized>(
		&self,
		member: &T,
	) -> Result<ApiResponse, ClientError> {
		self.member().create_personal_member_apply(member).await
	}

	pub async fn quick_create_enterprise_member<T: Serialize + ?Sized>(
		&self,
		member: &T,
	) -> Result<ApiResponse, ClientError> {
		self.member().create_enterprise_member(member).await
	}

	pub async fn quick_create_consume_order<T: Serialize + ?Sized>(
		&self,
		order: &T,
	) -> Result<ApiResponse, ClientError> {
		self.order().create_consumption_order(order).await
	}

	pub async fn quick_query_order(&self, order_id: &str) -> Result<ApiResponse, ClientError> {
		self.query().query_order_status(order_id).await
	}

	pub async fn quick_query_account_balance(
		&self,
		biz_user_id: &str,
	) -> Result<ApiResponse, ClientError> {
		self.query().query_account_balance(biz_user_id).await
	}

	pub async fn quick_upload_file(
		&self,
		path: impl AsRef<std::path::Path>,
		file_type: FileType,
		biz_user_id: Option<&str>,
	) -> Result<ApiResponse, ClientError> {
		self.file().upload_file(path, file_type, biz_user_id).await
	}
}

/// Synchronous client wrapper
///
/// This wraps the async client and runs it in a tokio runtime.
/// For new code, prefer using the async Client directly.
pub struct SyncClient {
	client: Client,
	runtime: tokio::runtime::Runtime,
}

impl SyncClient {
	/// Create a new synchronous client
	pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
		let runtime = tokio::runtime::Runtime::new()
			.map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))?;
		Ok(Self {
			client: Client::new(config)?,
			runtime,
		})
	}

	/// The wrapped async client
	pub fn client(&self) -> &Client {
		&self.client
	}

	/// Invoke a platform interface (synchronous)
	pub fn call<T: Serialize + ?Sized>(
		&self,
		code: TransCode,
		biz: &T,
	) -> Result<ApiResponse, ClientError> {
		self.runtime.block_on(self.client.call(code, biz))
	}

	/// Run any async client operation to completion, e.g.
	/// `sync.block_on(sync.client().query().query_platform_funds())`.
	pub fn block_on<F: Future>(&self, future: F) -> F::Output {
		self.runtime.block_on(future)
	}
}
