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

//! Request and response envelopes
//!
//! Field names are fixed by the platform protocol and must not be renamed.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use yst_signing::{Fields, SignAlgorithm, Signer};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::interface::TransCode;

/// Code reported by the platform for a successful call
pub const SUCCESS_CODE: &str = "000000";

/// Outbound request envelope
///
/// Every field except `sign` is covered by the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
	pub app_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sp_app_id: Option<String>,
	pub trans_code: String,
	pub format: String,
	pub charset: String,
	pub sign_type: SignAlgorithm,
	/// Request date, `YYYYMMDD`
	pub trans_date: String,
	/// Request time, `HHMMSS`
	pub trans_time: String,
	pub version: String,
	/// Business parameters as a JSON-encoded string
	pub biz_data: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sign: Option<String>,
}

impl RequestEnvelope {
	/// Build an unsigned envelope for `code` at time `now`.
	pub fn new(
		config: &ClientConfig,
		code: TransCode,
		biz_data: impl Into<String>,
		now: NaiveDateTime,
	) -> Self {
		Self {
			app_id: config.app_id.clone(),
			sp_app_id: config.sp_app_id.clone(),
			trans_code: code.as_str().to_string(),
			format: config.format.clone(),
			charset: config.charset.clone(),
			sign_type: config.sign_type,
			trans_date: now.format("%Y%m%d").to_string(),
			trans_time: now.format("%H%M%S").to_string(),
			version: config.version.clone(),
			biz_data: biz_data.into(),
			sign: None,
		}
	}

	/// The envelope as the flat field mapping that goes on the wire.
	pub fn to_fields(&self) -> Result<Fields, ClientError> {
		let value = serde_json::to_value(self)
			.map_err(|e| ClientError::Serialization(format!("Failed to encode envelope: {}", e)))?;
		Fields::from_json(value)
			.ok_or_else(|| ClientError::Serialization("Envelope is not a JSON object".to_string()))
	}

	/// Attach the signature computed by `signer`.
	pub fn sign_with(mut self, signer: &Signer) -> Result<Self, ClientError> {
		let signature = signer.generate_sign(&self.to_fields()?)?;
		self.sign = Some(signature);
		Ok(self)
	}
}

/// Encode business parameters for the `bizData` field.
///
/// Non-ASCII text is kept as-is rather than `\u` escaped.
pub fn encode_biz_data<T: Serialize + ?Sized>(biz: &T) -> Result<String, ClientError> {
	serde_json::to_string(biz)
		.map_err(|e| ClientError::Serialization(format!("Failed to encode bizData: {}", e)))
}

/// Inbound response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
	/// System response code
	#[serde(default)]
	pub code: String,
	/// System response message
	#[serde(default)]
	pub msg: String,
	/// Business response code
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub resp_code: Option<String>,
	/// Business response message
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub resp_msg: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sign: Option<String>,
	/// Outcome of signature verification; `None` when verification is disabled
	#[serde(skip)]
	pub verified: Option<bool>,
}

impl ApiResponse {
	pub fn from_fields(fields: Fields) -> Result<Self, ClientError> {
		serde_json::from_value(fields.into_json())
			.map_err(|e| ClientError::InvalidResponse(format!("Unexpected envelope: {}", e)))
	}

	/// The system-level call succeeded
	pub fn is_success(&self) -> bool {
		self.code == SUCCESS_CODE
	}

	/// Both the system-level and business-level codes report success
	pub fn is_business_success(&self) -> bool {
		self.is_success() && self.resp_code.as_deref() == Some(SUCCESS_CODE)
	}

	/// Human-readable failure description, `None` on business success
	pub fn error_message(&self) -> Option<String> {
		if !self.is_success() {
			return Some(format!("System error: {} - {}", self.code, self.msg));
		}
		if !self.is_business_success() {
			return Some(format!(
				"Business error: {} - {}",
				self.resp_code.as_deref().unwrap_or_default(),
				self.resp_msg.as_deref().unwrap_or_default()
			));
		}
		None
	}

	/// Decode `data` into `T`.
	///
	/// The platform sometimes ships `data` as a JSON-encoded string; both forms
	/// are accepted.
	pub fn data_as<T: DeserializeOwned>(&self) -> Result<Option<T>, ClientError> {
		let decode_err =
			|e: serde_json::Error| ClientError::InvalidResponse(format!("Failed to decode data: {}", e));

		match &self.data {
			None | Some(Value::Null) => Ok(None),
			Some(Value::String(s)) if s.is_empty() => Ok(None),
			Some(Value::String(s)) => serde_json::from_str(s).map(Some).map_err(decode_err),
			Some(value) => serde_json::from_value(value.clone())
				.map(Some)
				.map_err(decode_err),
		}
	}

	/// Convert platform-reported failures into errors.
	///
	/// A missing `respCode` is tolerated; a present one must be `000000`.
	pub fn into_result(self) -> Result<Self, ClientError> {
		if !self.is_success() {
			return Err(ClientError::Platform {
				code: self.code,
				message: self.msg,
			});
		}
		if let Some(code) = &self.resp_code
			&& code != SUCCESS_CODE
		{
			return Err(ClientError::Business {
				code: code.clone(),
				message: self.resp_msg.unwrap_or_default(),
			});
		}
		Ok(self)
	}

	/// Reject responses whose signature did not verify.
	///
	/// Responses received with verification disabled pass through.
	pub fn ensure_verified(self) -> Result<Self, ClientError> {
		match self.verified {
			Some(false) => Err(ClientError::UnverifiedResponse),
			_ => Ok(self),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Environment;
	use chrono::NaiveDate;
	use serde_json::json;

	fn fixed_time() -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2025, 3, 7)
			.unwrap()
			.and_hms_opt(9, 5, 1)
			.unwrap()
	}

	#[test]
	fn test_envelope_wire_names() {
		let config = ClientConfig::new(Environment::Test, "21803774682041868289", "key");
		let envelope = RequestEnvelope::new(
			&config,
			TransCode::QueryOrderStatus,
			r#"{"orderId":"ORDER_1"}"#,
			fixed_time(),
		);
		let fields = envelope.to_fields().unwrap();

		assert_eq!(fields.get_str("appId"), Some("21803774682041868289"));
		assert_eq!(fields.get_str("transCode"), Some("Tq3001"));
		assert_eq!(fields.get_str("format"), Some("json"));
		assert_eq!(fields.get_str("charset"), Some("UTF-8"));
		assert_eq!(fields.get_str("signType"), Some("SM3withSM2"));
		assert_eq!(fields.get_str("transDate"), Some("20250307"));
		assert_eq!(fields.get_str("transTime"), Some("090501"));
		assert_eq!(fields.get_str("version"), Some("1.0"));
		assert_eq!(fields.get_str("bizData"), Some(r#"{"orderId":"ORDER_1"}"#));
		assert!(!fields.contains_key("spAppId"));
		assert!(!fields.contains_key("sign"));
	}

	#[test]
	fn test_sp_app_id_is_sent_when_configured() {
		let config =
			ClientConfig::new(Environment::Test, "app", "key").with_sp_app_id("11879464722018709506");
		let envelope = RequestEnvelope::new(&config, TransCode::QueryPlatformFunds, "{}", fixed_time());
		let fields = envelope.to_fields().unwrap();
		assert_eq!(fields.get_str("spAppId"), Some("11879464722018709506"));
	}

	#[test]
	fn test_biz_data_keeps_unicode() {
		let encoded = encode_biz_data(&json!({"name": "张三"})).unwrap();
		assert_eq!(encoded, r#"{"name":"张三"}"#);
	}

	#[test]
	fn test_response_status_helpers() {
		let ok: ApiResponse = serde_json::from_value(json!({
			"code": "000000", "msg": "success", "respCode": "000000", "respMsg": "ok"
		}))
		.unwrap();
		assert!(ok.is_success());
		assert!(ok.is_business_success());
		assert_eq!(ok.error_message(), None);

		let business: ApiResponse = serde_json::from_value(json!({
			"code": "000000", "msg": "success", "respCode": "E1001", "respMsg": "member exists"
		}))
		.unwrap();
		assert!(business.is_success());
		assert!(!business.is_business_success());
		assert_eq!(
			business.error_message().as_deref(),
			Some("Business error: E1001 - member exists")
		);
		assert!(matches!(
			business.into_result(),
			Err(ClientError::Business { code, .. }) if code == "E1001"
		));

		let system: ApiResponse =
			serde_json::from_value(json!({"code": "999999", "msg": "busy"})).unwrap();
		assert_eq!(system.error_message().as_deref(), Some("System error: 999999 - busy"));
		assert!(matches!(system.into_result(), Err(ClientError::Platform { .. })));
	}

	#[test]
	fn test_missing_resp_code_passes_into_result() {
		let response: ApiResponse =
			serde_json::from_value(json!({"code": "000000", "msg": "success"})).unwrap();
		assert!(response.into_result().is_ok());
	}

	#[test]
	fn test_data_as_accepts_object_and_string() {
		#[derive(Debug, Deserialize, PartialEq)]
		#[serde(rename_all = "camelCase")]
		struct Balance {
			all_amount: i64,
		}

		let object = ApiResponse {
			data: Some(json!({"allAmount": 100})),
			..Default::default()
		};
		assert_eq!(object.data_as::<Balance>().unwrap(), Some(Balance { all_amount: 100 }));

		let string = ApiResponse {
			data: Some(json!(r#"{"allAmount":5}"#)),
			..Default::default()
		};
		assert_eq!(string.data_as::<Balance>().unwrap(), Some(Balance { all_amount: 5 }));

		let empty = ApiResponse::default();
		assert_eq!(empty.data_as::<Balance>().unwrap(), None);
	}

	#[test]
	fn test_ensure_verified() {
		let unverified = ApiResponse {
			verified: Some(false),
			..Default::default()
		};
		assert!(matches!(unverified.ensure_verified(), Err(ClientError::UnverifiedResponse)));

		let unchecked = ApiResponse::default();
		assert!(unchecked.ensure_verified().is_ok());
	}
}
