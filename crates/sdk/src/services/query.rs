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

use serde::Serialize;
use serde_json::json;

use crate::client::Client;
use crate::envelope::ApiResponse;
use crate::error::ClientError;
use crate::interface::TransCode;
use crate::validation::{is_valid_biz_user_id, is_valid_date};

/// Default page size of paged detail queries
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Paged detail query over a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailQuery {
	pub biz_user_id: String,
	/// `YYYYMMDD`
	pub start_date: String,
	/// `YYYYMMDD`
	pub end_date: String,
	pub page: u32,
	pub page_size: u32,
}

impl DetailQuery {
	/// First page with the default page size.
	pub fn new(
		biz_user_id: impl Into<String>,
		start_date: impl Into<String>,
		end_date: impl Into<String>,
	) -> Self {
		Self {
			biz_user_id: biz_user_id.into(),
			start_date: start_date.into(),
			end_date: end_date.into(),
			page: 1,
			page_size: DEFAULT_PAGE_SIZE,
		}
	}

	pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
		self.page = page;
		self.page_size = page_size;
		self
	}

	pub fn validate(&self) -> Result<(), ClientError> {
		let mut errors = Vec::new();
		if !is_valid_biz_user_id(&self.biz_user_id) {
			errors.push(format!("Invalid bizUserId: {}", self.biz_user_id));
		}
		if !is_valid_date(&self.start_date) {
			errors.push(format!("Invalid startDate: {}", self.start_date));
		}
		if !is_valid_date(&self.end_date) {
			errors.push(format!("Invalid endDate: {}", self.end_date));
		}
		if errors.is_empty() && self.start_date > self.end_date {
			errors.push("startDate must not be after endDate".to_string());
		}
		if self.page == 0 || self.page_size == 0 {
			errors.push("page and pageSize must be positive".to_string());
		}

		if errors.is_empty() {
			Ok(())
		} else {
			Err(ClientError::Validation(errors))
		}
	}
}

/// Order, account and file queries
pub struct QueryService<'a> {
	client: &'a Client,
}

impl<'a> QueryService<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self { client }
	}

	pub async fn query_order_status(&self, order_id: &str) -> Result<ApiResponse, ClientError> {
		self.client
			.call(TransCode::QueryOrderStatus, &json!({ "orderId": order_id }))
			.await
	}

	pub async fn query_order_detail(&self, order_id: &str) -> Result<ApiResponse, ClientError> {
		self.client
			.call(TransCode::QueryOrderDetail, &json!({ "orderId": order_id }))
			.await
	}

	pub async fn query_account_balance(&self, biz_user_id: &str) -> Result<ApiResponse, ClientError> {
		self.client
			.call(TransCode::QueryAccountBalance, &json!({ "bizUserId": biz_user_id }))
			.await
	}

	/// Account movements, validated locally before dispatch.
	pub async fn query_account_detail(&self, query: &DetailQuery) -> Result<ApiResponse, ClientError> {
		query.validate()?;
		self.client.call(TransCode::QueryAccountDetail, query).await
	}

	/// Platform-level fund balances; takes no parameters.
	pub async fn query_platform_funds(&self) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::QueryPlatformFunds, &json!({})).await
	}

	pub async fn query_bank_account_detail(
		&self,
		query: &DetailQuery,
	) -> Result<ApiResponse, ClientError> {
		query.validate()?;
		self.client.call(TransCode::QueryBankAccountDetail, query).await
	}

	/// Reconciliation file for `file_date` (`YYYYMMDD`).
	pub async fn download_reconciliation_file(
		&self,
		file_date: &str,
		file_type: &str,
	) -> Result<ApiResponse, ClientError> {
		if !is_valid_date(file_date) {
			return Err(ClientError::Validation(vec![format!(
				"Invalid fileDate: {}",
				file_date
			)]));
		}
		self.client
			.call(
				TransCode::DownloadReconciliationFile,
				&json!({ "fileDate": file_date, "fileType": file_type }),
			)
			.await
	}

	pub async fn download_electronic_receipt(
		&self,
		order_id: &str,
	) -> Result<ApiResponse, ClientError> {
		self.client
			.call(TransCode::DownloadElectronicReceipt, &json!({ "orderId": order_id }))
			.await
	}

	pub async fn get_user_by_auth_code(&self, auth_code: &str) -> Result<ApiResponse, ClientError> {
		self.client
			.call(TransCode::GetUserByAuthCode, &json!({ "authCode": auth_code }))
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_detail_query_defaults_and_wire_names() {
		let query = DetailQuery::new("user_001", "20250101", "20250131");
		assert_eq!(query.page, 1);
		assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);

		let value = serde_json::to_value(&query).unwrap();
		assert_eq!(value["bizUserId"], "user_001");
		assert_eq!(value["startDate"], "20250101");
		assert_eq!(value["pageSize"], 20);
	}

	#[test]
	fn test_detail_query_validation() {
		assert!(DetailQuery::new("user_001", "20250101", "20250131").validate().is_ok());

		let err = DetailQuery::new("user-001", "20250230", "20250131")
			.validate()
			.unwrap_err();
		assert!(matches!(err, ClientError::Validation(ref errors) if errors.len() == 2));

		let reversed = DetailQuery::new("user_001", "20250201", "20250131").validate();
		assert!(reversed.is_err());

		let empty_page = DetailQuery::new("user_001", "20250101", "20250131")
			.with_page(0, 20)
			.validate();
		assert!(empty_page.is_err());
	}
}
