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

/// Merchant-side management
///
/// Merchants are enterprise members, so the lookup and status calls reuse the
/// member interfaces.
pub struct MerchantService<'a> {
	client: &'a Client,
}

impl<'a> MerchantService<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self { client }
	}

	pub async fn bind_cashier_merchant<T: Serialize + ?Sized>(
		&self,
		bind: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::BindCashierMerchant, bind).await
	}

	pub async fn manage_terminal<T: Serialize + ?Sized>(
		&self,
		terminal: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::ManageTerminal, terminal).await
	}

	pub async fn add_corporate_account<T: Serialize + ?Sized>(
		&self,
		account: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::AddCorporateAccount, account).await
	}

	pub async fn update_enterprise_member<T: Serialize + ?Sized>(
		&self,
		update: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::UpdateEnterpriseMember, update).await
	}

	pub async fn query_merchant_info(&self, merchant_id: &str) -> Result<ApiResponse, ClientError> {
		self.client
			.call(TransCode::QueryMemberInfo, &json!({ "bizUserId": merchant_id }))
			.await
	}

	pub async fn update_merchant_status(
		&self,
		merchant_id: &str,
		status: &str,
	) -> Result<ApiResponse, ClientError> {
		self.client
			.call(
				TransCode::UpdateEnterpriseMember,
				&json!({ "bizUserId": merchant_id, "status": status }),
			)
			.await
	}
}
