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

/// Member onboarding and account binding
pub struct MemberService<'a> {
	client: &'a Client,
}

impl<'a> MemberService<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self { client }
	}

	/// Member1010
	pub async fn create_enterprise_member<T: Serialize + ?Sized>(
		&self,
		member: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::CreateEnterpriseMember, member).await
	}

	/// Member1020, answered by an SMS code confirmed through Member1021
	pub async fn create_personal_member_apply<T: Serialize + ?Sized>(
		&self,
		member: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::CreatePersonalMemberApply, member).await
	}

	/// Member1021
	pub async fn create_personal_member_confirm<T: Serialize + ?Sized>(
		&self,
		confirm: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::CreatePersonalMemberConfirm, confirm).await
	}

	/// Member1030
	pub async fn query_member_info(&self, biz_user_id: &str) -> Result<ApiResponse, ClientError> {
		self.client
			.call(TransCode::QueryMemberInfo, &json!({ "bizUserId": biz_user_id }))
			.await
	}

	/// Member1026
	pub async fn bind_phone_apply<T: Serialize + ?Sized>(
		&self,
		bind: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::BindPhoneApply, bind).await
	}

	/// Member1027
	pub async fn confirm_bind_phone<T: Serialize + ?Sized>(
		&self,
		confirm: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::ConfirmBindPhone, confirm).await
	}

	/// Member1029
	pub async fn sign_agreement_apply<T: Serialize + ?Sized>(
		&self,
		agreement: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::SignAgreementApply, agreement).await
	}
}
