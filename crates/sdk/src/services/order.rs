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

/// Transaction interfaces
///
/// Amounts in payloads are in cents.
pub struct OrderService<'a> {
	client: &'a Client,
}

impl<'a> OrderService<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self { client }
	}

	pub async fn create_consumption_order<T: Serialize + ?Sized>(
		&self,
		order: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::CreateConsumptionOrder, order).await
	}

	/// Funds are held by the platform until the order is confirmed.
	pub async fn create_guaranteed_order<T: Serialize + ?Sized>(
		&self,
		order: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::CreateGuaranteedOrder, order).await
	}

	pub async fn create_transfer_order<T: Serialize + ?Sized>(
		&self,
		transfer: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::CreateTransferOrder, transfer).await
	}

	pub async fn create_withdraw_order<T: Serialize + ?Sized>(
		&self,
		withdraw: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::CreateWithdrawOrder, withdraw).await
	}

	pub async fn create_recharge_order<T: Serialize + ?Sized>(
		&self,
		recharge: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::CreateRechargeOrder, recharge).await
	}

	pub async fn create_refund_order<T: Serialize + ?Sized>(
		&self,
		refund: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::CreateRefundOrder, refund).await
	}

	/// Close an unpaid order.
	pub async fn close_order(&self, order_id: &str, reason: &str) -> Result<ApiResponse, ClientError> {
		self.client
			.call(TransCode::CloseOrder, &json!({ "orderId": order_id, "reason": reason }))
			.await
	}

	/// Confirm a payment with the SMS code sent to the payer.
	pub async fn confirm_payment<T: Serialize + ?Sized>(
		&self,
		confirm: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::ConfirmPayment, confirm).await
	}

	pub async fn consume_stored_value_card<T: Serialize + ?Sized>(
		&self,
		consume: &T,
	) -> Result<ApiResponse, ClientError> {
		self.client.call(TransCode::ConsumeStoredValueCard, consume).await
	}
}
