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

//! Interface table
//!
//! Every platform operation is identified by a transaction code and served
//! by one of five endpoints. [`TransCode`] is the single source of truth for
//! both, so the client needs one generic dispatch path instead of one method
//! per interface.

use std::fmt;

/// Platform endpoint, relative to the environment's base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	Transaction,
	Member,
	Query,
	FileUpload,
	FileDownload,
}

impl Endpoint {
	pub const fn path(&self) -> &'static str {
		match self {
			Endpoint::Transaction => "/tx/handle",
			Endpoint::Member => "/tm/handle",
			Endpoint::Query => "/tq/handle",
			Endpoint::FileUpload => "/file/upload",
			Endpoint::FileDownload => "/file/download",
		}
	}
}

macro_rules! trans_codes {
	($($variant:ident => ($code:literal, $endpoint:ident, $desc:literal)),+ $(,)?) => {
		/// Interface code carried in the `transCode` envelope field
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum TransCode {
			$(
				#[doc = $desc]
				$variant,
			)+
		}

		impl TransCode {
			/// Every known interface, in table order
			pub const ALL: &'static [TransCode] = &[$(TransCode::$variant),+];

			pub const fn as_str(&self) -> &'static str {
				match self {
					$(TransCode::$variant => $code,)+
				}
			}

			pub const fn endpoint(&self) -> Endpoint {
				match self {
					$(TransCode::$variant => Endpoint::$endpoint,)+
				}
			}

			pub const fn description(&self) -> &'static str {
				match self {
					$(TransCode::$variant => $desc,)+
				}
			}

			/// Look up an interface by its wire code.
			pub fn from_code(code: &str) -> Option<Self> {
				match code {
					$($code => Some(TransCode::$variant),)+
					_ => None,
				}
			}
		}
	};
}

trans_codes! {
	// Member onboarding
	CreateEnterpriseMember => ("Member1010", Member, "Enterprise member account opening"),
	BindCashierMerchant => ("Member1017", Member, "Bind member to a cashier merchant"),
	ManageTerminal => ("Member1018", Member, "Terminal information management"),
	AddCorporateAccount => ("Member1019", Member, "Bind an additional corporate account"),
	CreatePersonalMemberApply => ("Member1020", Member, "Personal member verification and card binding (apply)"),
	CreatePersonalMemberConfirm => ("Member1021", Member, "Personal member verification and card binding (confirm)"),
	UpdateEnterpriseMember => ("Member1023", Member, "Update enterprise member information"),
	BindPhoneApply => ("Member1026", Member, "Bind phone number (apply)"),
	ConfirmBindPhone => ("Member1027", Member, "Bind or unbind phone number (confirm)"),
	SignAgreementApply => ("Member1029", Member, "Online agreement signing (apply)"),
	QueryMemberInfo => ("Member1030", Member, "Query member information"),

	// Orders and transactions
	CreateConsumptionOrder => ("Tx3010", Transaction, "Consumption order"),
	CreateGuaranteedOrder => ("Tx3011", Transaction, "Guaranteed (escrow) order"),
	CreateTransferOrder => ("Tx3012", Transaction, "Transfer order"),
	CreateWithdrawOrder => ("Tx3013", Transaction, "Withdrawal order"),
	CreateRechargeOrder => ("Tx3014", Transaction, "Recharge order"),
	CreateRefundOrder => ("Tx3015", Transaction, "Refund order"),
	CloseOrder => ("Tx3016", Transaction, "Close order"),
	ConfirmPayment => ("Tx3017", Transaction, "Confirm payment (SMS verification)"),
	ConsumeStoredValueCard => ("Tx3018", Transaction, "Stored-value card write-off"),

	// Queries
	QueryOrderStatus => ("Tq3001", Query, "Order status query"),
	QueryOrderDetail => ("Tq3002", Query, "Order detail query"),
	QueryAccountBalance => ("Tq4001", Query, "Member account balance query"),
	QueryAccountDetail => ("Tq4002", Query, "Member account detail query"),
	QueryPlatformFunds => ("Tq4003", Query, "Platform funds query"),
	QueryBankAccountDetail => ("Tq4004", Query, "Bank account income and expense detail query"),
	DownloadReconciliationFile => ("Tq4005", Query, "Reconciliation file download"),
	DownloadElectronicReceipt => ("Tq4006", Query, "Electronic receipt download"),
	GetUserByAuthCode => ("Tq4007", Query, "Resolve user ID from payment auth code"),

	// File transfer
	FileUpload => ("FileUpload", FileUpload, "File upload"),
	FileDownload => ("FileDownload", FileDownload, "File download"),
}

impl fmt::Display for TransCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
