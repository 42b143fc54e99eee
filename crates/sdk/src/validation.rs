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

//! Input validation helpers
//!
//! Format checks for the identifiers the platform accepts, plus a small
//! rule set for validating business payloads before they are sent.

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use crate::error::ClientError;

/// Largest accepted amount in cents
pub const MAX_AMOUNT: i64 = 999_999_999;

fn all_digits(s: &str) -> bool {
	!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_word(s: &str, min: usize, max: usize) -> bool {
	(min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Mainland mobile number: `1[3-9]` followed by nine digits
pub fn is_valid_phone(phone: &str) -> bool {
	let bytes = phone.as_bytes();
	bytes.len() == 11 && bytes[0] == b'1' && (b'3'..=b'9').contains(&bytes[1]) && all_digits(phone)
}

/// 18-character resident ID: seventeen digits and a digit or `X` check character
pub fn is_valid_id_card(id_card: &str) -> bool {
	let bytes = id_card.as_bytes();
	bytes.len() == 18
		&& bytes[..17].iter().all(u8::is_ascii_digit)
		&& matches!(bytes[17], b'0'..=b'9' | b'X' | b'x')
}

pub fn is_valid_email(email: &str) -> bool {
	let Some((local, domain)) = email.split_once('@') else {
		return false;
	};
	!local.is_empty()
		&& !domain.contains('@')
		&& !email.chars().any(char::is_whitespace)
		&& domain.contains('.')
		&& !domain.starts_with('.')
		&& !domain.ends_with('.')
		&& !domain.contains("..")
}

/// Amount in cents, between 1 and [`MAX_AMOUNT`]
pub fn is_valid_amount(amount: i64) -> bool {
	(1..=MAX_AMOUNT).contains(&amount)
}

/// Merchant order number: 6 to 64 letters, digits or underscores
pub fn is_valid_order_no(order_no: &str) -> bool {
	is_word(order_no, 6, 64)
}

/// Merchant-side user id: 1 to 64 letters, digits or underscores
pub fn is_valid_biz_user_id(biz_user_id: &str) -> bool {
	is_word(biz_user_id, 1, 64)
}

/// Calendar date in `YYYYMMDD` form
pub fn is_valid_date(date: &str) -> bool {
	date.len() == 8 && all_digits(date) && NaiveDate::parse_from_str(date, "%Y%m%d").is_ok()
}

/// Time of day in `HHMMSS` form
pub fn is_valid_time(time: &str) -> bool {
	time.len() == 6 && all_digits(time) && NaiveTime::parse_from_str(time, "%H%M%S").is_ok()
}

/// Bank card number: 13 to 19 digits
pub fn is_valid_bank_card(card_no: &str) -> bool {
	(13..=19).contains(&card_no.len()) && all_digits(card_no)
}

/// Text form of a scalar value; `None` for null, arrays and objects.
fn scalar_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

fn numeric(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

/// Character-count bounds for a field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthRule {
	pub min: Option<usize>,
	pub max: Option<usize>,
	pub exact: Option<usize>,
}

impl LengthRule {
	pub fn between(min: usize, max: usize) -> Self {
		Self {
			min: Some(min),
			max: Some(max),
			exact: None,
		}
	}

	pub fn exact(len: usize) -> Self {
		Self {
			exact: Some(len),
			..Default::default()
		}
	}
}

/// Numeric bounds and/or an allowed-values list for a field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeRule {
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub allowed: Option<Vec<String>>,
}

impl RangeRule {
	pub fn between(min: f64, max: f64) -> Self {
		Self {
			min: Some(min),
			max: Some(max),
			allowed: None,
		}
	}

	pub fn one_of<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			allowed: Some(values.into_iter().map(Into::into).collect()),
			..Default::default()
		}
	}
}

/// Validation rules for a JSON object payload
///
/// Rules are checked in order (required, length, range) and every violation
/// is reported, not just the first. Length and range rules skip fields that
/// are absent.
#[derive(Debug, Clone, Default)]
pub struct Rules {
	required: Vec<String>,
	length: Vec<(String, LengthRule)>,
	range: Vec<(String, RangeRule)>,
}

impl Rules {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn required<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.required.extend(fields.into_iter().map(Into::into));
		self
	}

	pub fn length(mut self, field: impl Into<String>, rule: LengthRule) -> Self {
		self.length.push((field.into(), rule));
		self
	}

	pub fn range(mut self, field: impl Into<String>, rule: RangeRule) -> Self {
		self.range.push((field.into(), rule));
		self
	}

	/// All violations found in `data`.
	pub fn validate(&self, data: &Value) -> Vec<String> {
		let mut errors = Vec::new();

		for field in &self.required {
			let present = match data.get(field) {
				None | Some(Value::Null) => false,
				Some(Value::String(s)) => !s.is_empty(),
				Some(_) => true,
			};
			if !present {
				errors.push(format!("Field '{}' is required", field));
			}
		}

		for (field, rule) in &self.length {
			let Some(text) = data.get(field).and_then(scalar_text) else {
				continue;
			};
			let len = text.chars().count();
			if let Some(min) = rule.min
				&& len < min
			{
				errors.push(format!("Field '{}' must be at least {} characters", field, min));
			}
			if let Some(max) = rule.max
				&& len > max
			{
				errors.push(format!("Field '{}' must be at most {} characters", field, max));
			}
			if let Some(exact) = rule.exact
				&& len != exact
			{
				errors.push(format!("Field '{}' must be exactly {} characters", field, exact));
			}
		}

		for (field, rule) in &self.range {
			let Some(value) = data.get(field).filter(|v| !v.is_null()) else {
				continue;
			};
			if rule.min.is_some() || rule.max.is_some() {
				match numeric(value) {
					Some(n) => {
						if let Some(min) = rule.min
							&& n < min
						{
							errors.push(format!("Field '{}' must not be less than {}", field, min));
						}
						if let Some(max) = rule.max
							&& n > max
						{
							errors.push(format!("Field '{}' must not be greater than {}", field, max));
						}
					}
					None => errors.push(format!("Field '{}' must be numeric", field)),
				}
			}
			if let Some(allowed) = &rule.allowed {
				let text = scalar_text(value).unwrap_or_default();
				if !allowed.contains(&text) {
					errors.push(format!(
						"Field '{}' must be one of: {}",
						field,
						allowed.join(", ")
					));
				}
			}
		}

		errors
	}

	/// Fail with [`ClientError::Validation`] when `data` breaks any rule.
	pub fn check(&self, data: &Value) -> Result<(), ClientError> {
		let errors = self.validate(data);
		if errors.is_empty() {
			Ok(())
		} else {
			Err(ClientError::Validation(errors))
		}
	}
}

/// Check a member-creation payload.
///
/// `memberType` is `1` (personal), `2` (enterprise) or `3` (sole proprietor);
/// `source` is `1` (app), `2` (H5) or `3` (mini program). `extendParam` may be
/// an object or a JSON-encoded string.
pub fn validate_member_info(member: &Value) -> Vec<String> {
	let rules = Rules::new()
		.required(["bizUserId", "memberType", "source"])
		.length("bizUserId", LengthRule::between(1, 64))
		.length("memberType", LengthRule::exact(1))
		.length("source", LengthRule::exact(1))
		.range("memberType", RangeRule::one_of(["1", "2", "3"]))
		.range("source", RangeRule::one_of(["1", "2", "3"]));
	let mut errors = rules.validate(member);

	if let Some(id) = member.get("bizUserId").and_then(Value::as_str)
		&& !is_valid_biz_user_id(id)
	{
		errors.push("Invalid bizUserId format".to_string());
	}

	match member.get("extendParam") {
		None | Some(Value::Null) => {}
		Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
			Ok(extend) => errors.extend(validate_extend_param(&extend, member)),
			Err(_) => errors.push("extendParam is not valid JSON".to_string()),
		},
		Some(extend) => errors.extend(validate_extend_param(extend, member)),
	}

	errors
}

fn validate_extend_param(extend: &Value, member: &Value) -> Vec<String> {
	let mut errors = Vec::new();
	let text = |key: &str| extend.get(key).map(|v| scalar_text(v).unwrap_or_default());

	match member.get("memberType").and_then(scalar_text).as_deref() {
		Some("1") => {
			if text("realName").is_some_and(|name| name.is_empty()) {
				errors.push("realName must not be empty".to_string());
			}
			if text("idCard").is_some_and(|id| !is_valid_id_card(&id)) {
				errors.push("Invalid idCard format".to_string());
			}
			if text("phone").is_some_and(|phone| !is_valid_phone(&phone)) {
				errors.push("Invalid phone format".to_string());
			}
		}
		Some("2") => {
			if text("companyName").is_some_and(|name| name.is_empty()) {
				errors.push("companyName must not be empty".to_string());
			}
			if text("businessLicense").is_some_and(|license| license.is_empty()) {
				errors.push("businessLicense must not be empty".to_string());
			}
		}
		_ => {}
	}

	errors
}

/// Check an order-creation payload (`bizOrderNo`, `bizUserId`, `amount`, optional `fee`).
pub fn validate_order_info(order: &Value) -> Vec<String> {
	let rules = Rules::new()
		.required(["bizOrderNo", "bizUserId", "amount"])
		.length("bizOrderNo", LengthRule::between(6, 64))
		.length("bizUserId", LengthRule::between(1, 64));
	let mut errors = rules.validate(order);

	if let Some(no) = order.get("bizOrderNo").and_then(Value::as_str)
		&& !is_valid_order_no(no)
	{
		errors.push("Invalid bizOrderNo format".to_string());
	}
	if let Some(id) = order.get("bizUserId").and_then(Value::as_str)
		&& !is_valid_biz_user_id(id)
	{
		errors.push("Invalid bizUserId format".to_string());
	}

	if let Some(amount) = order.get("amount").filter(|v| !v.is_null()) {
		match numeric(amount) {
			None => errors.push("amount must be numeric".to_string()),
			Some(n) if !is_valid_amount(n as i64) => errors.push("Invalid amount".to_string()),
			Some(_) => {}
		}
	}
	if let Some(fee) = order.get("fee").filter(|v| !v.is_null()) {
		match numeric(fee) {
			None => errors.push("fee must be numeric".to_string()),
			Some(n) if n < 0.0 => errors.push("fee must not be negative".to_string()),
			Some(_) => {}
		}
	}

	errors
}
