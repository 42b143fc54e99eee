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

//! Canonical string construction
//!
//! Both sides of the protocol sign the same text: every field except `sign`,
//! sorted ascending by key bytes, rendered as `key=value` and joined with `&`.
//! Fields whose value is `null` or the empty string are left out entirely.
//!
//! This format is compatibility-critical. Any change here breaks signature
//! interoperability with the platform.

use std::borrow::Cow;

use serde_json::Value;

use crate::fields::{Fields, SIGN_FIELD};

/// Build the canonical signing string for `fields`.
///
/// Total over any input; an empty (or fully excluded) mapping yields `""`.
pub fn canonicalize(fields: &Fields) -> String {
	let mut out = String::new();

	// `Fields` iterates in ascending key order already.
	for (key, value) in fields {
		if key == SIGN_FIELD {
			continue;
		}
		let Some(rendered) = render_value(value) else {
			continue;
		};

		if !out.is_empty() {
			out.push('&');
		}
		out.push_str(key);
		out.push('=');
		out.push_str(&rendered);
	}

	out
}

/// Text form of a single value, or `None` when the field is excluded.
///
/// Nested objects and arrays are rendered as compact JSON with their keys in
/// the order they were received, which requires serde_json's `preserve_order`.
/// Booleans render as `true`/`false`; PHP-style string concatenation would
/// give `1` and an empty (excluded) value instead.
fn render_value(value: &Value) -> Option<Cow<'_, str>> {
	match value {
		Value::Null => None,
		Value::String(s) if s.is_empty() => None,
		Value::String(s) => Some(Cow::Borrowed(s.as_str())),
		Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
		Value::Number(n) => Some(Cow::Owned(n.to_string())),
		Value::Array(_) | Value::Object(_) => Some(Cow::Owned(value.to_string())),
	}
}
