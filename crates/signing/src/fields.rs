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

//! Flat field mapping shared by outbound envelopes and inbound responses.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope field that carries the signature. Never part of the signed content.
pub const SIGN_FIELD: &str = "sign";

/// Top-level fields of a request or response envelope.
///
/// Keys are kept in ascending byte order, so iteration order never depends
/// on the order in which fields were inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, Value>);

impl Fields {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a field, replacing any previous value under the same key.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(key.into(), value.into())
	}

	/// Builder-style [`Fields::insert`].
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Value of `key` if it is a JSON string.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(Value::as_str)
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.0.remove(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
		self.0.iter()
	}

	/// Build from a decoded JSON document. Returns `None` unless it is an object.
	pub fn from_json(value: Value) -> Option<Self> {
		Self::try_from(value).ok()
	}

	/// Convert back into a JSON object.
	pub fn into_json(self) -> Value {
		Value::Object(self.0.into_iter().collect())
	}
}

impl From<Map<String, Value>> for Fields {
	fn from(map: Map<String, Value>) -> Self {
		Self(map.into_iter().collect())
	}
}

/// Only JSON objects convert; any other value is handed back as the error.
impl TryFrom<Value> for Fields {
	type Error = Value;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(map) => Ok(map.into()),
			other => Err(other),
		}
	}
}

impl<K, V> FromIterator<(K, V)> for Fields
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

impl<'a> IntoIterator for &'a Fields {
	type Item = (&'a String, &'a Value);
	type IntoIter = btree_map::Iter<'a, String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
