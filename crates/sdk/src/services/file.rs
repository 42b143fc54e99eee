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

use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use crate::client::Client;
use crate::envelope::ApiResponse;
use crate::error::ClientError;
use crate::interface::TransCode;

/// Document category of an uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
	IdCard,
	BusinessLicense,
	Agreement,
	/// Any other category code accepted by the platform
	Other(String),
}

impl FileType {
	pub fn as_str(&self) -> &str {
		match self {
			FileType::IdCard => "ID_CARD",
			FileType::BusinessLicense => "BUSINESS_LICENSE",
			FileType::Agreement => "AGREEMENT",
			FileType::Other(code) => code,
		}
	}
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for FileType {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

/// One entry of a batch upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
	pub path: PathBuf,
	pub file_type: FileType,
	pub biz_user_id: Option<String>,
}

impl UploadItem {
	pub fn new(path: impl Into<PathBuf>, file_type: FileType) -> Self {
		Self {
			path: path.into(),
			file_type,
			biz_user_id: None,
		}
	}

	pub fn with_biz_user_id(mut self, biz_user_id: impl Into<String>) -> Self {
		self.biz_user_id = Some(biz_user_id.into());
		self
	}
}

/// Result of one batch upload entry
#[derive(Debug)]
pub struct UploadOutcome {
	pub item: UploadItem,
	pub result: Result<ApiResponse, ClientError>,
}

impl UploadOutcome {
	/// The request went through; the response may still carry a failure code.
	pub fn is_sent(&self) -> bool {
		self.result.is_ok()
	}
}

/// File upload and download
///
/// Files travel base64-encoded inside `bizData`.
pub struct FileService<'a> {
	client: &'a Client,
}

impl<'a> FileService<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self { client }
	}

	/// Upload the file at `path`.
	///
	/// A missing or unreadable file fails with [`ClientError::Io`] before any
	/// request is made.
	pub async fn upload_file(
		&self,
		path: impl AsRef<Path>,
		file_type: FileType,
		biz_user_id: Option<&str>,
	) -> Result<ApiResponse, ClientError> {
		let payload = upload_payload(path.as_ref(), &file_type, biz_user_id).await?;
		self.client.call(TransCode::FileUpload, &payload).await
	}

	pub async fn upload_id_card(
		&self,
		path: impl AsRef<Path>,
		biz_user_id: &str,
	) -> Result<ApiResponse, ClientError> {
		self.upload_file(path, FileType::IdCard, Some(biz_user_id)).await
	}

	pub async fn upload_business_license(
		&self,
		path: impl AsRef<Path>,
		biz_user_id: &str,
	) -> Result<ApiResponse, ClientError> {
		self.upload_file(path, FileType::BusinessLicense, Some(biz_user_id))
			.await
	}

	pub async fn upload_agreement(
		&self,
		path: impl AsRef<Path>,
		biz_user_id: &str,
	) -> Result<ApiResponse, ClientError> {
		self.upload_file(path, FileType::Agreement, Some(biz_user_id)).await
	}

	pub async fn upload_other(
		&self,
		path: impl AsRef<Path>,
		file_type: impl Into<String>,
		biz_user_id: Option<&str>,
	) -> Result<ApiResponse, ClientError> {
		self.upload_file(path, FileType::Other(file_type.into()), biz_user_id)
			.await
	}

	/// Upload files one after another.
	///
	/// A failing entry is recorded in its outcome and does not stop the batch.
	pub async fn batch_upload(
		&self,
		items: impl IntoIterator<Item = UploadItem>,
	) -> Vec<UploadOutcome> {
		let mut outcomes = Vec::new();
		for item in items {
			let result = self
				.upload_file(&item.path, item.file_type.clone(), item.biz_user_id.as_deref())
				.await;
			if let Err(e) = &result {
				warn!(path = %item.path.display(), error = %e, "Batch upload entry failed");
			}
			outcomes.push(UploadOutcome { item, result });
		}
		outcomes
	}

	/// Download a file by id.
	///
	/// When the platform returns file content it is written to `save_path`, or
	/// to a fresh file in the system temp directory, and the written path is
	/// returned alongside the response.
	pub async fn download_file(
		&self,
		file_id: &str,
		save_path: Option<&Path>,
	) -> Result<(ApiResponse, Option<PathBuf>), ClientError> {
		let response = self
			.client
			.call(TransCode::FileDownload, &json!({ "fileId": file_id }))
			.await?;

		if !response.is_success() {
			return Ok((response, None));
		}

		let content = response
			.data_as::<Value>()
			.ok()
			.flatten()
			.and_then(|data| data.get("fileContent").and_then(Value::as_str).map(str::to_string));

		let saved = match content {
			Some(content) => Some(save_file_content(&content, save_path).await?),
			None => None,
		};
		Ok((response, saved))
	}
}

async fn upload_payload(
	path: &Path,
	file_type: &FileType,
	biz_user_id: Option<&str>,
) -> Result<Value, ClientError> {
	let bytes = tokio::fs::read(path).await?;
	let file_name = path
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default();

	info!(file_name = %file_name, size = bytes.len(), file_type = %file_type, "Uploading file");

	let mut payload = Map::new();
	payload.insert("fileType".to_string(), json!(file_type));
	payload.insert("fileContent".to_string(), json!(BASE64.encode(&bytes)));
	payload.insert("fileName".to_string(), json!(file_name));
	if let Some(id) = biz_user_id.filter(|id| !id.is_empty()) {
		payload.insert("bizUserId".to_string(), json!(id));
	}
	Ok(Value::Object(payload))
}

/// Decode base64 file content and write it out, creating parent directories.
pub(crate) async fn save_file_content(
	content: &str,
	save_path: Option<&Path>,
) -> Result<PathBuf, ClientError> {
	let bytes = BASE64
		.decode(content.trim())
		.map_err(|e| ClientError::InvalidResponse(format!("Failed to decode file content: {}", e)))?;

	let path = match save_path {
		Some(path) => path.to_path_buf(),
		None => std::env::temp_dir().join(format!("yst_{}.tmp", uuid::Uuid::new_v4().simple())),
	};

	if let Some(parent) = path.parent()
		&& !parent.as_os_str().is_empty()
	{
		tokio::fs::create_dir_all(parent).await?;
	}
	tokio::fs::write(&path, &bytes).await?;

	info!(path = %path.display(), size = bytes.len(), "Saved downloaded file");
	Ok(path)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scratch_dir() -> PathBuf {
		std::env::temp_dir().join(format!("yst-file-test-{}", uuid::Uuid::new_v4().simple()))
	}

	#[test]
	fn test_file_type_codes() {
		assert_eq!(FileType::IdCard.as_str(), "ID_CARD");
		assert_eq!(FileType::BusinessLicense.to_string(), "BUSINESS_LICENSE");
		assert_eq!(json!(FileType::Agreement), json!("AGREEMENT"));
		assert_eq!(FileType::Other("BANK_CARD".to_string()).as_str(), "BANK_CARD");
	}

	#[tokio::test]
	async fn test_upload_payload() {
		let dir = scratch_dir();
		tokio::fs::create_dir_all(&dir).await.unwrap();
		let path = dir.join("license.png");
		tokio::fs::write(&path, b"hello").await.unwrap();

		let payload = upload_payload(&path, &FileType::BusinessLicense, Some("user_001"))
			.await
			.unwrap();
		assert_eq!(payload["fileType"], "BUSINESS_LICENSE");
		assert_eq!(payload["fileContent"], "aGVsbG8=");
		assert_eq!(payload["fileName"], "license.png");
		assert_eq!(payload["bizUserId"], "user_001");

		let anonymous = upload_payload(&path, &FileType::IdCard, Some("")).await.unwrap();
		assert!(anonymous.get("bizUserId").is_none());

		tokio::fs::remove_dir_all(&dir).await.unwrap();
	}

	#[tokio::test]
	async fn test_upload_payload_missing_file() {
		let err = upload_payload(Path::new("/nonexistent/yst/file.png"), &FileType::IdCard, None)
			.await
			.unwrap_err();
		assert!(matches!(err, ClientError::Io(_)));
	}

	#[tokio::test]
	async fn test_save_file_content_creates_directories() {
		let dir = scratch_dir();
		let target = dir.join("nested").join("receipt.pdf");

		let saved = save_file_content("aGVsbG8=", Some(&target)).await.unwrap();
		assert_eq!(saved, target);
		assert_eq!(tokio::fs::read(&target).await.unwrap(), b"hello");

		tokio::fs::remove_dir_all(&dir).await.unwrap();
	}

	#[tokio::test]
	async fn test_save_file_content_defaults_to_temp_dir() {
		let saved = save_file_content("aGVsbG8=", None).await.unwrap();
		assert!(saved.starts_with(std::env::temp_dir()));
		tokio::fs::remove_file(&saved).await.unwrap();
	}

	#[tokio::test]
	async fn test_save_file_content_rejects_bad_base64() {
		let err = save_file_content("not base64!", None).await.unwrap_err();
		assert!(matches!(err, ClientError::InvalidResponse(_)));
	}
}
