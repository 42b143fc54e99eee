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

//! End-to-end tests against a mock platform.
//!
//! The mock verifies the merchant signature on every request and answers with
//! an envelope signed by its own platform key.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use axum::extract::State;
use axum::http::Uri;
use axum::routing::post;
use axum::{Json, Router};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use yst_sdk::{
	ApiResponse, Client, ClientConfig, ClientError, DetailQuery, Environment, Fields, FileType,
	SignAlgorithm, Signer, SyncClient, TransCode, UploadItem,
};
use yst_signing::KeyMaterial;

const APP_ID: &str = "21803774682041868289";

struct KeyPair {
	private_key: String,
	public_key: String,
}

fn sm2_pair() -> KeyPair {
	use sm2::elliptic_curve::pkcs8::{EncodePrivateKey, EncodePublicKey};

	let secret = sm2::SecretKey::random(&mut rand::rngs::OsRng);
	KeyPair {
		private_key: STANDARD.encode(secret.to_pkcs8_der().unwrap().as_bytes()),
		public_key: STANDARD.encode(secret.public_key().to_public_key_der().unwrap().as_bytes()),
	}
}

fn rsa_pair() -> KeyPair {
	use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};

	let key = rsa::RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).unwrap();
	KeyPair {
		private_key: STANDARD.encode(key.to_pkcs8_der().unwrap().as_bytes()),
		public_key: STANDARD.encode(key.to_public_key().to_public_key_der().unwrap().as_bytes()),
	}
}

struct Keys {
	merchant: KeyPair,
	platform: KeyPair,
}

fn sm2_keys() -> &'static Keys {
	static KEYS: OnceLock<Keys> = OnceLock::new();
	KEYS.get_or_init(|| Keys {
		merchant: sm2_pair(),
		platform: sm2_pair(),
	})
}

struct MockPlatform {
	/// Signs with the platform key, verifies with the merchant key
	signer: Signer,
	tamper_responses: AtomicBool,
	requests: AtomicUsize,
}

impl MockPlatform {
	fn new(algorithm: SignAlgorithm, keys: &Keys) -> Arc<Self> {
		let material = KeyMaterial::new(&keys.platform.private_key, &keys.merchant.public_key);
		Arc::new(Self {
			signer: Signer::new(algorithm, material).unwrap(),
			tamper_responses: AtomicBool::new(false),
			requests: AtomicUsize::new(0),
		})
	}
}

async fn handle(
	State(platform): State<Arc<MockPlatform>>,
	uri: Uri,
	Json(body): Json<Value>,
) -> Json<Value> {
	platform.requests.fetch_add(1, Ordering::SeqCst);

	let request = Fields::from_json(body).unwrap();
	let mut response = if !platform.signer.verify_response_sign(&request).unwrap() {
		Fields::new().with("code", "100001").with("msg", "sign verify failed")
	} else {
		let trans_code = request.get_str("transCode").unwrap_or_default().to_string();
		let biz: Value = serde_json::from_str(request.get_str("bizData").unwrap_or("{}")).unwrap();

		let (resp_code, resp_msg) = if biz.get("bizUserId") == Some(&json!("unknown_user")) {
			("E1001", "member not found")
		} else {
			("000000", "ok")
		};

		let data = if trans_code == "FileDownload" {
			json!({ "fileId": biz["fileId"], "fileContent": STANDARD.encode(b"receipt body") })
		} else {
			json!({ "path": uri.path(), "transCode": trans_code, "biz": biz })
		};

		Fields::new()
			.with("code", "000000")
			.with("msg", "success")
			.with("respCode", resp_code)
			.with("respMsg", resp_msg)
			.with("data", data)
	};

	platform.signer.sign_fields(&mut response).unwrap();
	if platform.tamper_responses.load(Ordering::SeqCst) {
		response.insert("msg", "tampered");
	}
	Json(response.into_json())
}

async fn spawn_platform(platform: Arc<MockPlatform>) -> SocketAddr {
	let app = Router::new()
		.route("/tx/handle", post(handle))
		.route("/tm/handle", post(handle))
		.route("/tq/handle", post(handle))
		.route("/file/upload", post(handle))
		.route("/file/download", post(handle))
		.with_state(platform);

	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	addr
}

fn client_config(addr: SocketAddr, keys: &Keys) -> ClientConfig {
	ClientConfig::new(Environment::Test, APP_ID, &keys.merchant.private_key)
		.with_base_url(format!("http://{}", addr))
		.with_public_key(&keys.platform.public_key)
}

async fn setup() -> (Arc<MockPlatform>, Client) {
	let keys = sm2_keys();
	let platform = MockPlatform::new(SignAlgorithm::Sm3WithSm2, keys);
	let addr = spawn_platform(platform.clone()).await;
	let client = Client::new(client_config(addr, keys)).unwrap();
	(platform, client)
}

fn echoed(response: &ApiResponse) -> Value {
	response.data_as::<Value>().unwrap().unwrap()
}

fn scratch_dir() -> PathBuf {
	std::env::temp_dir().join(format!("yst-sdk-test-{}", uuid::Uuid::new_v4().simple()))
}

#[tokio::test]
async fn test_signed_round_trip() {
	let (_platform, client) = setup().await;

	let response = client.quick_query_order("ORDER_1").await.unwrap();

	assert_eq!(response.verified, Some(true));
	assert!(response.is_business_success());
	let data = echoed(&response);
	assert_eq!(data["path"], "/tq/handle");
	assert_eq!(data["transCode"], "Tq3001");
	assert_eq!(data["biz"], json!({ "orderId": "ORDER_1" }));

	let response = response.ensure_verified().unwrap().into_result().unwrap();
	assert_eq!(response.msg, "success");
}

#[tokio::test]
async fn test_services_route_to_their_endpoints() {
	let (_platform, client) = setup().await;

	let member = client.member().query_member_info("user_001").await.unwrap();
	assert_eq!(echoed(&member)["path"], "/tm/handle");
	assert_eq!(echoed(&member)["transCode"], "Member1030");

	let merchant = client
		.merchant()
		.update_merchant_status("merchant_001", "1")
		.await
		.unwrap();
	assert_eq!(echoed(&merchant)["transCode"], "Member1023");
	assert_eq!(echoed(&merchant)["biz"], json!({ "bizUserId": "merchant_001", "status": "1" }));

	let close = client.order().close_order("ORDER_1", "timeout").await.unwrap();
	assert_eq!(echoed(&close)["path"], "/tx/handle");
	assert_eq!(echoed(&close)["transCode"], "Tx3016");

	let order = client
		.quick_create_consume_order(&json!({
			"amount": 100,
			"bizOrderNo": "ORDER_001",
			"bizUserId": "user_001"
		}))
		.await
		.unwrap();
	assert_eq!(echoed(&order)["transCode"], "Tx3010");
	assert_eq!(echoed(&order)["biz"]["amount"], 100);

	let funds = client.query().query_platform_funds().await.unwrap();
	assert_eq!(echoed(&funds)["transCode"], "Tq4003");
	assert_eq!(echoed(&funds)["biz"], json!({}));

	let detail = client
		.query()
		.query_account_detail(&DetailQuery::new("user_001", "20250101", "20250131"))
		.await
		.unwrap();
	assert_eq!(echoed(&detail)["biz"]["page"], 1);
	assert_eq!(echoed(&detail)["biz"]["pageSize"], 20);
}

#[tokio::test]
async fn test_generic_call_with_unicode_payload() {
	let (_platform, client) = setup().await;

	let response = client
		.call(
			TransCode::CreatePersonalMemberApply,
			&json!({ "bizUserId": "user_001", "name": "张三" }),
		)
		.await
		.unwrap();
	assert_eq!(response.verified, Some(true));
	assert_eq!(echoed(&response)["biz"]["name"], "张三");
}

#[tokio::test]
async fn test_business_error_surfaces_in_into_result() {
	let (_platform, client) = setup().await;

	let response = client.quick_query_account_balance("unknown_user").await.unwrap();
	assert!(response.is_success());
	assert!(!response.is_business_success());

	let err = response.into_result().unwrap_err();
	assert!(matches!(err, ClientError::Business { ref code, .. } if code == "E1001"));
}

#[tokio::test]
async fn test_tampered_response_fails_verification() {
	let (platform, client) = setup().await;
	platform.tamper_responses.store(true, Ordering::SeqCst);

	let response = client.quick_query_order("ORDER_1").await.unwrap();
	assert_eq!(response.verified, Some(false));
	assert!(matches!(response.ensure_verified(), Err(ClientError::UnverifiedResponse)));
}

#[tokio::test]
async fn test_platform_rejects_foreign_signature() {
	let keys = sm2_keys();
	let platform = MockPlatform::new(SignAlgorithm::Sm3WithSm2, keys);
	let addr = spawn_platform(platform).await;

	let stranger = sm2_pair();
	let config = ClientConfig::new(Environment::Test, APP_ID, &stranger.private_key)
		.with_base_url(format!("http://{}", addr))
		.with_public_key(&keys.platform.public_key);
	let client = Client::new(config).unwrap();

	let response = client.quick_query_order("ORDER_1").await.unwrap();
	assert_eq!(response.verified, Some(true));
	assert!(matches!(
		response.into_result(),
		Err(ClientError::Platform { ref code, .. }) if code == "100001"
	));
}

#[tokio::test]
async fn test_rsa_round_trip() {
	let keys = Keys {
		merchant: rsa_pair(),
		platform: rsa_pair(),
	};
	let platform = MockPlatform::new(SignAlgorithm::Rsa, &keys);
	let addr = spawn_platform(platform).await;
	let client = Client::new(client_config(addr, &keys).with_sign_type(SignAlgorithm::Rsa)).unwrap();

	let envelope = client.build_request(TransCode::QueryOrderStatus, "{}").unwrap();
	assert_eq!(envelope.sign_type, SignAlgorithm::Rsa);

	let response = client.quick_query_order("ORDER_1").await.unwrap();
	assert_eq!(response.verified, Some(true));
	assert!(response.is_business_success());
}

#[tokio::test]
async fn test_http_error_status() {
	let keys = sm2_keys();
	let platform = MockPlatform::new(SignAlgorithm::Sm3WithSm2, keys);
	let addr = spawn_platform(platform).await;
	let config = client_config(addr, keys).with_base_url(format!("http://{}/missing", addr));
	let client = Client::new(config).unwrap();

	let err = client.quick_query_order("ORDER_1").await.unwrap_err();
	assert!(matches!(err, ClientError::Server(ref msg) if msg.starts_with("404")));
}

#[tokio::test]
async fn test_unreachable_platform() {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let client = Client::new(client_config(addr, sm2_keys())).unwrap();
	let err = client.quick_query_order("ORDER_1").await.unwrap_err();
	assert!(matches!(err, ClientError::Network(_)));
}

#[tokio::test]
async fn test_invalid_query_is_not_sent() {
	let (platform, client) = setup().await;

	let query = DetailQuery::new("user_001", "2025-01-01", "20250131");
	let err = client.query().query_bank_account_detail(&query).await.unwrap_err();
	assert!(matches!(err, ClientError::Validation(_)));
	assert_eq!(platform.requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_file_upload_and_download() {
	let (_platform, client) = setup().await;
	let dir = scratch_dir();
	tokio::fs::create_dir_all(&dir).await.unwrap();
	let license = dir.join("license.png");
	tokio::fs::write(&license, b"png bytes").await.unwrap();

	let upload = client
		.file()
		.upload_business_license(&license, "user_001")
		.await
		.unwrap();
	let data = echoed(&upload);
	let biz = &data["biz"];
	assert_eq!(data["path"], "/file/upload");
	assert_eq!(biz["fileType"], "BUSINESS_LICENSE");
	assert_eq!(biz["fileName"], "license.png");
	assert_eq!(biz["fileContent"], STANDARD.encode(b"png bytes"));

	let target = dir.join("downloads").join("receipt.pdf");
	let (response, saved) = client
		.file()
		.download_file("FILE_1", Some(&target))
		.await
		.unwrap();
	assert!(response.is_success());
	assert_eq!(saved.as_deref(), Some(target.as_path()));
	assert_eq!(tokio::fs::read(&target).await.unwrap(), b"receipt body");

	tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn test_batch_upload_continues_past_failures() {
	let (platform, client) = setup().await;
	let dir = scratch_dir();
	tokio::fs::create_dir_all(&dir).await.unwrap();
	let id_card = dir.join("id.jpg");
	tokio::fs::write(&id_card, b"jpg").await.unwrap();

	let outcomes = client
		.file()
		.batch_upload([
			UploadItem::new(dir.join("missing.jpg"), FileType::IdCard),
			UploadItem::new(&id_card, FileType::IdCard).with_biz_user_id("user_001"),
		])
		.await;

	assert_eq!(outcomes.len(), 2);
	assert!(matches!(outcomes[0].result, Err(ClientError::Io(_))));
	assert!(outcomes[1].is_sent());
	assert_eq!(platform.requests.load(Ordering::SeqCst), 1);

	tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[test]
fn test_sync_client_round_trip() {
	let keys = sm2_keys();
	let server = tokio::runtime::Runtime::new().unwrap();
	let addr = server.block_on(spawn_platform(MockPlatform::new(SignAlgorithm::Sm3WithSm2, keys)));

	let client = SyncClient::new(client_config(addr, keys)).unwrap();
	let response = client
		.call(TransCode::QueryOrderDetail, &json!({ "orderId": "ORDER_1" }))
		.unwrap();
	assert_eq!(response.verified, Some(true));
	assert_eq!(echoed(&response)["transCode"], "Tq3002");

	let funds = client
		.block_on(client.client().query().query_platform_funds())
		.unwrap();
	assert!(funds.is_business_success());
}
