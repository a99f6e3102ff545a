// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use async_trait::async_trait;
use braketctl_aws_v4::StaticCredentialProvider;
use braketctl_config_file::FileConfigStore;
use braketctl_braket::{
    bell_state_action, BraketClient, CreateJob, CreateTask, ListDevices, ListJobs, ListTasks,
    ScriptModeConfig,
};
use braketctl_core::{
    config_keys, ConfigStore, Context, Error, ErrorKind, HttpSend, MemoryConfigStore, Result,
    StaticEnv,
};
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use test_case::test_case;

const SV1: &str = "arn:aws:braket:::device/quantum-simulator/amazon/sv1";

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    uri: String,
    headers: http::HeaderMap,
    body: Bytes,
}

/// Answers every request with the same canned response and keeps a copy of
/// what was sent.
#[derive(Debug, Clone)]
struct MockHttpSend {
    status: StatusCode,
    body: Bytes,
    fail: bool,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockHttpSend {
    fn new(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: Bytes::copy_from_slice(body.as_bytes()),
            fail: false,
            requests: Arc::default(),
        }
    }

    fn unreachable() -> Self {
        Self {
            fail: true,
            ..Self::new(StatusCode::OK, "")
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last(&self) -> Recorded {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("a request must have been sent")
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        self.requests.lock().unwrap().push(Recorded {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });

        if self.fail {
            return Err(Error::transport(format!(
                "Network error: no response from {}. Check your connection and region",
                parts.uri
            )));
        }

        Ok(http::Response::builder()
            .status(self.status)
            .body(self.body.clone())
            .unwrap())
    }
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn configured_store() -> MemoryConfigStore {
    MemoryConfigStore::from_values([
        (config_keys::ACCESS_KEY_ID, "AKIDEXAMPLE"),
        (config_keys::SECRET_ACCESS_KEY, "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
    ])
}

fn client_with(http: MockHttpSend, store: impl ConfigStore, envs: &[(&str, &str)]) -> BraketClient {
    init();
    let ctx = Context::new()
        .with_http_send(http)
        .with_env(StaticEnv::from_pairs(envs.iter().copied()))
        .with_config_store(store);

    BraketClient::new(ctx).with_time(Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap())
}

fn configured(http: MockHttpSend) -> BraketClient {
    client_with(http, configured_store(), &[])
}

fn query_pairs(uri: &str) -> Vec<(String, String)> {
    let query = uri.split_once('?').map(|(_, q)| q).unwrap_or_default();
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

async fn call_every_operation(client: &BraketClient) -> Vec<Result<Value>> {
    let job = CreateJob::new(
        "my-job",
        "arn:aws:iam::123456789012:role/BraketJob",
        ScriptModeConfig::new("main", "s3://bucket/script.py"),
        "s3://bucket/output",
    );
    vec![
        client.list_tasks(&ListTasks::new()).await,
        client.get_task("arn:task").await,
        client
            .create_task(&CreateTask::new(SV1, "bucket", "prefix"))
            .await,
        client.cancel_task("arn:task").await,
        client.list_devices(&ListDevices::new()).await,
        client.get_device(SV1).await,
        client.create_job(&job).await,
        client.get_job("my-job").await,
        client.list_jobs(&ListJobs::new()).await,
        client.cancel_job("my-job").await,
    ]
}

#[test_case(&[(config_keys::ACCESS_KEY_ID, "AKIDEXAMPLE")]; "secret missing")]
#[test_case(&[(config_keys::SECRET_ACCESS_KEY, "secret")]; "access key id missing")]
#[test_case(&[(config_keys::ACCESS_KEY_ID, ""), (config_keys::SECRET_ACCESS_KEY, "secret")]; "access key id empty")]
#[test_case(&[(config_keys::ACCESS_KEY_ID, "AKIDEXAMPLE"), (config_keys::SECRET_ACCESS_KEY, "")]; "secret empty")]
#[test_case(&[]; "nothing stored")]
#[tokio::test]
async fn test_missing_credentials_never_reach_the_network(values: &[(&str, &str)]) {
    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let store = MemoryConfigStore::from_values(values.iter().copied());
    let client = client_with(http.clone(), store, &[]);

    for result in call_every_operation(&client).await {
        let err = result.expect_err("operation must fail without credentials");
        assert_eq!(err.kind(), ErrorKind::CredentialMissing);
        assert!(err.to_string().starts_with("AWS credentials not configured."));
    }
    assert_eq!(http.calls(), 0);
}

#[tokio::test]
async fn test_corrupt_config_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir must be created");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "accessKeyId = \"AKID\"\nsecretAccessKey = \"s\"\nregion = = broken",
    )
    .expect("config file must be written");

    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let client = client_with(http.clone(), FileConfigStore::new(&path), &[]);

    for result in call_every_operation(&client).await {
        let err = result.expect_err("operation must fail on a corrupt config");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.to_string().contains("is not valid TOML"), "{err}");
    }
    assert_eq!(http.calls(), 0);
}

#[tokio::test]
async fn test_corrupt_config_file_is_reported_with_env_credentials() {
    let dir = tempfile::tempdir().expect("tempdir must be created");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "region = = broken").expect("config file must be written");

    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let client = client_with(
        http.clone(),
        FileConfigStore::new(&path),
        &[
            ("AWS_ACCESS_KEY_ID", "AKIDENV"),
            ("AWS_SECRET_ACCESS_KEY", "env-secret"),
        ],
    );

    let err = client
        .get_job("my-job")
        .await
        .expect_err("region lookup must fail on a corrupt config");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert_eq!(http.calls(), 0);
}

#[tokio::test]
async fn test_env_credentials_are_used_when_config_is_empty() {
    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let client = client_with(
        http.clone(),
        MemoryConfigStore::default(),
        &[
            ("AWS_ACCESS_KEY_ID", "AKIDENV"),
            ("AWS_SECRET_ACCESS_KEY", "env-secret"),
        ],
    );

    client.get_job("my-job").await.expect("call must succeed");
    let auth = http.last().headers["authorization"].to_str().unwrap().to_string();
    assert!(auth.contains("Credential=AKIDENV/20240115/us-east-1/braket/aws4_request"));
}

#[tokio::test]
async fn test_every_operation_sends_one_request_when_configured() {
    let http = MockHttpSend::new(StatusCode::OK, r#"{"ok":true}"#);
    let client = configured(http.clone());

    for result in call_every_operation(&client).await {
        assert_eq!(result.expect("operation must succeed"), json!({"ok": true}));
    }
    assert_eq!(http.calls(), 10);
}

#[test_case(401, ErrorKind::AuthenticationFailed, "Authentication failed"; "unauthorized")]
#[test_case(403, ErrorKind::AuthenticationFailed, "Authentication failed"; "forbidden")]
#[test_case(404, ErrorKind::NotFound, "Resource not found"; "not found")]
#[test_case(429, ErrorKind::RateLimited, "Rate limit exceeded"; "throttled")]
#[test_case(500, ErrorKind::ApiFailure, "API error (500): internal failure"; "server error")]
#[tokio::test]
async fn test_status_mapping(status: u16, kind: ErrorKind, message: &str) {
    let http = MockHttpSend::new(
        StatusCode::from_u16(status).unwrap(),
        r#"{"message":"internal failure"}"#,
    );
    let client = configured(http);

    let err = client.get_task("arn:task").await.unwrap_err();
    assert_eq!(err.kind(), kind);
    assert_eq!(err.status(), Some(status));
    assert_eq!(err.to_string(), message);
}

#[tokio::test]
async fn test_transport_failure_is_not_an_api_error() {
    let client = configured(MockHttpSend::unreachable());

    let err = client.list_devices(&ListDevices::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!err.is_api_error());
    assert!(err.to_string().starts_with("Network error: no response from"));
}

#[tokio::test]
async fn test_list_completed_tasks() {
    let http = MockHttpSend::new(StatusCode::OK, r#"{"quantumTasks":[]}"#);
    let client = configured(http.clone());

    let resp = client
        .list_tasks(&ListTasks::new().with_status("COMPLETED"))
        .await
        .unwrap();
    assert_eq!(resp, json!({"quantumTasks": []}));

    let req = http.last();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.uri, "https://braket.us-east-1.amazonaws.com/quantum-tasks");
    assert_eq!(
        std::str::from_utf8(&req.body).unwrap(),
        r#"{"maxResults":10,"filters":[{"name":"status","values":["COMPLETED"]}]}"#
    );
    assert_eq!(req.headers["content-type"], "application/json");
    assert_eq!(req.headers["x-amz-date"], "20240115T123045Z");
}

#[tokio::test]
async fn test_create_task_defaults_to_bell_state() {
    let http = MockHttpSend::new(StatusCode::CREATED, r#"{"quantumTaskArn":"arn:task"}"#);
    let client = configured(http.clone());

    client
        .create_task(&CreateTask::new(SV1, "amazon-braket-results", "tasks"))
        .await
        .unwrap();

    let body: Value = serde_json::from_slice(&http.last().body).unwrap();
    assert_eq!(body["action"], bell_state_action());
    assert_eq!(
        body["action"],
        json!({
            "braketSchemaHeader": {"name": "braket.ir.openqasm.program", "version": "1"},
            "source": "OPENQASM 3;\nqubit[2] q;\nbit[2] c;\nh q[0];\ncnot q[0], q[1];\nc = measure q;"
        })
    );
    assert_eq!(body["shots"], json!(100));
    assert_eq!(body["deviceArn"], json!(SV1));
}

#[tokio::test]
async fn test_list_running_jobs_uses_query() {
    let http = MockHttpSend::new(StatusCode::OK, r#"{"jobs":[]}"#);
    let client = configured(http.clone());

    client
        .list_jobs(&ListJobs::new().with_state("RUNNING"))
        .await
        .unwrap();

    let req = http.last();
    assert_eq!(req.method, Method::GET);
    assert!(req.body.is_empty());
    assert!(req.uri.starts_with("https://braket.us-east-1.amazonaws.com/jobs?"));
    let pairs = query_pairs(&req.uri);
    assert!(pairs.contains(&("filters".to_string(), "state:RUNNING".to_string())));
    assert!(pairs.contains(&("maxResults".to_string(), "10".to_string())));
}

#[tokio::test]
async fn test_arns_are_encoded_as_one_path_segment() {
    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let client = configured(http.clone());

    client.get_device(SV1).await.unwrap();
    assert_eq!(
        http.last().uri,
        "https://braket.us-east-1.amazonaws.com/devices/arn%3Aaws%3Abraket%3A%3A%3Adevice%2Fquantum-simulator%2Famazon%2Fsv1"
    );

    client.cancel_job("my-job").await.unwrap();
    let req = http.last();
    assert_eq!(req.method, Method::PUT);
    assert_eq!(req.uri, "https://braket.us-east-1.amazonaws.com/jobs/my-job/cancel");
    assert!(req.body.is_empty());
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let client = configured(MockHttpSend::new(StatusCode::OK, ""));
    assert_eq!(client.cancel_task("arn:task").await.unwrap(), Value::Null);
}

#[test_case(&[], &[], "us-east-1"; "fallback")]
#[test_case(&[], &[("AWS_DEFAULT_REGION", "ap-southeast-2")], "ap-southeast-2"; "default region env")]
#[test_case(&[], &[("AWS_REGION", "eu-west-1"), ("AWS_DEFAULT_REGION", "ap-southeast-2")], "eu-west-1"; "region env")]
#[test_case(&[("region", "us-west-2")], &[("AWS_REGION", "eu-west-1")], "us-west-2"; "config wins")]
#[tokio::test]
async fn test_region_resolution(config: &[(&str, &str)], envs: &[(&str, &str)], expected: &str) {
    let store = configured_store();
    for (k, v) in config {
        store.set(k, v).unwrap();
    }
    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let client = client_with(http.clone(), store, envs);

    assert_eq!(client.region().unwrap(), expected);
    client.get_job("j").await.unwrap();
    assert_eq!(
        http.last().uri,
        format!("https://braket.{expected}.amazonaws.com/jobs/j")
    );
}

#[tokio::test]
async fn test_session_token_is_sent() {
    let store = configured_store();
    store
        .set(config_keys::SESSION_TOKEN, "session-token-value")
        .unwrap();
    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let client = client_with(http.clone(), store, &[]);

    client.get_job("j").await.unwrap();
    let req = http.last();
    assert_eq!(req.headers["x-amz-security-token"], "session-token-value");
    assert!(req.headers["authorization"]
        .to_str()
        .unwrap()
        .contains("x-amz-security-token"));
}

#[tokio::test]
async fn test_custom_credential_provider() {
    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let client = client_with(http.clone(), MemoryConfigStore::default(), &[])
        .with_credential_provider(StaticCredentialProvider::new("AKIDSTATIC", "static-secret"));

    client.get_device(SV1).await.unwrap();
    let auth = http.last().headers["authorization"].to_str().unwrap().to_string();
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDSTATIC/20240115/"));
}
