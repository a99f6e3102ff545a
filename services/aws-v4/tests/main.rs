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

use std::collections::HashMap;

use anyhow::Result;
use braketctl_aws_v4::{
    Credential, DefaultCredentialProvider, ProvideCredentialChain, RequestSigner,
    StaticCredentialProvider, BRAKET_SERVICE,
};
use braketctl_core::time::parse_rfc3339;
use braketctl_core::{config_keys, Context, MemoryConfigStore, ProvideCredential, StaticEnv};
use http::Method;
use log::debug;
use serde_json::json;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn context(config: &[(&str, &str)], envs: &[(&str, &str)]) -> Context {
    Context::new()
        .with_config_store(MemoryConfigStore::from_values(config.iter().copied()))
        .with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
}

#[tokio::test]
async fn test_config_credentials_win_over_env() -> Result<()> {
    init();
    let ctx = context(
        &[
            (config_keys::ACCESS_KEY_ID, "AKIDCONFIG"),
            (config_keys::SECRET_ACCESS_KEY, "config-secret"),
        ],
        &[
            ("AWS_ACCESS_KEY_ID", "AKIDENV"),
            ("AWS_SECRET_ACCESS_KEY", "env-secret"),
        ],
    );

    let cred = DefaultCredentialProvider::new()
        .provide_credential(&ctx)
        .await?
        .expect("credential must be loaded");
    assert_eq!(cred.access_key_id, "AKIDCONFIG");
    Ok(())
}

#[tokio::test]
async fn test_partial_config_falls_through_to_env() -> Result<()> {
    init();
    let ctx = context(
        &[(config_keys::ACCESS_KEY_ID, "AKIDCONFIG")],
        &[
            ("AWS_ACCESS_KEY_ID", "AKIDENV"),
            ("AWS_SECRET_ACCESS_KEY", "env-secret"),
            ("AWS_SESSION_TOKEN", "env-token"),
        ],
    );

    let cred = DefaultCredentialProvider::new()
        .provide_credential(&ctx)
        .await?
        .expect("credential must be loaded");
    assert_eq!(cred.access_key_id, "AKIDENV");
    assert_eq!(cred.session_token.as_deref(), Some("env-token"));
    Ok(())
}

#[tokio::test]
async fn test_nothing_configured() -> Result<()> {
    init();
    let ctx = context(&[], &[]);
    assert!(DefaultCredentialProvider::new()
        .provide_credential(&ctx)
        .await?
        .is_none());
    Ok(())
}

#[tokio::test]
async fn test_custom_chain_signs_request() -> Result<()> {
    init();
    let ctx = context(&[], &[]);
    let chain = ProvideCredentialChain::new().push(
        StaticCredentialProvider::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
    );
    let cred: Credential = DefaultCredentialProvider::with_chain(chain)
        .provide_credential(&ctx)
        .await?
        .expect("credential must be loaded");

    let signer = RequestSigner::new(BRAKET_SERVICE, "us-east-1")
        .with_time(parse_rfc3339("2024-01-15T12:30:45Z")?);
    let signed = signer.sign(
        &Method::POST,
        "/quantum-tasks",
        Some(&json!({"maxResults": 10})),
        &cred,
    )?;
    debug!("signed request: {:?}", signed.headers);

    assert_eq!(signed.body, r#"{"maxResults":10}"#);
    assert_eq!(
        signed.headers["authorization"],
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240115/us-east-1/braket/aws4_request, \
         SignedHeaders=content-type;host;x-amz-content-sha256;x-amz-date, \
         Signature=2df2a8e39514f382c60f4f12b83abeb2841ebe5fd71cfab4d8eb43a81435eb60"
    );
    Ok(())
}
