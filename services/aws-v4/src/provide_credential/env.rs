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

use crate::constants::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN};
use crate::Credential;
use async_trait::async_trait;
use braketctl_core::{Context, ProvideCredential, Result};

/// Loads credentials from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
/// the optional `AWS_SESSION_TOKEN`.
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(Credential::from_parts(
            ctx.env_var(AWS_ACCESS_KEY_ID),
            ctx.env_var(AWS_SECRET_ACCESS_KEY),
            ctx.env_var(AWS_SESSION_TOKEN),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use braketctl_core::StaticEnv;
    use test_case::test_case;

    async fn load(pairs: &[(&str, &str)]) -> Option<Credential> {
        let ctx = Context::new().with_env(StaticEnv::from_pairs(pairs.iter().copied()));
        EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .expect("env provider never fails")
    }

    #[tokio::test]
    async fn test_env_credential_provider() {
        let cred = load(&[
            (AWS_ACCESS_KEY_ID, "AKIDENV"),
            (AWS_SECRET_ACCESS_KEY, "env-secret"),
            (AWS_SESSION_TOKEN, "env-token"),
        ])
        .await
        .expect("credential must be loaded");

        assert_eq!(cred.access_key_id, "AKIDENV");
        assert_eq!(cred.secret_access_key, "env-secret");
        assert_eq!(cred.session_token.as_deref(), Some("env-token"));
    }

    #[test_case(&[]; "nothing set")]
    #[test_case(&[(AWS_ACCESS_KEY_ID, "AKIDENV")]; "secret missing")]
    #[test_case(&[(AWS_ACCESS_KEY_ID, "AKIDENV"), (AWS_SECRET_ACCESS_KEY, "")]; "secret empty")]
    #[test_case(&[(AWS_SECRET_ACCESS_KEY, "env-secret"), (AWS_SESSION_TOKEN, "t")]; "key id missing")]
    #[tokio::test]
    async fn test_env_credential_provider_incomplete(pairs: &[(&str, &str)]) {
        assert!(load(pairs).await.is_none());
    }
}
