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

use crate::Credential;
use async_trait::async_trait;
use braketctl_core::config_keys::{ACCESS_KEY_ID, SECRET_ACCESS_KEY, SESSION_TOKEN};
use braketctl_core::{Context, ProvideCredential, Result};

/// ConfigCredentialProvider loads credentials from the context's config store.
///
/// This provider reads the following keys:
/// - `accessKeyId`: The AWS access key ID
/// - `secretAccessKey`: The AWS secret access key
/// - `sessionToken`: The AWS session token (optional)
///
/// The store is read on every call so values written by `config set` apply
/// to the next request.
#[derive(Debug, Default, Clone)]
pub struct ConfigCredentialProvider;

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(Credential::from_parts(
            ctx.config_get(ACCESS_KEY_ID)?,
            ctx.config_get(SECRET_ACCESS_KEY)?,
            ctx.config_get(SESSION_TOKEN)?,
        ))
    }
}
