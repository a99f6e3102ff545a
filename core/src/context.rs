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

use crate::config::NoopConfigStore;
use crate::env::NoopEnv;
use crate::{ConfigStore, Env, Error, HttpSend, Result};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context carries the collaborators injected into the client: transport,
/// environment and config store.
///
/// Anything not configured falls back to a no-op: the transport errors, the
/// environment is empty and the config store holds nothing and refuses
/// writes. Tests swap in fixtures without touching the real config file.
///
/// ```
/// use braketctl_core::{Context, MemoryConfigStore, OsEnv};
///
/// let ctx = Context::new()
///     .with_env(OsEnv)
///     .with_config_store(MemoryConfigStore::default());
/// assert!(!ctx.is_configured()?);
/// # Ok::<(), braketctl_core::Error>(())
/// ```
#[derive(Clone)]
pub struct Context {
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
    config: Arc<dyn ConfigStore>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("http", &self.http)
            .field("env", &self.env)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with no-op implementations.
    ///
    /// All components use no-op implementations by default.
    /// Use the `with_*` methods to configure the components you need.
    pub fn new() -> Self {
        Self {
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
            config: Arc::new(NoopConfigStore),
        }
    }

    /// Replace the HTTP client implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the config store implementation.
    pub fn with_config_store(mut self, config: impl ConfigStore) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Send http request and return the response.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Get a value from the config store.
    ///
    /// Empty values are treated as absent. A store that cannot be read is an
    /// error, never an absent value.
    pub fn config_get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.config.get(key)?.filter(|v| !v.is_empty()))
    }

    /// Set a value in the config store.
    #[inline]
    pub fn config_set(&self, key: &str, value: &str) -> Result<()> {
        self.config.set(key, value)
    }

    /// List all values in the config store.
    #[inline]
    pub fn config_list(&self) -> Result<BTreeMap<String, String>> {
        self.config.list()
    }

    /// Returns true iff the config store holds a complete access key pair.
    #[inline]
    pub fn is_configured(&self) -> Result<bool> {
        self.config.is_configured()
    }
}

/// NoopHttpSend is a no-op implementation that always returns an error.
///
/// This is used when no HTTP client is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected(
            "HTTP sending not supported: no HTTP client configured",
        ))
    }
}
