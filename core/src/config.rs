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

use crate::Result;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Keys understood by the config store.
pub mod keys {
    /// AWS access key id.
    pub const ACCESS_KEY_ID: &str = "accessKeyId";
    /// AWS secret access key.
    pub const SECRET_ACCESS_KEY: &str = "secretAccessKey";
    /// Optional AWS session token for temporary credentials.
    pub const SESSION_TOKEN: &str = "sessionToken";
    /// Region the API calls are sent to.
    pub const REGION: &str = "region";
    /// Default S3 bucket for task results.
    pub const OUTPUT_S3_BUCKET: &str = "outputS3Bucket";
    /// Default S3 key prefix for task results.
    pub const OUTPUT_S3_KEY_PREFIX: &str = "outputS3KeyPrefix";

    /// Every key accepted by `config set`.
    pub const ALL: &[&str] = &[
        ACCESS_KEY_ID,
        SECRET_ACCESS_KEY,
        SESSION_TOKEN,
        REGION,
        OUTPUT_S3_BUCKET,
        OUTPUT_S3_KEY_PREFIX,
    ];

    /// Keys whose values must be redacted when displayed.
    pub const SECRETS: &[&str] = &[SECRET_ACCESS_KEY, SESSION_TOKEN];
}

use keys::{ACCESS_KEY_ID, SECRET_ACCESS_KEY};

/// ConfigStore is the key-value store holding credentials and defaults.
///
/// Reads are synchronous and happen right before each signed call, so a
/// value written by `config set` is picked up by the next command without
/// any caching in between.
pub trait ConfigStore: Debug + Send + Sync + 'static {
    /// Get the value of `key`, `None` if it was never set.
    ///
    /// A store that exists but cannot be read returns `ErrorKind::ConfigInvalid`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set `key` to `value`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// List all stored values ordered by key.
    fn list(&self) -> Result<BTreeMap<String, String>>;

    /// Returns true iff both the access key id and the secret access key are present.
    fn is_configured(&self) -> Result<bool> {
        let present = |key| -> Result<bool> { Ok(self.get(key)?.is_some_and(|v| !v.is_empty())) };
        Ok(present(ACCESS_KEY_ID)? && present(SECRET_ACCESS_KEY)?)
    }
}

/// MemoryConfigStore keeps values in process memory.
///
/// This is useful for testing or for embedding the client with fixed settings.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryConfigStore {
    /// Create a store pre-filled with `values`.
    pub fn from_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: Mutex::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    // Every write is a single insert, so a poisoned map is still consistent.
    fn values(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn list(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.values().clone())
    }
}

/// A no-op ConfigStore that holds nothing and refuses writes.
#[derive(Debug, Copy, Clone)]
pub(crate) struct NoopConfigStore;

impl ConfigStore for NoopConfigStore {
    fn get(&self, _: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, key: &str, _: &str) -> Result<()> {
        Err(crate::Error::config_invalid(format!(
            "no config store configured, cannot set '{key}'"
        )))
    }

    fn list(&self) -> Result<BTreeMap<String, String>> {
        Ok(BTreeMap::new())
    }
}
