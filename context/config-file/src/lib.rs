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

//! [`ConfigStore`] implementation persisted as a TOML file.
//!
//! The file is a flat table of string values:
//!
//! ```toml
//! accessKeyId = "AKIDEXAMPLE"
//! region = "us-west-2"
//! secretAccessKey = "..."
//! ```

use braketctl_core::{ConfigStore, Env, Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Env value that overrides the config file location.
pub const BRAKET_CONFIG_FILE: &str = "BRAKET_CONFIG_FILE";

/// Default location relative to the user's home directory.
const DEFAULT_CONFIG_PATH: &str = ".config/braketctl/config.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct ConfigFile {
    values: BTreeMap<String, String>,
}

/// FileConfigStore reads and writes a TOML file on every call.
///
/// A missing file reads as empty. A file that exists but cannot be read or
/// parsed fails every call with `ErrorKind::ConfigInvalid`. Nothing is cached, so separate processes see each other's writes. Writes
/// replace the whole file; concurrent `set` calls from different processes
/// may race and the last one wins.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file and its parent directories are created on the first `set`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the default location.
    ///
    /// - `$BRAKET_CONFIG_FILE` if set and non-empty.
    /// - `~/.config/braketctl/config.toml` otherwise.
    pub fn from_default_location(env: &dyn Env) -> Result<Self> {
        if let Some(path) = env.var(BRAKET_CONFIG_FILE).filter(|v| !v.is_empty()) {
            return Ok(Self::new(path));
        }

        let home = home::home_dir().ok_or_else(|| {
            Error::config_invalid(format!(
                "cannot locate home directory, set {BRAKET_CONFIG_FILE} to choose a config file"
            ))
        })?;
        Ok(Self::new(home.join(DEFAULT_CONFIG_PATH)))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ConfigFile> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("config file {} not found, using empty config", self.path.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(Error::config_invalid(format!(
                    "failed to read config file {}",
                    self.path.display()
                ))
                .with_source(e))
            }
        };

        toml::from_str(&content).map_err(|e| {
            Error::config_invalid(format!(
                "config file {} is not valid TOML",
                self.path.display()
            ))
            .with_source(e)
        })
    }

    fn store(&self, file: &ConfigFile) -> Result<()> {
        let content = toml::to_string(file).map_err(|e| {
            Error::unexpected("failed to serialize config").with_source(e)
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.values.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut file = self.load()?;
        file.values.insert(key.to_string(), value.to_string());
        self.store(&file)?;
        debug!("config key {key} written to {}", self.path.display());
        Ok(())
    }

    fn list(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.load()?.values)
    }
}
