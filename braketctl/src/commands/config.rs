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

//! `braket config` implementation.

use anyhow::Result;
use braketctl_core::utils::Redact;
use braketctl_core::{config_keys, Context, Error};
use clap::Subcommand;
use console::style;

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Store a setting
    Set {
        /// One of accessKeyId, secretAccessKey, sessionToken, region,
        /// outputS3Bucket, outputS3KeyPrefix
        key: String,
        value: String,
    },

    /// Print a setting
    Get { key: String },

    /// Print all settings, secrets redacted
    List,
}

/// Execute the config command.
pub fn execute(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { key, value } => {
            check_key(&key)?;
            ctx.config_set(&key, &value)?;
            println!("{} {key} saved", style("✓").green());
        }
        ConfigAction::Get { key } => {
            check_key(&key)?;
            match ctx.config_get(&key)? {
                Some(value) => println!("{}", display_value(&key, &value)),
                None => println!("{}", style("(not set)").dim()),
            }
        }
        ConfigAction::List => {
            let values = ctx.config_list()?;
            if values.is_empty() {
                println!("{}", style("No settings stored.").dim());
            }
            for (key, value) in &values {
                println!("{} = {}", style(key).bold(), display_value(key, value));
            }
        }
    }
    Ok(())
}

fn check_key(key: &str) -> braketctl_core::Result<()> {
    if config_keys::ALL.contains(&key) {
        Ok(())
    } else {
        Err(Error::config_invalid(format!(
            "Unknown config key: {key}. Valid keys: {}",
            config_keys::ALL.join(", ")
        )))
    }
}

fn display_value(key: &str, value: &str) -> String {
    if config_keys::SECRETS.contains(&key) {
        Redact::from(value).to_string()
    } else {
        value.to_string()
    }
}
