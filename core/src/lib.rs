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

//! Core components shared by the braketctl crates.
//!
//! This crate holds the pieces that both the request signer and the
//! authenticated Braket client depend on, without pulling in any transport
//! or storage implementation.
//!
//! ## Overview
//!
//! - **Context**: A container for the injected collaborators: HTTP transport, environment access and the key-value config store
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`) and credential validation (`SigningCredential`)
//! - **Error**: A single error type whose kind tells the caller how a failure should be reported
//!
//! ## Example
//!
//! ```
//! use braketctl_core::{ConfigStore, Context, MemoryConfigStore, StaticEnv};
//!
//! let store = MemoryConfigStore::default();
//! store.set("region", "eu-west-2")?;
//!
//! let ctx = Context::new()
//!     .with_env(StaticEnv::default())
//!     .with_config_store(store);
//!
//! assert_eq!(ctx.config_get("region")?.as_deref(), Some("eu-west-2"));
//! # Ok::<(), braketctl_core::Error>(())
//! ```
//!
//! ## Traits
//!
//! - [`HttpSend`]: For sending HTTP requests
//! - [`Env`]: For environment variable access
//! - [`ConfigStore`]: For reading and writing persisted settings
//! - [`ProvideCredential`]: For loading credentials from various sources
//! - [`SigningCredential`]: For validating credentials
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod http;
pub use http::HttpSend;
mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;
mod config;
pub use config::ConfigStore;
pub use config::MemoryConfigStore;
pub use config::keys as config_keys;

mod api;
pub use api::{ProvideCredential, SigningCredential};

mod error;
pub use error::{Error, ErrorKind, Result};
