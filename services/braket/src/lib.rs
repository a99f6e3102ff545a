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

//! Authenticated client for the Amazon Braket API.
//!
//! [`BraketClient`] resolves region and credentials from the injected
//! [`Context`](braketctl_core::Context), signs every call with
//! [`RequestSigner`](braketctl_aws_v4::RequestSigner), sends it through the
//! context's [`HttpSend`](braketctl_core::HttpSend) and classifies failures
//! into [`ErrorKind`](braketctl_core::ErrorKind)s.
//!
//! ```no_run
//! use braketctl_braket::{BraketClient, ListTasks};
//! use braketctl_core::Context;
//!
//! # async fn example(ctx: Context) -> braketctl_core::Result<()> {
//! let client = BraketClient::new(ctx);
//! let tasks = client
//!     .list_tasks(&ListTasks::new().with_status("COMPLETED"))
//!     .await?;
//! println!("{tasks}");
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{BELL_STATE_SOURCE, DEFAULT_MAX_RESULTS, DEFAULT_REGION, DEFAULT_SHOTS};

mod error;
pub use error::{classify_response, credentials_not_configured};

mod model;
pub use model::*;

mod client;
pub use client::BraketClient;
