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

//! AWS SigV4 signer for the Amazon Braket API.
//!
//! [`RequestSigner`] turns a method, a path, an optional JSON body and a
//! [`Credential`] into a [`SignedRequest`]: the endpoint URL, the exact header
//! set the service verifies, and the body string that was hashed. The caller
//! must send that body string verbatim; re-serializing the payload breaks the
//! signature.
//!
//! ```
//! use braketctl_aws_v4::{Credential, RequestSigner};
//! use http::Method;
//!
//! let cred = Credential {
//!     access_key_id: "AKIDEXAMPLE".to_string(),
//!     secret_access_key: "secret".to_string(),
//!     session_token: None,
//! };
//! let signer = RequestSigner::new("braket", "us-east-1");
//! let signed = signer
//!     .sign(&Method::GET, "/jobs", None::<&()>, &cred)
//!     .expect("signing must succeed");
//! assert_eq!(signed.url, "https://braket.us-east-1.amazonaws.com/jobs");
//! assert!(signed.body.is_empty());
//! ```

mod constants;
pub use constants::*;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{RequestSigner, SignedRequest};

mod provide_credential;
pub use provide_credential::*;
