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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_SHOTS: u64 = 100;

// Endpoints.
pub const QUANTUM_TASKS_PATH: &str = "/quantum-tasks";
pub const DEVICES_PATH: &str = "/devices";
pub const JOBS_PATH: &str = "/jobs";

/// Characters kept as-is when a resource identifier is placed in a path
/// segment: alphanumerics and `-_.!~*'()`.
///
/// Everything else, including `:` and `/` inside ARNs, is percent-encoded.
pub static PATH_SEGMENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// OpenQASM 3 source of the two-qubit Bell state used when a task is created
/// without an explicit action.
pub const BELL_STATE_SOURCE: &str =
    "OPENQASM 3;\nqubit[2] q;\nbit[2] c;\nh q[0];\ncnot q[0], q[1];\nc = measure q;";
