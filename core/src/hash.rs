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

//! SHA-256 and HMAC-SHA256 helpers used by request signing.

use hmac::Hmac;
use hmac::Mac;
use sha2::Digest;
use sha2::Sha256;

/// A raw 32 byte SHA-256 output.
pub type Sha256Output = [u8; 32];

/// SHA-256 of `content`, lowercase hex encoded.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// HMAC-SHA256 of `content` under `key`.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Sha256Output {
    let mut mac = new_mac(key);
    mac.update(content);

    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// HMAC-SHA256 of `content` under `key`, lowercase hex encoded.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    hex::encode(hmac_sha256(key, content))
}

/// Fold `parts` into a key: each part is MACed under the output of the
/// previous step, starting from `key`.
///
/// `hmac_sha256_chain(k, &[a, b])` equals `hmac_sha256(&hmac_sha256(k, a), b)`.
pub fn hmac_sha256_chain(key: &[u8], parts: &[&[u8]]) -> Sha256Output {
    let Some((first, rest)) = parts.split_first() else {
        return hmac_sha256(key, &[]);
    };

    rest.iter()
        .fold(hmac_sha256(key, first), |acc, part| hmac_sha256(&acc, part))
}

fn new_mac(key: &[u8]) -> Hmac<Sha256> {
    // HMAC accepts keys of any length, longer ones are hashed first.
    Hmac::<Sha256>::new_from_slice(key).unwrap()
}
