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

use crate::constants::{
    BRAKET_SERVICE, CONTENT_TYPE_JSON, SCOPE_TERMINATOR, SIGNING_ALGORITHM, X_AMZ_CONTENT_SHA_256,
    X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};
use crate::Credential;
use braketctl_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256_chain, Sha256Output};
use braketctl_core::time::{format_date, format_iso8601, now, DateTime};
use braketctl_core::{Error, Result, SigningCredential};
use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use http::Method;
use log::debug;
use serde::Serialize;
use std::fmt::Write;

/// RequestSigner that implement AWS SigV4 for JSON APIs.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signed header set is fixed: `content-type`, `host`, `x-amz-date`,
/// `x-amz-content-sha256` and, for temporary credentials,
/// `x-amz-security-token`. Query strings are never part of the canonical
/// request.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

/// The output of [`RequestSigner::sign`].
///
/// Every header in `headers` and the exact bytes of `body` are covered by the
/// signature, so they must be transmitted unmodified.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: Method,
    /// Endpoint URL: `https://<host><path>`.
    pub url: String,
    /// Headers to send, including `authorization`.
    pub headers: HeaderMap,
    /// Serialized body that was hashed, empty when no body was given.
    pub body: String,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new(BRAKET_SERVICE, "us-east-1")
    }
}

impl RequestSigner {
    /// Create a new signer for `service` in `region`.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Region this signer scopes signatures to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Host of the service endpoint: `<service>.<region>.amazonaws.com`.
    pub fn host(&self) -> String {
        format!("{}.{}.amazonaws.com", self.service, self.region)
    }

    /// Sign a request.
    ///
    /// `path` must be absolute and already percent-encoded; it is used in
    /// the canonical request as given. `body` is serialized once to JSON and
    /// that string is both hashed and returned for transmission.
    pub fn sign<T>(
        &self,
        method: &Method,
        path: &str,
        body: Option<&T>,
        cred: &Credential,
    ) -> Result<SignedRequest>
    where
        T: Serialize + ?Sized,
    {
        if !matches!(*method, Method::GET | Method::POST | Method::PUT) {
            return Err(Error::request_invalid(format!(
                "method {method} is not supported for signing"
            )));
        }
        if !path.starts_with('/') {
            return Err(Error::request_invalid(format!(
                "request path must be absolute, got '{path}'"
            )));
        }
        if !cred.is_valid() {
            return Err(Error::credential_missing(
                "access key id and secret access key are required for signing",
            ));
        }

        let now = self.time.unwrap_or_else(now);
        let host = self.host();

        let body = match body {
            Some(v) => serde_json::to_string(v).map_err(|e| {
                Error::request_invalid("failed to serialize request body").with_source(e)
            })?,
            None => String::new(),
        };
        let content_hash = hex_sha256(body.as_bytes());

        let mut headers = canonicalize_header(&host, &content_hash, cred, now)?;
        let signed_headers = header_name_to_vec_sorted(&headers);

        // build canonical request and string to sign.
        let creq = canonical_request_string(method, path, &headers, &signed_headers, &content_hash)?;
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/{}",
            format_date(now),
            self.region,
            self.service,
            SCOPE_TERMINATOR
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{SIGNING_ALGORITHM}")?;
            writeln!(f, "{}", format_iso8601(now))?;
            writeln!(f, "{}", &scope)?;
            write!(f, "{}", &encoded_req)?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(&cred.secret_access_key, now, &self.region, &self.service);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            SIGNING_ALGORITHM,
            cred.access_key_id,
            scope,
            signed_headers.join(";"),
            signature
        ))?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);

        Ok(SignedRequest {
            method: method.clone(),
            url: format!("https://{host}{path}"),
            headers,
            body,
        })
    }
}

fn canonicalize_header(
    host: &str,
    content_hash: &str,
    cred: &Credential,
    now: DateTime,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(6);

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(CONTENT_TYPE_JSON),
    );
    headers.insert(header::HOST, HeaderValue::from_str(host)?);
    headers.insert(
        HeaderName::from_static(X_AMZ_DATE),
        HeaderValue::try_from(format_iso8601(now))?,
    );
    headers.insert(
        HeaderName::from_static(X_AMZ_CONTENT_SHA_256),
        HeaderValue::from_str(content_hash)?,
    );

    // Only temporary credentials carry a token; the header is omitted entirely otherwise.
    if let Some(token) = &cred.session_token {
        let mut value = HeaderValue::from_str(token)?;
        // Set token value sensitive to avoid leaking.
        value.set_sensitive(true);

        headers.insert(HeaderName::from_static(X_AMZ_SECURITY_TOKEN), value);
    }

    Ok(headers)
}

/// Header names in lexicographic order.
///
/// `HeaderName` is always lowercase, so byte order is the order the service
/// verifies against.
fn header_name_to_vec_sorted(headers: &HeaderMap) -> Vec<&str> {
    let mut names: Vec<&str> = headers.keys().map(|k| k.as_str()).collect();
    names.sort_unstable();
    names
}

fn canonical_request_string(
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    signed_headers: &[&str],
    content_hash: &str,
) -> Result<String> {
    // 512 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(512);

    // Insert method
    writeln!(f, "{method}")?;
    // Insert path as given
    writeln!(f, "{path}")?;
    // Query is never signed.
    writeln!(f)?;
    // Insert signed headers
    for name in signed_headers {
        writeln!(f, "{}:{}", name, headers[*name].to_str()?)?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;
    write!(f, "{content_hash}")?;

    Ok(f)
}

fn generate_signing_key(
    secret: &str,
    time: DateTime,
    region: &str,
    service: &str,
) -> Sha256Output {
    let secret = format!("AWS4{secret}");
    let date = format_date(time);

    hmac_sha256_chain(
        secret.as_bytes(),
        &[
            date.as_bytes(),
            region.as_bytes(),
            service.as_bytes(),
            SCOPE_TERMINATOR.as_bytes(),
        ],
    )
}
