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

use braketctl_core::Error;
use http::StatusCode;
use serde_json::Value;

/// The precondition error raised before any network call when the access
/// key pair is incomplete.
pub fn credentials_not_configured() -> Error {
    Error::credential_missing(
        "AWS credentials not configured. Run `braket config set accessKeyId <KEY>` \
         and `braket config set secretAccessKey <SECRET>`",
    )
}

/// Classify a non-2xx response into a typed error.
///
/// - 401 and 403 become authentication failures
/// - 404 becomes not found
/// - 429 becomes rate limited
/// - everything else is a generic api failure carrying the status code and
///   the service message, or the raw body when there is no message field
pub fn classify_response(status: StatusCode, body: &[u8]) -> Error {
    let err = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::authentication_failed("Authentication failed")
        }
        StatusCode::NOT_FOUND => Error::not_found("Resource not found"),
        StatusCode::TOO_MANY_REQUESTS => Error::rate_limited("Rate limit exceeded"),
        _ => Error::api_failure(format!(
            "API error ({}): {}",
            status.as_u16(),
            service_message(status, body)
        )),
    };
    err.with_status(status.as_u16())
}

fn service_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        let message = ["message", "Message"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str));
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let raw = String::from_utf8_lossy(body);
    let raw = raw.trim();
    if raw.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use braketctl_core::ErrorKind;
    use test_case::test_case;

    #[test_case(401, ErrorKind::AuthenticationFailed, "Authentication failed"; "unauthorized")]
    #[test_case(403, ErrorKind::AuthenticationFailed, "Authentication failed"; "forbidden")]
    #[test_case(404, ErrorKind::NotFound, "Resource not found"; "not found")]
    #[test_case(429, ErrorKind::RateLimited, "Rate limit exceeded"; "too many requests")]
    fn test_classified_status(status: u16, kind: ErrorKind, message: &str) {
        let status = StatusCode::from_u16(status).expect("status must be valid");
        let err = classify_response(status, br#"{"message":"ignored"}"#);

        assert_eq!(err.kind(), kind);
        assert_eq!(err.to_string(), message);
        assert_eq!(err.status(), Some(status.as_u16()));
    }

    #[test]
    fn test_generic_failure_uses_message_field() {
        let err = classify_response(
            StatusCode::BAD_REQUEST,
            br#"{"message":"shots must be positive","reason":"INVALID"}"#,
        );
        assert_eq!(err.kind(), ErrorKind::ApiFailure);
        assert_eq!(err.to_string(), "API error (400): shots must be positive");
    }

    #[test]
    fn test_generic_failure_uses_capitalized_message_field() {
        let err = classify_response(
            StatusCode::CONFLICT,
            br#"{"Message":"task already cancelled"}"#,
        );
        assert_eq!(err.to_string(), "API error (409): task already cancelled");
    }

    #[test]
    fn test_generic_failure_falls_back_to_raw_body() {
        let err = classify_response(StatusCode::INTERNAL_SERVER_ERROR, b"upstream exploded\n");
        assert_eq!(err.kind(), ErrorKind::ApiFailure);
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "API error (500): upstream exploded");
    }

    #[test]
    fn test_generic_failure_with_empty_body() {
        let err = classify_response(StatusCode::SERVICE_UNAVAILABLE, b"");
        assert_eq!(err.to_string(), "API error (503): Service Unavailable");
    }

    #[test]
    fn test_precondition_message_names_commands() {
        let err = credentials_not_configured();
        assert_eq!(err.kind(), ErrorKind::CredentialMissing);
        assert!(err.to_string().contains("braket config set accessKeyId"));
        assert!(err.to_string().contains("braket config set secretAccessKey"));
    }
}
