//! Credential Extraction
//!
//! Credentials arrive as `u`/`p` query parameters or as a Basic
//! Authentication header; nothing else is accepted. Extraction never logs or
//! stores the password.

use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

/// A transient username/password pair, dropped once the request is resolved.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Manual Debug so the password cannot end up in a log line.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Malformed Authorization header.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("invalid Basic Authentication header")]
    MalformedHeader,

    #[error("invalid Base64 encoding")]
    BadEncoding,

    #[error("invalid Basic Authentication value")]
    MalformedValue,
}

/// The `u`/`p` query parameters, deserialized alongside whatever else an
/// endpoint carries in its query string.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CredentialParams {
    #[serde(default)]
    pub u: Option<String>,
    #[serde(default)]
    pub p: Option<String>,
}

/// Extract credentials from query parameters or the Authorization header.
///
/// Non-empty `u` and `p` query parameters win and skip header parsing
/// entirely. A missing header is not an error; `Ok(None)` lets the caller
/// decide whether anonymous is acceptable.
pub fn extract(
    params: &CredentialParams,
    headers: &HeaderMap,
) -> Result<Option<Credentials>, CredentialError> {
    if let (Some(username), Some(password)) = (params.u.as_deref(), params.p.as_deref()) {
        if !username.is_empty() && !password.is_empty() {
            return Ok(Some(Credentials {
                username: username.to_string(),
                password: password.to_string(),
            }));
        }
    }

    let Some(auth) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let auth = auth.to_str().map_err(|_| CredentialError::MalformedHeader)?;

    let fields: Vec<&str> = auth.split(' ').collect();
    if fields.len() != 2 {
        return Err(CredentialError::MalformedHeader);
    }

    let decoded = BASE64
        .decode(fields[1])
        .map_err(|_| CredentialError::BadEncoding)?;
    let decoded = String::from_utf8(decoded).map_err(|_| CredentialError::MalformedValue)?;

    let fields: Vec<&str> = decoded.split(':').collect();
    if fields.len() != 2 {
        return Err(CredentialError::MalformedValue);
    }

    Ok(Some(Credentials {
        username: fields[0].to_string(),
        password: fields[1].to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_header(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    fn params(u: Option<&str>, p: Option<&str>) -> CredentialParams {
        CredentialParams {
            u: u.map(String::from),
            p: p.map(String::from),
        }
    }

    #[test]
    fn test_query_params_win_over_header() {
        let headers = basic_header("Basic ignored-and-not-even-valid");
        let creds = extract(&params(Some("root"), Some("secret")), &headers)
            .unwrap()
            .unwrap();
        assert_eq!(creds.username, "root");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn test_empty_query_params_fall_through_to_header() {
        let encoded = BASE64.encode("root:secret");
        let headers = basic_header(&format!("Basic {encoded}"));
        let creds = extract(&params(Some(""), Some("")), &headers)
            .unwrap()
            .unwrap();
        assert_eq!(creds.username, "root");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn test_basic_header_round_trip() {
        // exactly two colon-separated fields are required
        let encoded = BASE64.encode("root:s3cr:et");
        let headers = basic_header(&format!("Basic {encoded}"));
        assert_eq!(
            extract(&CredentialParams::default(), &headers),
            Err(CredentialError::MalformedValue)
        );

        let encoded = BASE64.encode("root:secret");
        let headers = basic_header(&format!("Basic {encoded}"));
        let creds = extract(&CredentialParams::default(), &headers)
            .unwrap()
            .unwrap();
        assert_eq!(creds.username, "root");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn test_missing_header_is_not_an_error() {
        let headers = HeaderMap::new();
        assert_eq!(extract(&CredentialParams::default(), &headers), Ok(None));
    }

    #[test]
    fn test_wrong_token_count() {
        for value in ["Basic", "Basic a b"] {
            let headers = basic_header(value);
            assert_eq!(
                extract(&CredentialParams::default(), &headers),
                Err(CredentialError::MalformedHeader),
                "value: {value}"
            );
        }
    }

    #[test]
    fn test_invalid_base64() {
        let headers = basic_header("Basic !!!not-base64!!!");
        assert_eq!(
            extract(&CredentialParams::default(), &headers),
            Err(CredentialError::BadEncoding)
        );
    }

    #[test]
    fn test_decoded_value_without_colon() {
        let encoded = BASE64.encode("no-colon-here");
        let headers = basic_header(&format!("Basic {encoded}"));
        assert_eq!(
            extract(&CredentialParams::default(), &headers),
            Err(CredentialError::MalformedValue)
        );
    }

    #[test]
    fn test_debug_never_prints_password() {
        let creds = Credentials {
            username: "root".to_string(),
            password: "secret".to_string(),
        };
        let printed = format!("{creds:?}");
        assert!(!printed.contains("secret"));
    }
}
