//! Request signing.
//!
//! Produces the `EG1-HMAC-SHA256` authorization header the management API
//! requires: a timestamped, nonce-carrying HMAC over the canonical request,
//! with a per-timestamp signing key derived from the client secret and a
//! SHA-256 content hash of POST bodies.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::{Digest, Sha256};
use url::Url;
use uuid::Uuid;

use crate::config::Credentials;

type HmacSha256 = Hmac<Sha256>;

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H:%M:%S+0000";

/// Signs outgoing API requests with the account credentials.
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    /// Create a signer from account credentials.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// The API host the credentials are scoped to.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.credentials.host
    }

    /// Compute the authorization header for a request, stamping it with the
    /// current UTC time and a fresh nonce.
    #[must_use]
    pub fn authorization(&self, method: &Method, url: &Url, body: &[u8]) -> String {
        let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let nonce = Uuid::new_v4().to_string();
        self.authorization_at(method, url, body, &timestamp, &nonce)
    }

    /// Compute the authorization header for the given timestamp and nonce.
    pub(crate) fn authorization_at(
        &self,
        method: &Method,
        url: &Url,
        body: &[u8],
        timestamp: &str,
        nonce: &str,
    ) -> String {
        let prefix = format!(
            "EG1-HMAC-SHA256 client_token={};access_token={};timestamp={};nonce={};",
            self.credentials.client_token, self.credentials.access_token, timestamp, nonce
        );
        let data = self.data_to_sign(method, url, body, &prefix);
        let signing_key = hmac_base64(self.credentials.client_secret.as_bytes(), timestamp.as_bytes());
        let signature = hmac_base64(signing_key.as_bytes(), data.as_bytes());
        format!("{prefix}signature={signature}")
    }

    /// Canonical tab-separated request representation:
    /// method, scheme, host, path+query, signed headers (none), content
    /// hash, and the authorization header up to the signature field.
    fn data_to_sign(&self, method: &Method, url: &Url, body: &[u8], auth_prefix: &str) -> String {
        let path_and_query = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        format!(
            "{}\t{}\t{}\t{}\t\t{}\t{}",
            method.as_str(),
            url.scheme(),
            url.host_str().unwrap_or_default(),
            path_and_query,
            self.content_hash(method, body),
            auth_prefix
        )
    }

    /// Base64 SHA-256 of the POST body, truncated to `max_body` bytes.
    /// Empty for other methods and empty bodies.
    fn content_hash(&self, method: &Method, body: &[u8]) -> String {
        if *method != Method::POST || body.is_empty() {
            return String::new();
        }
        let limit = body.len().min(self.credentials.max_body);
        BASE64.encode(Sha256::digest(&body[..limit]))
    }
}

fn hmac_base64(key: &[u8], data: &[u8]) -> String {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    BASE64.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_BODY;

    fn test_signer() -> Signer {
        Signer::new(Credentials {
            client_token: "akab-client".into(),
            client_secret: "secret".into(),
            access_token: "akab-access".into(),
            host: "manage.example-api.net".into(),
            max_body: DEFAULT_MAX_BODY,
        })
    }

    const TS: &str = "20240101T00:00:00+0000";
    const NONCE: &str = "4f81e4a6-7c6e-4a9e-8f0b-000000000001";

    #[test]
    fn header_carries_credentials_and_signature() {
        let signer = test_signer();
        let url = Url::parse("https://manage.example-api.net/crux/v1/mgmt-pop/apps").unwrap();
        let header = signer.authorization_at(&Method::GET, &url, b"", TS, NONCE);

        assert!(header.starts_with("EG1-HMAC-SHA256 client_token=akab-client;"));
        assert!(header.contains("access_token=akab-access;"));
        assert!(header.contains(&format!("timestamp={TS};")));
        assert!(header.contains(&format!("nonce={NONCE};")));
        assert!(header.contains(";signature="));
    }

    #[test]
    fn signature_is_deterministic() {
        let signer = test_signer();
        let url = Url::parse("https://manage.example-api.net/crux/v1/mgmt-pop/apps?limit=0").unwrap();
        let first = signer.authorization_at(&Method::GET, &url, b"", TS, NONCE);
        let second = signer.authorization_at(&Method::GET, &url, b"", TS, NONCE);
        assert_eq!(first, second);
    }

    #[test]
    fn signature_changes_with_secret() {
        let signer = test_signer();
        let other = Signer::new(Credentials {
            client_token: "akab-client".into(),
            client_secret: "different".into(),
            access_token: "akab-access".into(),
            host: "manage.example-api.net".into(),
            max_body: DEFAULT_MAX_BODY,
        });

        let url = Url::parse("https://manage.example-api.net/crux/v1/mgmt-pop/apps").unwrap();
        let a = signer.authorization_at(&Method::GET, &url, b"", TS, NONCE);
        let b = other.authorization_at(&Method::GET, &url, b"", TS, NONCE);
        assert_ne!(a, b);
    }

    #[test]
    fn signature_covers_query_string() {
        let signer = test_signer();
        let plain = Url::parse("https://manage.example-api.net/crux/v1/mgmt-pop/apps").unwrap();
        let scoped =
            Url::parse("https://manage.example-api.net/crux/v1/mgmt-pop/apps?contractId=C-1")
                .unwrap();
        let a = signer.authorization_at(&Method::GET, &plain, b"", TS, NONCE);
        let b = signer.authorization_at(&Method::GET, &scoped, b"", TS, NONCE);
        assert_ne!(a, b);
    }

    #[test]
    fn post_body_is_hashed_into_signature() {
        let signer = test_signer();
        let url = Url::parse("https://manage.example-api.net/crux/v1/mgmt-pop/apps").unwrap();
        let a = signer.authorization_at(&Method::POST, &url, br#"{"name":"a"}"#, TS, NONCE);
        let b = signer.authorization_at(&Method::POST, &url, br#"{"name":"b"}"#, TS, NONCE);
        assert_ne!(a, b);
    }

    #[test]
    fn get_body_is_not_hashed() {
        let signer = test_signer();
        let url = Url::parse("https://manage.example-api.net/crux/v1/mgmt-pop/apps").unwrap();
        let a = signer.authorization_at(&Method::GET, &url, b"ignored", TS, NONCE);
        let b = signer.authorization_at(&Method::GET, &url, b"also-ignored", TS, NONCE);
        assert_eq!(a, b);
    }

    #[test]
    fn content_hash_respects_max_body() {
        let signer = Signer::new(Credentials {
            client_token: "akab-client".into(),
            client_secret: "secret".into(),
            access_token: "akab-access".into(),
            host: "manage.example-api.net".into(),
            max_body: 4,
        });
        let url = Url::parse("https://manage.example-api.net/crux/v1/mgmt-pop/apps").unwrap();

        // Bodies sharing a 4-byte prefix hash identically under max_body=4.
        let a = signer.authorization_at(&Method::POST, &url, b"abcdXXXX", TS, NONCE);
        let b = signer.authorization_at(&Method::POST, &url, b"abcdYYYY", TS, NONCE);
        assert_eq!(a, b);
    }

    #[test]
    fn live_header_uses_current_timestamp_shape() {
        let signer = test_signer();
        let url = Url::parse("https://manage.example-api.net/crux/v1/mgmt-pop/pops").unwrap();
        let header = signer.authorization(&Method::GET, &url, b"");
        // 20240101T00:00:00+0000 — 8 digits, 'T', 8 clock chars, zone.
        let ts = header
            .split("timestamp=")
            .nth(1)
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        assert_eq!(ts.len(), TS.len());
        assert!(ts.ends_with("+0000"));
    }
}
