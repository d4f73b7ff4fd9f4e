//! AWS Signature Version 4 request signing
//!
//! Only the subset needed for a single JSON `POST` without query parameters is
//! implemented: canonical request, string to sign, derived signing key and the
//! resulting `Authorization` header.

use crate::domain::TransportError;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Headers produced by signing a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub authorization: String,
    pub amz_date: String,
    pub security_token: Option<String>,
}

/// Signs requests for one service in one region
#[derive(Debug, Clone, Copy)]
pub struct RequestSigner<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub session_token: Option<&'a str>,
    pub region: &'a str,
    pub service: &'a str,
}

impl RequestSigner<'_> {
    /// Sign a `POST` with the given host, canonical path, content type and body
    ///
    /// `canonical_uri` must already be in canonical form (see
    /// [`canonical_path`]).
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the HMAC key is rejected.
    pub fn sign_post(
        &self,
        host: &str,
        canonical_uri: &str,
        content_type: &str,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<SignedHeaders, TransportError> {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = now.format("%Y%m%d").to_string();

        let mut canonical_headers =
            format!("content-type:{content_type}\nhost:{host}\nx-amz-date:{amz_date}\n");
        let mut signed_headers = String::from("content-type;host;x-amz-date");
        if let Some(token) = self.session_token {
            canonical_headers.push_str(&format!("x-amz-security-token:{token}\n"));
            signed_headers.push_str(";x-amz-security-token");
        }

        let canonical_request = format!(
            "POST\n{canonical_uri}\n\n{canonical_headers}\n{signed_headers}\n{}",
            sha256_hex(body)
        );

        let scope = format!(
            "{date_stamp}/{}/{}/aws4_request",
            self.region, self.service
        );
        let string_to_sign = format!(
            "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
            sha256_hex(canonical_request.as_bytes())
        );

        let key = signing_key(self.secret_access_key, &date_stamp, self.region, self.service)?;
        let signature = hex_hmac(&key, string_to_sign.as_bytes())?;

        Ok(SignedHeaders {
            authorization: format!(
                "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
                self.access_key_id
            ),
            amz_date,
            security_token: self.session_token.map(str::to_string),
        })
    }
}

/// Derive the signing key: HMAC chain over date, region, service and terminator
pub fn signing_key(
    secret: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, TransportError> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

/// Percent-encode one path segment, leaving only RFC 3986 unreserved characters
pub fn uri_encode(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Canonical form of an already-encoded path: every segment encoded once more
pub fn canonical_path(path: &str) -> String {
    path.split('/')
        .map(uri_encode)
        .collect::<Vec<_>>()
        .join("/")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, TransportError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| TransportError::AuthenticationFailed(format!("request signing: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hex_hmac(key: &[u8], data: &[u8]) -> Result<String, TransportError> {
    Ok(hmac_sha256(key, data)?
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect())
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
