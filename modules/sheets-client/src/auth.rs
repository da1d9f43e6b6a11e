use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::error::{Result, SheetsError};

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// How long before expiry a cached token is considered stale.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The relevant fields of a Google service-account key file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Load and parse a service-account JSON key file.
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SheetsError::Auth(format!("cannot read key file {path}: {e}")))?;
        serde_json::from_str(&raw)
            .map_err(|e| SheetsError::Auth(format!("malformed key file {path}: {e}")))
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Exchanges a signed service-account JWT for a bearer token and caches it
/// until shortly before expiry.
pub struct TokenProvider {
    key: ServiceAccountKey,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(key: ServiceAccountKey, scope: impl Into<String>) -> Self {
        Self {
            key,
            scope: scope.into(),
            cached: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, minting a fresh one if needed.
    pub async fn token(&self, client: &reqwest::Client) -> Result<String> {
        let now = Utc::now();
        {
            let guard = self.cached.lock().expect("token cache poisoned");
            if let Some(tok) = guard.as_ref() {
                if tok.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now {
                    return Ok(tok.value.clone());
                }
            }
        }

        let assertion = self.sign_assertion(now)?;

        let resp = client
            .post(&self.key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", &assertion)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Auth(format!(
                "token exchange failed (status {}): {body}",
                status.as_u16()
            )));
        }

        let tok: TokenResponse = resp.json().await?;
        tracing::debug!(expires_in = tok.expires_in, "Minted fresh access token");

        let cached = CachedToken {
            value: tok.access_token,
            expires_at: now + Duration::seconds(tok.expires_in),
        };
        let value = cached.value.clone();
        *self.cached.lock().expect("token cache poisoned") = Some(cached);
        Ok(value)
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: &self.scope,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| SheetsError::Auth(format!("invalid private key: {e}")))?;
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| SheetsError::Auth(format!("cannot sign assertion: {e}")))
    }
}
