// src/source/credentials.rs
//
// Service-account bundle (the JSON key file downloaded from the cloud console)
// and the signed JWT assertion exchanged for an access token.

use std::fmt;
use std::fs;
use std::path::Path;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use super::SourceError;
use crate::config::consts::{DEFAULT_TOKEN_URI, SHEETS_SCOPE};

/// Lifetime of a signed assertion; the token endpoint rejects anything above one hour.
const ASSERTION_TTL_SECS: u64 = 3600;

#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    s!(DEFAULT_TOKEN_URI)
}

// Never print the key.
impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

impl ServiceAccount {
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path).map_err(|e| SourceError::Credentials {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&text).map_err(|reason| SourceError::Credentials {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let account: ServiceAccount = serde_json::from_str(text).map_err(|e| e.to_string())?;
        if account.client_email.trim().is_empty() {
            return Err(s!("client_email is empty"));
        }
        if !account.private_key.contains("PRIVATE KEY") {
            return Err(s!("private_key is not a PEM key"));
        }
        Ok(account)
    }

    /// RS256 assertion for the spreadsheets scope, valid from `now` (unix secs).
    pub fn signed_assertion(&self, now: u64) -> Result<String, SourceError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| SourceError::Auth(format!("invalid private key: {e}")))?;

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let claims = Claims {
            iss: &self.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };

        jsonwebtoken::encode(&header, &claims, &key)
            .map_err(|e| SourceError::Auth(format!("cannot sign assertion: {e}")))
    }
}
