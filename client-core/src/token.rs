//! Bearer token decoding.
//!
//! The client only reads claims; it never verifies the signature. The
//! gateway does that on every protected call and answers 401 if the token
//! was tampered with.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DecodeError;
use crate::state::User;

/// Claims embedded in a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Granted roles; the user service emits either a list or a comma-joined string
    #[serde(default, deserialize_with = "roles_claim")]
    pub roles: Vec<String>,
    /// Expiration timestamp (seconds)
    pub exp: i64,
    /// Issued at timestamp (seconds)
    #[serde(default)]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// A token is live only while its expiry is strictly after `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    pub fn user(&self) -> User {
        User {
            username: self.sub.clone(),
            roles: self.roles.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RolesClaim {
    List(Vec<String>),
    Joined(String),
}

fn roles_claim<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let roles = match Option::<RolesClaim>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(RolesClaim::List(roles)) => roles,
        Some(RolesClaim::Joined(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(str::to_string)
            .collect(),
    };
    Ok(roles)
}

/// Decode the claims of a compact JWS without checking its signature.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::Malformed(segments.len()));
    }

    let payload = URL_SAFE_NO_PAD.decode(segments[1].trim_end_matches('='))?;
    Ok(serde_json::from_slice(&payload)?)
}

/// Fail-closed expiry check: anything that does not decode counts as expired.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode(token) {
        Ok(claims) => claims.is_expired_at(now),
        Err(err) => {
            tracing::debug!(error = %err, "Treating undecodable token as expired");
            true
        }
    }
}


#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::testing::{mint, mint_raw};
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    #[test]
    fn test_decode_signed_token() {
        let token = mint("alice", &["ROLE_USER"], 2_000_000_000);
        let claims = decode(&token).expect("should decode token");

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.roles, vec!["ROLE_USER".to_string()]);
        assert_eq!(claims.exp, 2_000_000_000);
        assert_eq!(claims.user().username, "alice");
    }

    #[test]
    fn test_decode_comma_joined_roles() {
        let token = mint_raw(json!({ "sub": "bob", "roles": "ROLE_USER, ROLE_SUPPLIER", "exp": 10 }));
        let claims = decode(&token).expect("should decode token");
        assert_eq!(claims.roles, vec!["ROLE_USER", "ROLE_SUPPLIER"]);
    }

    #[test]
    fn test_decode_without_roles() {
        let token = mint_raw(json!({ "sub": "carol", "exp": 10 }));
        assert!(decode(&token).expect("should decode token").roles.is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("not-a-token"), Err(DecodeError::Malformed(1))));
        assert!(matches!(decode("a.!!!.c"), Err(DecodeError::Base64(_))));

        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"plain text"));
        assert!(matches!(decode(&not_json), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_missing_exp_is_a_decode_error() {
        let token = mint_raw(json!({ "sub": "dave" }));
        assert!(decode(&token).is_err());
        assert!(is_expired(&token, at(0)));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let token = mint("alice", &[], 1_000);
        assert!(!is_expired(&token, at(999)));
        assert!(is_expired(&token, at(1_000)));
        assert!(is_expired(&token, at(1_001)));
    }

    #[test]
    fn test_undecodable_token_is_expired() {
        assert!(is_expired("", at(0)));
        assert!(is_expired("x.y.z", at(0)));
    }
}
