//! Derived session state published by the auth controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::token::Claims;

/// Read-only projection of the current token's claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub roles: Vec<String>,
}

/// Snapshot of the session as views see it.
///
/// `user`, `token` and `expires_at` are set and cleared together.
/// `is_authenticated` is recomputed against the clock on every publication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_authenticated: bool,
    /// Flips to true once, after the stored token has been checked at startup.
    pub initialized: bool,
    /// A login or registration call is in flight.
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub(crate) fn set_session(&mut self, token: String, claims: &Claims) {
        self.user = Some(claims.user());
        self.token = Some(token);
        self.expires_at = claims.expires_at();
    }

    pub(crate) fn clear_session(&mut self) {
        self.user = None;
        self.token = None;
        self.expires_at = None;
        self.is_authenticated = false;
    }

    pub(crate) fn session_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.token.is_some() && self.expires_at.map_or(false, |exp| exp > now)
    }

    pub(crate) fn recompute(&mut self, now: DateTime<Utc>) {
        self.is_authenticated = self.session_valid_at(now);
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn claims(exp: i64) -> Claims {
        Claims {
            sub: "alice".to_string(),
            roles: vec!["ROLE_USER".to_string()],
            exp,
            iat: None,
        }
    }

    #[test]
    fn test_present_but_expired_token_is_not_authenticated() {
        let mut state = AuthState::default();
        state.set_session("t".to_string(), &claims(100));

        state.recompute(Utc.timestamp_opt(99, 0).unwrap());
        assert!(state.is_authenticated);

        state.recompute(Utc.timestamp_opt(100, 0).unwrap());
        assert!(!state.is_authenticated);
        assert!(state.token.is_some());
    }

    #[test]
    fn test_clear_session_clears_user_and_token_together() {
        let mut state = AuthState::default();
        state.set_session("t".to_string(), &claims(100));
        assert!(state.user.as_ref().unwrap().roles.iter().any(|r| r == "ROLE_USER"));

        state.clear_session();
        assert_eq!(state.user, None);
        assert_eq!(state.token, None);
        assert_eq!(state.username(), None);
    }
}
