//! Route guarding and the navigation requests the controller emits.

use crate::state::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_LANDING: &str = "/";

/// One piece of transient state carried to the next view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteContext {
    /// Where the caller was headed before being sent to log in.
    From(String),
    /// Banner text for the next view, e.g. after registering.
    Message(String),
}

impl RouteContext {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(text) => Some(text),
            Self::From(_) => None,
        }
    }
}

/// A navigation request. `replace` means the current entry is overwritten
/// rather than pushed, so "back" skips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub replace: bool,
    pub context: Option<RouteContext>,
}

impl Redirect {
    pub fn to_login() -> Self {
        Self {
            to: LOGIN_PATH.to_string(),
            replace: false,
            context: None,
        }
    }

    pub fn to_login_from(requested: &str) -> Self {
        Self {
            to: LOGIN_PATH.to_string(),
            replace: true,
            context: Some(RouteContext::From(requested.to_string())),
        }
    }

    pub fn to_login_with_message(message: impl Into<String>) -> Self {
        Self {
            to: LOGIN_PATH.to_string(),
            replace: false,
            context: Some(RouteContext::Message(message.into())),
        }
    }

    /// Where a freshly logged in user goes. Consumes the pending intent.
    pub fn after_login(context: Option<RouteContext>) -> Self {
        Self {
            to: post_login_target(context.as_ref()).to_string(),
            replace: true,
            context: None,
        }
    }
}

/// The recorded intent, or the default landing page. An intent pointing
/// back at the login page itself is ignored.
pub fn post_login_target(context: Option<&RouteContext>) -> &str {
    match context {
        Some(RouteContext::From(path)) if !path.is_empty() && !path.starts_with(LOGIN_PATH) => path,
        _ => DEFAULT_LANDING,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not checked yet; show a placeholder and decide later.
    Pending,
    Redirect(Redirect),
    Allow,
}

/// Decide whether `requested` may render for this snapshot.
pub fn guard(state: &AuthState, requested: &str) -> GuardDecision {
    if !state.initialized {
        GuardDecision::Pending
    } else if !state.is_authenticated {
        tracing::debug!(requested, "Guarded route needs login");
        GuardDecision::Redirect(Redirect::to_login_from(requested))
    } else {
        GuardDecision::Allow
    }
}

/// Full in-app location for a path and its query string, as recorded in
/// a pending intent. `query` may be given with or without its leading `?`.
pub fn requested_target(path: &str, query: &str) -> String {
    match query.trim_start_matches('?') {
        "" => path.to_string(),
        query => format!("{}?{}", path, query),
    }
}

/// Split a target into its path and decoded query pairs.
pub fn split_target(target: &str) -> (&str, Vec<(String, String)>) {
    let Some((path, query)) = target.split_once('?') else {
        return (target, Vec::new());
    };
    let pairs = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect();
    (path, pairs)
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(raw)
}
