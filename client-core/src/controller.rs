//! The auth state controller.
//!
//! Owns the only writable copy of [`AuthState`] and is the only writer of
//! the [`SessionStore`]. Views read snapshots through [`AuthController::state`]
//! or by subscribing; every change is published synchronously.
//!
//! Interior mutability is used so the controller can be shared behind an
//! `Rc` by the UI. No `RefCell` borrow is ever held across an `.await`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use shared::api::{validation_message, AuthResponse, LoginRequest, RegisterRequest};
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::clock::Clock;
use crate::error::GatewayError;
use crate::guard::{Redirect, RouteContext};
use crate::state::AuthState;
use crate::store::SessionStore;
use crate::token::{self, Claims};

const LOGIN_FAILED: &str = "Login failed. Please check credentials.";
const NO_TOKEN: &str = "Login failed: No token received from server.";
const TOKEN_EXPIRED: &str = "Received token is already expired.";
const REGISTRATION_FAILED: &str = "Registration failed.";
pub const REGISTERED: &str = "Registration successful! Please log in.";

/// The remote authentication service.
#[async_trait(?Send)]
pub trait AuthApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, GatewayError>;
    async fn register(&self, details: &RegisterRequest) -> Result<(), GatewayError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(&AuthState)>;

pub struct AuthController {
    store: Rc<dyn SessionStore>,
    api: Rc<dyn AuthApi>,
    clock: Rc<dyn Clock>,
    state: RefCell<AuthState>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: Cell<u64>,
    /// Bumped by `logout`; a call that started in an older epoch drops its result.
    epoch: Cell<u64>,
}

impl AuthController {
    pub fn new(store: Rc<dyn SessionStore>, api: Rc<dyn AuthApi>, clock: Rc<dyn Clock>) -> Self {
        Self {
            store,
            api,
            clock,
            state: RefCell::new(AuthState::default()),
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            epoch: Cell::new(0),
        }
    }

    /// Current snapshot. A token that expired since the last publication is
    /// discarded here, before the snapshot is returned.
    pub fn state(&self) -> AuthState {
        self.expire_stale_session();
        self.state.borrow().clone()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&AuthState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(subscriber)));
        id
    }

    /// Stop receiving snapshots. Late results of in-flight calls are then
    /// never delivered to the departed view.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    /// Restore the session persisted by a previous page load.
    ///
    /// Runs once; always ends with `initialized = true`.
    pub fn initialize(&self) {
        if self.state.borrow().initialized {
            debug!("Auth controller already initialized");
            return;
        }

        let now = self.clock.now();
        let restored = self.store.read().and_then(|stored| match token::decode(&stored) {
            Ok(claims) if !claims.is_expired_at(now) => Some((stored, claims)),
            Ok(claims) => {
                info!(username = %claims.sub, "Stored token is expired");
                None
            }
            Err(err) => {
                warn!(error = %err, "Stored token could not be decoded");
                None
            }
        });

        match restored {
            Some((stored, claims)) => {
                info!(username = %claims.sub, "Session restored from storage");
                self.update(|state| {
                    state.set_session(stored, &claims);
                    state.initialized = true;
                });
            }
            None => {
                self.store.clear();
                self.update(|state| {
                    state.clear_session();
                    state.initialized = true;
                });
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// Returns where to navigate on success; on failure the reason is in
    /// `error` and `None` is returned. `context` is the pending intent
    /// recorded by the guard, consumed here.
    pub async fn login(
        &self,
        credentials: LoginRequest,
        context: Option<RouteContext>,
    ) -> Option<Redirect> {
        if self.state.borrow().loading {
            warn!("Login ignored: another auth call is in flight");
            return None;
        }
        if let Err(errors) = credentials.validate() {
            let message = validation_message(&errors);
            self.update(|state| state.error = Some(message));
            return None;
        }

        self.update(|state| {
            state.loading = true;
            state.error = None;
        });

        let epoch = self.epoch.get();
        let outcome = match self.api.login(&credentials).await {
            Ok(response) => self.accept_token(response),
            Err(err) => Err(login_failure_message(&err)),
        };
        if self.epoch.get() != epoch {
            info!(username = %credentials.username, "Login result discarded: logged out while in flight");
            return None;
        }

        match outcome {
            Ok((token, claims)) => {
                self.store.write(&token);
                info!(username = %claims.sub, "Login successful");
                self.update(|state| {
                    state.set_session(token, &claims);
                    state.loading = false;
                });
                Some(Redirect::after_login(context))
            }
            Err(message) => {
                error!(username = %credentials.username, %message, "Login failed");
                self.store.clear();
                self.update(|state| {
                    state.clear_session();
                    state.error = Some(message);
                    state.loading = false;
                });
                None
            }
        }
    }

    /// Create an account. Does not log the new user in.
    ///
    /// On success returns a redirect to the login page carrying a banner.
    pub async fn register(&self, details: RegisterRequest) -> Option<Redirect> {
        if self.state.borrow().loading {
            warn!("Registration ignored: another auth call is in flight");
            return None;
        }
        if let Err(errors) = details.validate() {
            let message = validation_message(&errors);
            self.update(|state| state.error = Some(message));
            return None;
        }

        self.update(|state| {
            state.loading = true;
            state.error = None;
        });

        let epoch = self.epoch.get();
        let result = self.api.register(&details).await;
        if self.epoch.get() != epoch {
            info!(username = %details.username, "Registration result discarded: logged out while in flight");
            return None;
        }

        match result {
            Ok(()) => {
                info!(username = %details.username, "Registration successful");
                self.update(|state| state.loading = false);
                Some(Redirect::to_login_with_message(REGISTERED))
            }
            Err(err) => {
                let message = err
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| match &err {
                        GatewayError::NetworkFailure(_) => err.user_message(),
                        _ => REGISTRATION_FAILED.to_string(),
                    });
                error!(username = %details.username, %message, "Registration failed");
                self.update(|state| {
                    state.error = Some(message);
                    state.loading = false;
                });
                None
            }
        }
    }

    /// End the session. A login or registration still in flight is
    /// abandoned: its result is never applied.
    pub fn logout(&self) -> Redirect {
        info!(username = ?self.state.borrow().username(), "Logging out");
        self.epoch.set(self.epoch.get() + 1);
        self.store.clear();
        self.update(|state| {
            state.clear_session();
            state.error = None;
            state.loading = false;
        });
        Redirect::to_login()
    }

    pub fn clear_error(&self) {
        if self.state.borrow().error.is_some() {
            self.update(|state| state.error = None);
        }
    }

    fn accept_token(&self, response: AuthResponse) -> Result<(String, Claims), String> {
        let token = response
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| NO_TOKEN.to_string())?;
        let claims = token::decode(&token).map_err(|err| format!("Received token is invalid: {}", err))?;
        if claims.is_expired_at(self.clock.now()) {
            return Err(TOKEN_EXPIRED.to_string());
        }
        Ok((token, claims))
    }

    fn expire_stale_session(&self) {
        let now = self.clock.now();
        let stale = {
            let state = self.state.borrow();
            state.token.is_some() && !state.session_valid_at(now)
        };
        if stale {
            warn!("Session token expired; clearing");
            self.store.clear();
            self.update(|state| state.clear_session());
        }
    }

    fn update(&self, change: impl FnOnce(&mut AuthState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            change(&mut state);
            state.recompute(self.clock.now());
            state.clone()
        };

        let subscribers: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }
}

fn login_failure_message(err: &GatewayError) -> String {
    if let Some(message) = err.server_message().filter(|m| !m.trim().is_empty()) {
        return message.to_string();
    }
    match err {
        GatewayError::NetworkFailure(_) => err.user_message(),
        _ => LOGIN_FAILED.to_string(),
    }
}
