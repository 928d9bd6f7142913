//! Session, routing and gateway logic for the GoLocal storefront.
//!
//! Nothing here touches the browser directly. Storage, transport and time
//! are trait seams so the same controller runs in the wasm bundle and in
//! native tests.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod search;
pub mod state;
pub mod store;
pub mod token;

pub use clock::{Clock, SystemClock};
pub use config::AppConfig;
pub use controller::{AuthApi, AuthController, SubscriptionId};
pub use error::{DecodeError, GatewayError, TransportError};
pub use gateway::{ApiClient, ApiRequest, ApiResponse, Gateway, Method, Transport};
pub use guard::{
    guard, requested_target, split_target, GuardDecision, Redirect, RouteContext, DEFAULT_LANDING,
    LOGIN_PATH,
};
pub use state::{AuthState, User};
pub use store::{MemoryStore, SessionStore, TOKEN_KEY};
