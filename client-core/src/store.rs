//! The persisted session slot.

use std::cell::RefCell;

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "authToken";

/// Holds at most one bearer token.
///
/// Implementations must survive a reload of the hosting page and must report
/// a slot they cannot read as empty rather than failing.
pub trait SessionStore {
    fn read(&self) -> Option<String>;
    /// Overwrites any previous token.
    fn write(&self, token: &str);
    /// Idempotent.
    fn clear(&self);
}

/// In-process store for tests and hosts without browser storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.slot
            .borrow()
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }

    fn write(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}
