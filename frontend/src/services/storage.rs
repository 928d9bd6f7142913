use client_core::{SessionStore, TOKEN_KEY};
use gloo::storage::{LocalStorage, Storage};

/// Session slot in `window.localStorage`, holding the raw token string.
pub struct LocalStorageStore;

impl SessionStore for LocalStorageStore {
    fn read(&self) -> Option<String> {
        match LocalStorage::raw().get_item(TOKEN_KEY) {
            Ok(value) => value
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty()),
            Err(err) => {
                tracing::warn!("Could not read session token: {:?}", err);
                None
            }
        }
    }

    fn write(&self, token: &str) {
        if let Err(err) = LocalStorage::raw().set_item(TOKEN_KEY, token) {
            tracing::error!("Could not persist session token: {:?}", err);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(TOKEN_KEY);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_token_round_trip() {
        let store = LocalStorageStore;
        store.write("header.payload.signature");
        assert_eq!(store.read().as_deref(), Some("header.payload.signature"));
        assert_eq!(
            LocalStorage::raw().get_item(TOKEN_KEY).ok().flatten().as_deref(),
            Some("header.payload.signature")
        );

        store.clear();
        store.clear();
        assert_eq!(store.read(), None);
    }

    #[wasm_bindgen_test]
    fn test_blank_value_reads_as_absent() {
        LocalStorage::raw()
            .set_item(TOKEN_KEY, "  ")
            .expect("should write raw value");
        assert_eq!(LocalStorageStore.read(), None);
        LocalStorageStore.clear();
    }
}
