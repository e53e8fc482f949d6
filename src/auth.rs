//! Durable auth state: bearer token + serialized user profile.
//!
//! Both values are written together and cleared together, never one without
//! the other. All access goes through [`AuthStore`] instead of ad hoc storage
//! reads scattered across call sites; interested views can subscribe to
//! auth-state changes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::api;
use crate::config::{TOKEN_STORAGE_KEY, USER_DATA_STORAGE_KEY};
use crate::error::ApiError;
use crate::types::{AuthResponse, User};

enum Backend {
    Browser(web_sys::Storage),
    Memory(RefCell<HashMap<String, String>>),
}

struct Inner {
    backend: Backend,
    listeners: RefCell<Vec<Rc<dyn Fn(bool)>>>,
}

pub struct AuthStore {
    inner: Rc<Inner>,
}

impl Clone for AuthStore {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

thread_local! {
    static SHARED: AuthStore = AuthStore::browser();
}

/// The app-wide store. One instance per page, so subscribers registered by any
/// view observe every change.
pub fn shared() -> AuthStore {
    SHARED.with(AuthStore::clone)
}

impl AuthStore {
    fn browser() -> Self {
        let backend = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .map(Backend::Browser)
            .unwrap_or_else(|| Backend::Memory(RefCell::new(HashMap::new())));
        Self::with_backend(backend)
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            inner: Rc::new(Inner {
                backend,
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::with_backend(Backend::Memory(RefCell::new(HashMap::new())))
    }

    fn get(&self, key: &str) -> Option<String> {
        match &self.inner.backend {
            Backend::Browser(storage) => storage.get_item(key).ok().flatten(),
            Backend::Memory(map) => map.borrow().get(key).cloned(),
        }
    }

    fn set(&self, key: &str, value: &str) {
        match &self.inner.backend {
            Backend::Browser(storage) => {
                let _ = storage.set_item(key, value);
            }
            Backend::Memory(map) => {
                map.borrow_mut().insert(key.to_string(), value.to_string());
            }
        }
    }

    fn remove(&self, key: &str) {
        match &self.inner.backend {
            Backend::Browser(storage) => {
                let _ = storage.remove_item(key);
            }
            Backend::Memory(map) => {
                map.borrow_mut().remove(key);
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.get(TOKEN_STORAGE_KEY)
    }

    /// True iff a token is present. Does not validate it.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Stored user profile, or `None` when absent or not valid JSON. Never
    /// errors.
    pub fn current_user(&self) -> Option<User> {
        let raw = self.get(USER_DATA_STORAGE_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Store token and profile as a pair.
    pub fn save(&self, token: &str, user: &User) {
        self.set(TOKEN_STORAGE_KEY, token);
        if let Ok(serialized) = serde_json::to_string(user) {
            self.set(USER_DATA_STORAGE_KEY, &serialized);
        }
        self.notify(true);
    }

    /// Remove token and profile as a pair.
    pub fn clear(&self) {
        self.remove(TOKEN_STORAGE_KEY);
        self.remove(USER_DATA_STORAGE_KEY);
        self.notify(false);
    }

    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn notify(&self, authenticated: bool) {
        for listener in self.inner.listeners.borrow().iter() {
            listener(authenticated);
        }
    }
}

fn log_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{message}");
}

pub async fn login(store: &AuthStore, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let auth = api::login(email, password).await?;
    store.save(&auth.token, &auth.user);
    Ok(auth)
}

pub async fn signup(
    store: &AuthStore,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<AuthResponse, ApiError> {
    let auth = api::signup(full_name, email, password).await?;
    store.save(&auth.token, &auth.user);
    Ok(auth)
}

/// Notify the server, then clear local credentials. The notification is
/// best-effort: its failure is logged and never surfaced.
pub async fn logout(store: &AuthStore) {
    let result = match store.token() {
        Some(token) => api::logout(&token).await,
        None => Ok(()),
    };
    conclude_logout(store, result);
}

fn conclude_logout(store: &AuthStore, result: Result<(), ApiError>) {
    if let Err(err) = result {
        log_warn(&format!("Logout notification failed: {err}"));
    }
    store.clear();
}

/// Validate the stored token against the server. An invalid token is never
/// left resident: the stored pair is purged before the error propagates.
pub async fn verify(store: &AuthStore) -> Result<User, ApiError> {
    let Some(token) = store.token() else {
        return Err(invalidate(store, ApiError::Auth("No token stored".to_string())));
    };
    match api::verify_token(&token).await {
        Ok(resp) => Ok(resp.user),
        Err(err) => Err(invalidate(store, err)),
    }
}

fn invalidate(store: &AuthStore, err: ApiError) -> ApiError {
    store.clear();
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: "u1".to_string(),
            email: "sam@example.com".to_string(),
            full_name: "Sam Example".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn save_stores_token_and_user_together() {
        let store = AuthStore::in_memory();
        store.save("tok-123", &sample_user());

        assert_eq!(store.token().as_deref(), Some("tok-123"));
        assert_eq!(store.current_user().map(|u| u.email).as_deref(), Some("sam@example.com"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn clear_removes_both_keys() {
        let store = AuthStore::in_memory();
        store.save("tok-123", &sample_user());
        store.clear();

        assert_eq!(store.token(), None);
        assert_eq!(store.current_user(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn current_user_tolerates_corrupt_stored_value() {
        let store = AuthStore::in_memory();
        store.set(USER_DATA_STORAGE_KEY, "not json at all");
        assert_eq!(store.current_user(), None);
    }

    #[test]
    fn logout_clears_credentials_even_when_notification_fails() {
        let store = AuthStore::in_memory();
        store.save("tok-123", &sample_user());

        conclude_logout(
            &store,
            Err(ApiError::Connectivity("Cannot connect to backend server".to_string())),
        );

        assert_eq!(store.token(), None);
        assert_eq!(store.current_user(), None);
    }

    #[test]
    fn verify_failure_purges_stored_pair() {
        let store = AuthStore::in_memory();
        store.save("tok-expired", &sample_user());

        let err = invalidate(&store, ApiError::Auth("Token has expired".to_string()));

        assert!(err.is_auth());
        assert_eq!(store.token(), None);
        assert_eq!(store.current_user(), None);
    }

    #[test]
    fn subscribers_observe_auth_changes() {
        let store = AuthStore::in_memory();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |authed| sink.borrow_mut().push(authed));

        store.save("tok-123", &sample_user());
        store.clear();

        assert_eq!(*seen.borrow(), vec![true, false]);
    }
}
