use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api::client::LoginResponse;
use crate::error::AppError;
use crate::models::post::User;

const TOKEN_KEY: &str = "userToken";
const USER_KEY: &str = "userInfo";

/// An authenticated user together with the bearer token issued at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub token: String,
    #[serde(flatten)]
    pub user: User,
}

impl From<LoginResponse> for UserSession {
    fn from(login: LoginResponse) -> Self {
        Self {
            token: login.token,
            user: login.user,
        }
    }
}

/// Persistence for the session across page loads.
pub trait SessionStore {
    fn load(&self) -> Result<Option<UserSession>, AppError>;
    fn save(&self, session: &UserSession) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;
}

/// Load the persisted session, wiping the store if it is unreadable.
pub fn restore(store: &dyn SessionStore) -> Option<UserSession> {
    match store.load() {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Discarding stored session: {e}");
            if let Err(e) = store.clear() {
                tracing::error!("Failed to clear session storage: {e}");
            }
            None
        }
    }
}

/// In-memory store, for tests and for hosts without web storage.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RefCell<Option<String>>,
    user_info: RefCell<Option<String>>,
}

impl MemorySessionStore {
    /// Build with raw stored values (useful for testing corrupt data).
    pub fn with_raw(token: Option<&str>, user_info: Option<&str>) -> Self {
        Self {
            token: RefCell::new(token.map(str::to_string)),
            user_info: RefCell::new(user_info.map(str::to_string)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<UserSession>, AppError> {
        decode(self.token.borrow().as_deref(), self.user_info.borrow().as_deref())
    }

    fn save(&self, session: &UserSession) -> Result<(), AppError> {
        let info = serde_json::to_string(session).map_err(|e| AppError::Storage(e.to_string()))?;
        *self.token.borrow_mut() = Some(session.token.clone());
        *self.user_info.borrow_mut() = Some(info);
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        self.token.borrow_mut().take();
        self.user_info.borrow_mut().take();
        Ok(())
    }
}

/// `localStorage`-backed store using the `userToken` / `userInfo` keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    fn storage() -> Result<web_sys::Storage, AppError> {
        web_sys::window()
            .ok_or_else(|| AppError::Storage("no window".into()))?
            .local_storage()
            .map_err(|_| AppError::Storage("localStorage is not accessible".into()))?
            .ok_or_else(|| AppError::Storage("localStorage is disabled".into()))
    }

    fn get(storage: &web_sys::Storage, key: &str) -> Result<Option<String>, AppError> {
        storage
            .get_item(key)
            .map_err(|_| AppError::Storage(format!("failed to read {key}")))
    }
}

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Result<Option<UserSession>, AppError> {
        let storage = Self::storage()?;
        let token = Self::get(&storage, TOKEN_KEY)?;
        let info = Self::get(&storage, USER_KEY)?;
        decode(token.as_deref(), info.as_deref())
    }

    fn save(&self, session: &UserSession) -> Result<(), AppError> {
        let storage = Self::storage()?;
        let info = serde_json::to_string(session).map_err(|e| AppError::Storage(e.to_string()))?;
        storage
            .set_item(TOKEN_KEY, &session.token)
            .and_then(|_| storage.set_item(USER_KEY, &info))
            .map_err(|_| AppError::Storage("failed to write session".into()))
    }

    fn clear(&self) -> Result<(), AppError> {
        let storage = Self::storage()?;
        storage
            .remove_item(TOKEN_KEY)
            .and_then(|_| storage.remove_item(USER_KEY))
            .map_err(|_| AppError::Storage("failed to clear session".into()))
    }
}

/// A session exists only when both keys are present. `userInfo` is
/// authoritative for the user; the token key wins for the token.
fn decode(token: Option<&str>, user_info: Option<&str>) -> Result<Option<UserSession>, AppError> {
    let (Some(token), Some(info)) = (token, user_info) else {
        return Ok(None);
    };
    let mut session: UserSession =
        serde_json::from_str(info).map_err(|e| AppError::Storage(format!("corrupt userInfo: {e}")))?;
    session.token = token.to_string();
    Ok(Some(session))
}

/// Reactive handle to the signed-in user, provided at the root of the app.
///
/// Created empty or from storage at startup, filled by [`SessionContext::begin`]
/// at login and emptied by [`SessionContext::end`] at logout.
#[derive(Clone, Copy)]
pub struct SessionContext {
    current: RwSignal<Option<UserSession>>,
    store: StoredValue<Rc<dyn SessionStore>, LocalStorage>,
}

impl SessionContext {
    pub fn new(store: Rc<dyn SessionStore>) -> Self {
        let restored = restore(store.as_ref());
        Self {
            current: RwSignal::new(restored),
            store: StoredValue::new_local(store),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.current.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    /// Bearer token for outgoing requests. Not reactive.
    pub fn token(&self) -> Option<String> {
        self.current
            .with_untracked(|s| s.as_ref().map(|s| s.token.clone()))
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.with(Option::is_some)
    }

    pub fn is_admin(&self) -> bool {
        self.current
            .with(|s| s.as_ref().is_some_and(|s| s.user.is_admin()))
    }

    pub fn begin(&self, session: UserSession) {
        if let Err(e) = self.store.with_value(|store| store.save(&session)) {
            tracing::error!("Failed to persist session: {e}");
        }
        tracing::info!(user = %session.user.username, "Signed in");
        self.current.set(Some(session));
    }

    pub fn end(&self) {
        if let Err(e) = self.store.with_value(|store| store.clear()) {
            tracing::error!("Failed to clear session storage: {e}");
        }
        tracing::info!("Signed out");
        self.current.set(None);
    }
}
