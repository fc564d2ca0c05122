//! Auth Session Manager
//!
//! Keeps the bearer token in a durable client-side store, mirrors it into the
//! API client's default header, and drives the login and sign-up calls.
//!
//! Expiry is left to the store: the browser drops an expired cookie and
//! [`MemoryTokenStore`] hides an expired entry. There is no refresh or
//! rotation.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::api::TodoApi;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::models::{LoginData, LoginResponse, RegisterData};

/// Durable storage for the session token
pub trait TokenStore {
    /// The stored token, or `None` when absent or expired
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str, expires: DateTime<Utc>) -> ClientResult<()>;

    fn remove(&self) -> ClientResult<()>;
}

// ========================
// In-memory Store
// ========================

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Token store for tests and non-browser hosts
pub struct MemoryTokenStore {
    entry: RefCell<Option<(String, DateTime<Utc>)>>,
    clock: Clock,
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        Self {
            entry: RefCell::new(None),
            clock: Box::new(clock),
        }
    }

    /// Expiry of the stored token, even if already past
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.entry.borrow().as_ref().map(|(_, expires)| *expires)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        let now = (self.clock)();
        self.entry
            .borrow()
            .as_ref()
            .filter(|(_, expires)| *expires > now)
            .map(|(token, _)| token.clone())
    }

    fn save(&self, token: &str, expires: DateTime<Utc>) -> ClientResult<()> {
        *self.entry.borrow_mut() = Some((token.to_string(), expires));
        Ok(())
    }

    fn remove(&self) -> ClientResult<()> {
        self.entry.borrow_mut().take();
        Ok(())
    }
}

// ========================
// Cookie Strings
// ========================

/// Characters kept verbatim in a cookie value (JWT-safe)
const COOKIE_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const COOKIE_ATTRIBUTES: &str = "path=/; secure; samesite=strict";

/// `document.cookie` assignment storing `name=value` until `expires`
pub fn format_set_cookie(name: &str, value: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{}={}; expires={}; {}",
        name,
        utf8_percent_encode(value, COOKIE_VALUE),
        expires.format("%a, %d %b %Y %H:%M:%S GMT"),
        COOKIE_ATTRIBUTES
    )
}

/// `document.cookie` assignment deleting `name`
pub fn format_expired_cookie(name: &str) -> String {
    format!(
        "{}=; expires=Thu, 01 Jan 1970 00:00:00 GMT; {}",
        name, COOKIE_ATTRIBUTES
    )
}

/// Look up `name` in a `document.cookie` string
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| percent_decode_str(value).decode_utf8().ok())
        .map(|value| value.into_owned())
        .filter(|value| !value.is_empty())
}

// ========================
// Session
// ========================

pub struct AuthSession<S: TokenStore, A: TodoApi> {
    store: S,
    api: Rc<A>,
    lifetime: chrono::Duration,
}

impl<S: TokenStore, A: TodoApi> AuthSession<S, A> {
    pub fn new(store: S, api: Rc<A>, config: &ClientConfig) -> Self {
        Self {
            store,
            api,
            lifetime: config.token_lifetime(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist the token and install it as the default bearer header
    pub fn set_token(&self, token: &str) -> ClientResult<()> {
        self.store.save(token, Utc::now() + self.lifetime)?;
        self.api.set_default_token(Some(token));
        tracing::info!("session token stored");
        Ok(())
    }

    pub fn get_token(&self) -> Option<String> {
        self.store.load()
    }

    /// Drop the persisted token and the default bearer header
    pub fn clear_token(&self) -> ClientResult<()> {
        self.store.remove()?;
        self.api.set_default_token(None);
        tracing::info!("session token cleared");
        Ok(())
    }

    /// Re-install the default header from a previously persisted token
    pub fn restore(&self) -> Option<String> {
        let token = self.get_token();
        if let Some(token) = &token {
            self.api.set_default_token(Some(token));
            tracing::debug!("session restored from store");
        }
        token
    }

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let response = self
            .api
            .login(&LoginData::new(username, password))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "error logging in");
                e
            })?;
        self.set_token(&response.access_token)?;
        Ok(response)
    }

    /// Register, then log in with the same credentials
    pub async fn sign_up(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let data = RegisterData {
            email: email.to_string(),
            password: password.to_string(),
        };
        let registered = self.api.sign_up(&data).await.map_err(|e| {
            tracing::error!(error = %e, "error signing up");
            e
        })?;
        tracing::info!(user_id = %registered.user_id, "user registered");
        self.login(email, password).await
    }
}
