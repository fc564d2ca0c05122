//! Cookie Token Store
//!
//! Persists the session token in `document.cookie`.

use chrono::{DateTime, Utc};
use todo_client::session::{find_cookie, format_expired_cookie, format_set_cookie};
use todo_client::{ClientError, ClientResult, TokenStore};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

pub struct CookieTokenStore {
    name: String,
}

impl CookieTokenStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn document() -> ClientResult<HtmlDocument> {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.dyn_into::<HtmlDocument>().ok())
            .ok_or_else(|| ClientError::Storage("document is not available".to_string()))
    }

    fn write(&self, cookie: &str) -> ClientResult<()> {
        Self::document()?
            .set_cookie(cookie)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }
}

impl TokenStore for CookieTokenStore {
    fn load(&self) -> Option<String> {
        let cookies = Self::document().ok()?.cookie().ok()?;
        find_cookie(&cookies, &self.name)
    }

    fn save(&self, token: &str, expires: DateTime<Utc>) -> ClientResult<()> {
        self.write(&format_set_cookie(&self.name, token, expires))
    }

    fn remove(&self) -> ClientResult<()> {
        self.write(&format_expired_cookie(&self.name))
    }
}
