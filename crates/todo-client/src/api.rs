//! Remote Data Client
//!
//! One request/response exchange per operation against the todo REST
//! backend. No retry, no backoff, no explicit timeout: the transport's
//! defaults apply.

use std::cell::RefCell;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{LoginData, LoginResponse, RegisterData, RegisterResponse, Todo};

/// Operations offered by the todo backend
///
/// Single-threaded: futures are not required to be `Send`, matching the
/// browser's event loop.
#[async_trait(?Send)]
pub trait TodoApi {
    /// Install or remove the bearer token sent when a call carries none
    fn set_default_token(&self, token: Option<&str>);

    async fn sign_up(&self, data: &RegisterData) -> ClientResult<RegisterResponse>;

    async fn login(&self, data: &LoginData) -> ClientResult<LoginResponse>;

    async fn list_todos(&self, token: &str) -> ClientResult<Vec<Todo>>;

    async fn create_todo(&self, token: &str, todo: &Todo) -> ClientResult<()>;

    async fn update_todo(&self, token: &str, id: &str, todo: &Todo) -> ClientResult<()>;

    async fn delete_todo(&self, token: &str, id: &str) -> ClientResult<()>;
}

/// Reject absent or blank tokens before anything is sent
pub fn require_token(token: Option<&str>) -> ClientResult<&str> {
    match token {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(ClientError::MissingToken),
    }
}

/// HTTP implementation of [`TodoApi`] over `reqwest`
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    default_token: RefCell<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_token: RefCell::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_token(&self) -> Option<String> {
        self.default_token.borrow().clone()
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        let default = self.default_token.borrow();
        match token.or(default.as_deref()) {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    // ========================
    // Request Builders
    // ========================

    pub(crate) fn sign_up_request(&self, data: &RegisterData) -> RequestBuilder {
        self.request(Method::POST, "/InternalLogin/sign-up", None).json(data)
    }

    pub(crate) fn login_request(&self, data: &LoginData) -> RequestBuilder {
        self.request(Method::POST, "/InternalLogin", None).json(data)
    }

    pub(crate) fn list_todos_request(&self, token: &str) -> RequestBuilder {
        self.request(Method::GET, "/Todos", Some(token))
    }

    pub(crate) fn create_todo_request(&self, token: &str, todo: &Todo) -> RequestBuilder {
        self.request(Method::POST, "/Todos", Some(token)).json(todo)
    }

    pub(crate) fn update_todo_request(&self, token: &str, id: &str, todo: &Todo) -> RequestBuilder {
        self.request(Method::PUT, &todo_path(id), Some(token)).json(todo)
    }

    pub(crate) fn delete_todo_request(&self, token: &str, id: &str) -> RequestBuilder {
        self.request(Method::DELETE, &todo_path(id), Some(token))
    }
}

/// Unreserved characters stay readable in `/Todos/{id}`
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn todo_path(id: &str) -> String {
    format!("/Todos/{}", utf8_percent_encode(id, PATH_SEGMENT))
}

/// Send a request and turn non-2xx responses into [`ClientError::Status`]
async fn send(builder: RequestBuilder) -> ClientResult<Response> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        tracing::debug!(status = status.as_u16(), url = %response.url(), "request succeeded");
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "request rejected by server");
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> ClientResult<T> {
    let response = send(builder).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl TodoApi for ApiClient {
    fn set_default_token(&self, token: Option<&str>) {
        *self.default_token.borrow_mut() = token.map(str::to_string);
    }

    async fn sign_up(&self, data: &RegisterData) -> ClientResult<RegisterResponse> {
        send_json(self.sign_up_request(data)).await
    }

    async fn login(&self, data: &LoginData) -> ClientResult<LoginResponse> {
        send_json(self.login_request(data)).await
    }

    async fn list_todos(&self, token: &str) -> ClientResult<Vec<Todo>> {
        let token = require_token(Some(token))?;
        send_json(self.list_todos_request(token)).await
    }

    async fn create_todo(&self, token: &str, todo: &Todo) -> ClientResult<()> {
        let token = require_token(Some(token))?;
        send(self.create_todo_request(token, todo)).await.map(|_| ())
    }

    async fn update_todo(&self, token: &str, id: &str, todo: &Todo) -> ClientResult<()> {
        let token = require_token(Some(token))?;
        send(self.update_todo_request(token, id, todo)).await.map(|_| ())
    }

    async fn delete_todo(&self, token: &str, id: &str) -> ClientResult<()> {
        let token = require_token(Some(token))?;
        send(self.delete_todo_request(token, id)).await.map(|_| ())
    }
}
