//! TodoPlatform Client Core
//!
//! Platform-neutral layers shared by the browser frontend:
//! - models: wire types for the todo REST backend
//! - validation: per-field rules for auth and todo forms
//! - api: remote data client
//! - session: bearer token persistence
//! - cache / sync / editor: the fetch, mutate, invalidate cycle

pub mod api;
pub mod cache;
pub mod config;
pub mod editor;
pub mod error;
pub mod models;
pub mod session;
pub mod sync;
pub mod validation;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, TodoApi};
pub use cache::{QueryCache, QueryKey, ResourceKind};
pub use config::ClientConfig;
pub use editor::{EditPhase, MutationKind, SubmitError, Submission, TodoEditor};
pub use error::{ClientError, ClientResult};
pub use models::{LoginData, LoginResponse, RegisterData, RegisterResponse, Todo};
pub use session::{AuthSession, MemoryTokenStore, TokenStore};
pub use sync::TodoSync;
pub use validation::{
    submit_disabled, DueDateRule, Field, FieldErrors, LoginForm, SignupForm, TodoForm, Validate,
    ValidationError,
};
