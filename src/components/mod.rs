//! UI Components
//!
//! Reusable Leptos components.

mod field_error;
mod header;
mod login_panel;
mod signup_panel;
mod todo_card;
mod todo_list;
mod todo_popup;

pub use field_error::FieldError;
pub use header::Header;
pub use login_panel::LoginPanel;
pub use signup_panel::SignupPanel;
pub use todo_card::TodoCard;
pub use todo_list::TodoList;
pub use todo_popup::TodoPopup;
