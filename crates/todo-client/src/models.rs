//! Wire Models
//!
//! Data structures matching the todo REST backend. Field names are camelCase
//! on the wire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Todo entry (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Client-generated at creation, never changed afterwards
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Todo {
    /// Fresh client-side identifier for a todo about to be created
    pub fn new_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Due date as the `YYYY-MM-DD` value a date input expects
    pub fn due_date_input(&self) -> &str {
        date_part(&self.due_date)
    }

    /// Due date rendered as `dd.mm.yyyy`; falls back to the raw value
    pub fn formatted_due_date(&self) -> String {
        match NaiveDate::parse_from_str(self.due_date_input(), "%Y-%m-%d") {
            Ok(date) => date.format("%d.%m.%Y").to_string(),
            Err(_) => self.due_date.clone(),
        }
    }
}

/// Strip the time component from an ISO timestamp
pub(crate) fn date_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: String,
}

/// Login request body. `state` is always `"Internal"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    pub state: String,
    pub username: String,
    pub password: String,
}

impl LoginData {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            state: "Internal".to_string(),
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        Todo {
            id: "a1".to_string(),
            title: "Buy milk".to_string(),
            description: "2 litres".to_string(),
            is_completed: false,
            due_date: "2030-05-04T00:00:00Z".to_string(),
            created_at: Some("2030-01-01T10:00:00Z".to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn test_todo_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["dueDate"], "2030-05-04T00:00:00Z");
        assert_eq!(json["createdAt"], "2030-01-01T10:00:00Z");
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn test_todo_missing_optional_fields() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":"x","title":"t","description":"d","dueDate":"2031-01-02"}"#,
        )
        .unwrap();
        assert!(!todo.is_completed);
        assert_eq!(todo.created_at, None);
    }

    #[test]
    fn test_due_date_helpers() {
        let todo = sample();
        assert_eq!(todo.due_date_input(), "2030-05-04");
        assert_eq!(todo.formatted_due_date(), "04.05.2030");

        let broken = Todo { due_date: "soon".to_string(), ..sample() };
        assert_eq!(broken.formatted_due_date(), "soon");
    }

    #[test]
    fn test_login_data_state() {
        let json = serde_json::to_value(LoginData::new("a@b.co", "pw")).unwrap();
        assert_eq!(json["state"], "Internal");
        assert_eq!(json["username"], "a@b.co");
    }

    #[test]
    fn test_login_response_names() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"userId":"u1","accessToken":"tok"}"#).unwrap();
        assert_eq!(resp.access_token, "tok");
        assert_eq!(resp.user_id, "u1");
    }
}
