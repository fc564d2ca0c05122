//! Todo Editor State Machine
//!
//! Tracks one create-or-edit session of the todo popup:
//!
//! ```text
//! Idle ─open_create─▶ Creating ─┐
//! Idle ─open_edit───▶ Editing ──┼─submit─▶ Submitting ─ok──▶ Idle
//!                     Failed ───┘                     └err─▶ Failed
//! ```
//!
//! `cancel` returns to `Idle` from any phase. A failed submission keeps the
//! popup open; nothing is retried unless the user submits again.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use crate::error::ClientResult;
use crate::models::Todo;
use crate::validation::{DueDateRule, FieldErrors, TodoForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
}

/// A validated todo ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub kind: MutationKind,
    pub todo: Todo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditPhase {
    #[default]
    Idle,
    /// New todo; the identifier is generated when the popup opens
    Creating { id: String },
    Editing(Todo),
    Submitting(Submission),
    Failed { submission: Submission, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("form is invalid: {0}")]
    Invalid(FieldErrors),
    #[error("no todo is being edited")]
    NotOpen,
    #[error("a submission is already in flight")]
    InFlight,
}

#[derive(Debug, Clone, Default)]
pub struct TodoEditor {
    phase: EditPhase,
    due_date_rule: DueDateRule,
}

/// Fields carried over from the todo being replaced
struct Base {
    kind: MutationKind,
    id: String,
    created_at: Option<String>,
    is_completed: bool,
}

impl TodoEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_due_date_rule(due_date_rule: DueDateRule) -> Self {
        Self {
            phase: EditPhase::Idle,
            due_date_rule,
        }
    }

    pub fn phase(&self) -> &EditPhase {
        &self.phase
    }

    /// Whether the popup should be visible
    pub fn is_open(&self) -> bool {
        self.phase != EditPhase::Idle
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, EditPhase::Submitting(_))
    }

    pub fn is_update(&self) -> bool {
        match &self.phase {
            EditPhase::Editing(_) => true,
            EditPhase::Submitting(s) | EditPhase::Failed { submission: s, .. } => {
                s.kind == MutationKind::Update
            }
            _ => false,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        match &self.phase {
            EditPhase::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Start a new todo and return its pre-generated identifier
    pub fn open_create(&mut self) -> String {
        let id = Todo::new_id();
        self.phase = EditPhase::Creating { id: id.clone() };
        id
    }

    pub fn open_edit(&mut self, todo: Todo) {
        self.phase = EditPhase::Editing(todo);
    }

    pub fn cancel(&mut self) {
        self.phase = EditPhase::Idle;
    }

    /// Initial form values for the current phase
    pub fn form(&self) -> TodoForm {
        let source = match &self.phase {
            EditPhase::Editing(todo) => todo,
            EditPhase::Submitting(s) | EditPhase::Failed { submission: s, .. } => &s.todo,
            EditPhase::Idle | EditPhase::Creating { .. } => return TodoForm::default(),
        };
        TodoForm {
            title: source.title.clone(),
            description: source.description.clone(),
            due_date: source.due_date_input().to_string(),
            is_completed: Some(source.is_completed),
        }
    }

    fn base(&self) -> Result<Base, SubmitError> {
        match &self.phase {
            EditPhase::Idle => Err(SubmitError::NotOpen),
            EditPhase::Submitting(_) => Err(SubmitError::InFlight),
            EditPhase::Creating { id } => Ok(Base {
                kind: MutationKind::Create,
                id: id.clone(),
                created_at: None,
                is_completed: false,
            }),
            EditPhase::Editing(todo) => Ok(Base {
                kind: MutationKind::Update,
                id: todo.id.clone(),
                created_at: todo.created_at.clone(),
                is_completed: todo.is_completed,
            }),
            EditPhase::Failed { submission, .. } => Ok(Base {
                kind: submission.kind,
                id: submission.todo.id.clone(),
                created_at: submission.todo.created_at.clone(),
                is_completed: submission.todo.is_completed,
            }),
        }
    }

    /// Check `form` against the rules `submit` applies
    pub fn validate(&self, form: &TodoForm) -> Result<(), FieldErrors> {
        form.validate_with(&self.due_date_rule)
    }

    /// Validate the form and move to `Submitting`
    ///
    /// An invalid form leaves the phase untouched. The resulting todo keeps
    /// the edited todo's identifier and creation time.
    pub fn submit(&mut self, form: &TodoForm, now: DateTime<Utc>) -> Result<Submission, SubmitError> {
        let base = self.base()?;
        self.validate(form).map_err(SubmitError::Invalid)?;

        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let created_at = match base.kind {
            MutationKind::Create => base.created_at.or_else(|| Some(timestamp.clone())),
            MutationKind::Update => base.created_at,
        };
        let submission = Submission {
            kind: base.kind,
            todo: Todo {
                id: base.id,
                title: form.title.clone(),
                description: form.description.clone(),
                is_completed: form.is_completed.unwrap_or(base.is_completed),
                due_date: form.due_date.clone(),
                created_at,
                updated_at: Some(timestamp),
            },
        };
        self.phase = EditPhase::Submitting(submission.clone());
        Ok(submission)
    }

    /// Record the outcome of the in-flight submission
    pub fn complete(&mut self, result: &ClientResult<()>) {
        let submission = match &self.phase {
            EditPhase::Submitting(submission) => submission.clone(),
            _ => {
                tracing::warn!("submission completed while none was in flight");
                return;
            }
        };
        match result {
            Ok(()) => self.phase = EditPhase::Idle,
            Err(e) => {
                tracing::error!(error = %e, todo_id = %submission.todo.id, "todo submission failed");
                self.phase = EditPhase::Failed {
                    submission,
                    error: e.to_string(),
                };
            }
        }
    }
}
