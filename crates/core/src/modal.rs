//! Add/edit/view/delete dialog state machine shared by every admin resource.
//!
//! ```text
//! Closed -> Open(kind) -> submit -> Submitting -> finish(Ok)  -> Closed + success banner
//!                 ^          |                 \-> finish(Err) -> Open   + error banner
//!                 \-- errors-/
//! ```
//!
//! Add and edit differ only in their initial values and the target record.
//! Delete skips validation. View never submits.

use serde::{Deserialize, Serialize};

use crate::validation::FieldErrors;

/// Which dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    Add,
    Edit,
    View,
    Delete,
}

impl ModalKind {
    /// Returns `true` for dialogs that render an editable form.
    #[must_use]
    pub const fn is_form(self) -> bool {
        matches!(self, Self::Add | Self::Edit)
    }
}

/// Values, errors and the in-flight flag for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<V> {
    pub values: V,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl<V> FormState<V> {
    /// A fresh form with no errors.
    pub const fn new(values: V) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    /// Error for `field`, if any.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }
}

/// An open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenModal<V> {
    pub kind: ModalKind,
    /// ID of the record being edited, viewed or deleted.
    pub target: Option<String>,
    pub form: FormState<V>,
}

/// Page-level feedback. Only one is shown per page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Dialog lifecycle for one resource page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState<V> {
    Closed,
    Open(OpenModal<V>),
    Submitting(OpenModal<V>),
}

impl<V> ModalState<V> {
    fn open(kind: ModalKind, target: Option<String>, values: V) -> Self {
        Self::Open(OpenModal {
            kind,
            target,
            form: FormState::new(values),
        })
    }

    /// Open the create dialog with default values.
    pub fn open_add(values: V) -> Self {
        Self::open(ModalKind::Add, None, values)
    }

    /// Open the edit dialog pre-populated from the target record.
    pub fn open_edit(target: impl Into<String>, values: V) -> Self {
        Self::open(ModalKind::Edit, Some(target.into()), values)
    }

    /// Open the read-only details dialog.
    pub fn open_view(target: impl Into<String>, values: V) -> Self {
        Self::open(ModalKind::View, Some(target.into()), values)
    }

    /// Open the delete confirmation dialog.
    pub fn open_delete(target: impl Into<String>, values: V) -> Self {
        Self::open(ModalKind::Delete, Some(target.into()), values)
    }

    /// Validate and move to `Submitting`.
    ///
    /// Form dialogs with validation errors stay open with the errors
    /// attached. Delete moves straight to `Submitting`. Any other state is
    /// returned unchanged.
    #[must_use]
    pub fn submit(self, validate: impl FnOnce(&V) -> FieldErrors) -> Self {
        match self {
            Self::Open(mut modal) if modal.kind.is_form() => {
                modal.form.errors = validate(&modal.form.values);
                if modal.form.errors.is_empty() {
                    modal.form.submitting = true;
                    Self::Submitting(modal)
                } else {
                    Self::Open(modal)
                }
            }
            Self::Open(mut modal) if modal.kind == ModalKind::Delete => {
                modal.form.submitting = true;
                Self::Submitting(modal)
            }
            other => other,
        }
    }

    /// Apply the backend's answer to a submission.
    ///
    /// Success closes the dialog and yields a success banner. Failure
    /// reopens it with values intact and yields an error banner. States
    /// other than `Submitting` are returned unchanged with no banner.
    #[must_use]
    pub fn finish(self, result: Result<String, String>) -> (Self, Option<Banner>) {
        match self {
            Self::Submitting(mut modal) => match result {
                Ok(message) => (Self::Closed, Some(Banner::Success(message))),
                Err(message) => {
                    modal.form.submitting = false;
                    (Self::Open(modal), Some(Banner::Error(message)))
                }
            },
            other => (other, None),
        }
    }

    /// Close the dialog, discarding its form.
    #[must_use]
    pub fn close(self) -> Self {
        Self::Closed
    }

    /// The open dialog, whether idle or submitting.
    #[must_use]
    pub const fn modal(&self) -> Option<&OpenModal<V>> {
        match self {
            Self::Open(modal) | Self::Submitting(modal) => Some(modal),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[allow(clippy::ptr_arg)]
    fn require_name(name: &String) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if name.is_empty() {
            errors.insert("name", "Name is required");
        }
        errors
    }

    #[test]
    fn test_add_with_errors_stays_open() {
        let state = ModalState::open_add(String::new()).submit(require_name);

        let modal = state.modal().unwrap();
        assert!(!state.is_submitting());
        assert_eq!(modal.kind, ModalKind::Add);
        assert_eq!(modal.form.error("name"), Some("Name is required"));
    }

    #[test]
    fn test_valid_submit_then_success_closes() {
        let state = ModalState::open_edit("s1", "Karim".to_owned()).submit(require_name);
        assert!(state.is_submitting());
        assert!(state.modal().unwrap().form.submitting);

        let (state, banner) = state.finish(Ok("Seller updated successfully!".to_owned()));
        assert!(state.is_closed());
        assert_eq!(
            banner,
            Some(Banner::Success("Seller updated successfully!".to_owned()))
        );
    }

    #[test]
    fn test_failure_reopens_with_values() {
        let state = ModalState::open_edit("s1", "Karim".to_owned()).submit(require_name);
        let (state, banner) = state.finish(Err("Failed to update seller".to_owned()));

        let modal = state.modal().unwrap();
        assert!(!state.is_submitting());
        assert!(!modal.form.submitting);
        assert_eq!(modal.form.values, "Karim");
        assert_eq!(modal.target.as_deref(), Some("s1"));
        assert!(!banner.unwrap().is_success());
    }

    #[test]
    fn test_delete_skips_validation() {
        let state = ModalState::open_delete("pm1", String::new())
            .submit(|_| panic!("delete must not validate"));
        assert!(state.is_submitting());

        let (state, banner) = state.finish(Err("Failed to delete payment method".to_owned()));
        assert_eq!(state.modal().unwrap().kind, ModalKind::Delete);
        assert_eq!(banner.unwrap().message(), "Failed to delete payment method");
    }

    #[test]
    fn test_view_never_submits() {
        let state = ModalState::open_view("s1", "Karim".to_owned())
            .submit(|_| panic!("view must not validate"));
        assert!(!state.is_submitting());

        let (state, banner) = state.finish(Ok("ignored".to_owned()));
        assert_eq!(state.modal().unwrap().kind, ModalKind::View);
        assert!(banner.is_none());
    }

    #[test]
    fn test_close_discards_form() {
        let state = ModalState::open_add("draft".to_owned()).close();
        assert!(state.is_closed());
        assert!(state.modal().is_none());
    }

    #[test]
    fn test_banner_serde_shape() {
        let json = serde_json::to_value(Banner::Error("nope".to_owned())).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["message"], "nope");
    }
}
