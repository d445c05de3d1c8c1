//! Data models for students, grades, projects and the absences list.

pub mod absence;
pub mod grade;
pub mod project;
pub mod student;

pub use absence::{AbsenceItem, AbsenceList};
pub use grade::{GradeEntry, GradesResponse};
pub use project::{AttachmentKind, ProjectEntry, ProjectsResponse};
pub use student::{LoginRequest, LoginResponse, Student};

use serde_json::Value;

/// Render a scalar JSON value as display text.
///
/// The portal mixes numbers and strings for the same field depending on the
/// row, so every scalar is shown as text. Arrays and objects have no text form.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Serde adapters accepting a string, a number or null.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::value_text;

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value_text(&value).unwrap_or_default())
    }

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value_text(&value))
    }
}
