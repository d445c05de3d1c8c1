//! Student record and login exchange.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::value_text;

/// Student record as returned by the login endpoint.
///
/// The record is kept verbatim, so fields the client does not know about
/// survive a save/load cycle through the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Student(Map<String, Value>);

impl Student {
    /// Server-side identifier used by the grades endpoint.
    pub fn id(&self) -> Option<String> {
        self.text("id")
    }

    pub fn school_id(&self) -> String {
        self.text("school_id").unwrap_or_default()
    }

    pub fn name(&self) -> String {
        self.text("name").unwrap_or_default()
    }

    pub fn date_of_birth(&self) -> String {
        self.text("date_of_birth").unwrap_or_default()
    }

    pub fn class_name(&self) -> String {
        self.text("class").unwrap_or_default()
    }

    fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(value_text)
    }
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub school_id: String,
    /// Date of birth as `YYYY-MM-DD`.
    pub dob: String,
}

impl LoginRequest {
    pub fn new(school_id: &str, dob: NaiveDate) -> Self {
        Self {
            school_id: school_id.trim().to_string(),
            dob: dob.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Reply of `POST /api/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub student: Option<Student>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_student_accessors_accept_numbers() {
        let student: Student = serde_json::from_value(json!({
            "id": 42,
            "school_id": 20231234,
            "name": "Amine Ben Salah",
            "date_of_birth": "2002-03-14",
            "class": "L3 MIAGE"
        }))
        .unwrap();

        assert_eq!(student.id().as_deref(), Some("42"));
        assert_eq!(student.school_id(), "20231234");
        assert_eq!(student.name(), "Amine Ben Salah");
        assert_eq!(student.class_name(), "L3 MIAGE");
    }

    #[test]
    fn test_student_keeps_unknown_fields() {
        let raw = json!({"id": "7", "name": "Sara", "email": "sara@example.org"});
        let student: Student = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&student).unwrap(), raw);
    }

    #[test]
    fn test_login_request_formats_date() {
        let dob = NaiveDate::from_ymd_opt(2001, 9, 5).unwrap();
        let request = LoginRequest::new("  E123 ", dob);
        assert_eq!(request.school_id, "E123");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"school_id": "E123", "dob": "2001-09-05"})
        );
    }

    #[test]
    fn test_login_response_failure_without_student() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"success": false, "message": "Étudiant introuvable"}"#).unwrap();
        assert!(!response.success);
        assert!(response.student.is_none());
        assert_eq!(response.message.as_deref(), Some("Étudiant introuvable"));
    }
}
