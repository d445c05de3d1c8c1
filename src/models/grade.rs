//! Grade rows from `api/grades.php`.

use serde::Deserialize;

use super::lenient;

/// One course module with its marks. Marks are computed by the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GradeEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub nom_module: String,
    /// Partial mark.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub mp: Option<String>,
    /// Overall mark.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub mg: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cc1: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cc2: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cc3: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cc4: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub exam_theo: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub exam_prati: Option<String>,
}

/// Reply of `GET api/grades.php`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub notes: Vec<GradeEntry>,
}

impl GradeEntry {
    /// Continuous assessment marks that are present, numbered 1 to 4.
    pub fn components(&self) -> Vec<(u8, &str)> {
        [&self.cc1, &self.cc2, &self.cc3, &self.cc4]
            .into_iter()
            .zip(1u8..)
            .filter_map(|(mark, n)| mark.as_deref().map(|m| (n, m)))
            .collect()
    }
}

/// Text shown for an absent mark.
pub fn mark_text(mark: &Option<String>) -> &str {
    mark.as_deref().unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_mark_types() {
        let data = r#"{
            "success": true,
            "notes": [
                {"nom_module": "Bases de données", "mp": 12.5, "mg": "13.25",
                 "cc1": 14, "cc2": null, "cc3": "11", "exam_theo": 12, "exam_prati": "15"}
            ]
        }"#;
        let response: GradesResponse = serde_json::from_str(data).unwrap();
        assert!(response.success);

        let entry = &response.notes[0];
        assert_eq!(entry.mp.as_deref(), Some("12.5"));
        assert_eq!(entry.mg.as_deref(), Some("13.25"));
        assert_eq!(entry.components(), vec![(1, "14"), (3, "11")]);
        assert_eq!(mark_text(&entry.cc4), "-");
    }

    #[test]
    fn test_missing_notes_is_empty() {
        let response: GradesResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert!(response.notes.is_empty());
    }
}
