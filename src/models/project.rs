//! Project rows from `api/projects.php`.

use serde::Deserialize;

use super::lenient;

/// A submitted class project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub project_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub student_name: String,
    #[serde(default, rename = "class", deserialize_with = "lenient::string")]
    pub class_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub project_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub report_pdf: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub presentation_ppt: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub source_rar: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub upload_date: String,
}

/// Reply of `GET api/projects.php`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

/// Files a project may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Report,
    Presentation,
    Source,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 3] = [Self::Report, Self::Presentation, Self::Source];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Report => "Rapport (PDF)",
            Self::Presentation => "Présentation (PPT)",
            Self::Source => "Sources (RAR)",
        }
    }
}

impl ProjectEntry {
    /// Stored file name for an attachment, `None` when missing or blank.
    pub fn attachment(&self, kind: AttachmentKind) -> Option<&str> {
        let file = match kind {
            AttachmentKind::Report => &self.report_pdf,
            AttachmentKind::Presentation => &self.presentation_ppt,
            AttachmentKind::Source => &self.source_rar,
        };
        file.as_deref().map(str::trim).filter(|f| !f.is_empty())
    }
}
