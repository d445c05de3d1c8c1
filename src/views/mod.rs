//! Per-screen view state, kept apart from rendering so it can be tested.

pub mod absences;
pub mod grades;
pub mod projects;
pub mod upload;

pub use absences::AbsencesView;
pub use grades::GradesView;
pub use projects::{ProjectQuery, ProjectsView};
pub use upload::{NavigationDecision, PortalStatus, UploadPortal};

/// Where a remote list is in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Empty,
    /// Request failed; the list is shown empty.
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    fn settled<T>(items: &[T]) -> Self {
        if items.is_empty() { LoadState::Empty } else { LoadState::Loaded }
    }
}
