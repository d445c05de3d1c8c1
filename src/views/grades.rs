//! Grades screen state.

use crate::error::Result;
use crate::models::{GradeEntry, GradesResponse, Student};

use super::LoadState;

/// Grade rows with at most one row expanded.
#[derive(Debug, Clone, Default)]
pub struct GradesView {
    pub rows: Vec<GradeEntry>,
    pub state: LoadState,
    expanded: Option<usize>,
}

impl GradesView {
    /// Start loading for the signed-in student.
    ///
    /// Returns the id to request, or `None` when there is nobody to load for.
    pub fn begin(&mut self, student: Option<&Student>) -> Option<String> {
        self.rows.clear();
        self.expanded = None;

        match student.and_then(Student::id) {
            Some(id) => {
                self.state = LoadState::Loading;
                Some(id)
            }
            None => {
                self.state = LoadState::Empty;
                None
            }
        }
    }

    /// Replace the rows with a response. Any failure leaves the list empty.
    pub fn apply(&mut self, result: Result<GradesResponse>) {
        self.expanded = None;
        match result {
            Ok(response) if response.success => {
                self.rows = response.notes;
                self.state = LoadState::settled(&self.rows);
            }
            Ok(_) => {
                self.rows.clear();
                self.state = LoadState::Empty;
            }
            Err(e) => {
                tracing::warn!("Failed to load grades: {}", e);
                self.rows.clear();
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Expand `index`, collapsing any other row. Toggling the open row closes it.
    pub fn toggle(&mut self, index: usize) {
        self.expanded = if self.expanded == Some(index) { None } else { Some(index) };
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PortalApi;
    use crate::testing::{FakeApi, student};

    fn rows(n: usize) -> GradesResponse {
        GradesResponse {
            success: true,
            notes: (0..n)
                .map(|i| GradeEntry {
                    nom_module: format!("Module {i}"),
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_toggle_is_exclusive() {
        let mut view = GradesView::default();
        view.apply(Ok(rows(3)));

        view.toggle(0);
        view.toggle(2);
        assert!(!view.is_expanded(0));
        assert!(view.is_expanded(2));

        view.toggle(2);
        assert_eq!(view.expanded(), None);
        assert!((0..3).all(|i| !view.is_expanded(i)));
    }

    #[test]
    fn test_no_student_requests_nothing() {
        let mut view = GradesView::default();
        assert_eq!(view.begin(None), None);
        assert_eq!(view.state, LoadState::Empty);
    }

    #[test]
    fn test_keeps_server_order() {
        let mut view = GradesView::default();
        view.begin(Some(&student()));
        view.apply(Ok(rows(3)));

        let names: Vec<_> = view.rows.iter().map(|r| r.nom_module.as_str()).collect();
        assert_eq!(names, vec!["Module 0", "Module 1", "Module 2"]);
        assert_eq!(view.state, LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_unreachable_server_clears_loading() {
        let api = FakeApi::default();
        let mut view = GradesView::default();

        let id = view.begin(Some(&student())).unwrap();
        assert!(view.state.is_loading());
        assert_eq!(id, "17");

        view.apply(api.fetch_grades(&id).await);
        assert!(!view.state.is_loading());
        assert!(matches!(view.state, LoadState::Failed(_)));
        assert!(view.rows.is_empty());
        assert_eq!(api.calls(), vec!["grades:17".to_string()]);
    }

    #[tokio::test]
    async fn test_success_flag_false_is_empty() {
        let api = FakeApi::default().with_grades(GradesResponse {
            success: false,
            notes: Vec::new(),
        });
        let mut view = GradesView::default();
        let id = view.begin(Some(&student())).unwrap();

        view.apply(api.fetch_grades(&id).await);
        assert_eq!(view.state, LoadState::Empty);
    }
}
