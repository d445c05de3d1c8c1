//! Absences screen state. Loaded once, no interaction.

use crate::error::Result;
use crate::models::{AbsenceItem, AbsenceList};

use super::LoadState;

#[derive(Debug, Clone, Default)]
pub struct AbsencesView {
    pub items: Vec<AbsenceItem>,
    pub state: LoadState,
}

impl AbsencesView {
    /// Returns true when a fetch should be started.
    pub fn begin(&mut self) -> bool {
        if self.state != LoadState::Idle {
            return false;
        }
        self.state = LoadState::Loading;
        true
    }

    pub fn apply(&mut self, result: Result<AbsenceList>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::settled(&self.items);
            }
            Err(e) => {
                tracing::warn!("Failed to load absences: {}", e);
                self.items.clear();
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PortalApi;
    use crate::testing::FakeApi;

    #[test]
    fn test_fetches_once() {
        let mut view = AbsencesView::default();
        assert!(view.begin());
        assert!(!view.begin());

        view.apply(Ok(Vec::new()));
        assert!(!view.begin());
        assert_eq!(view.state, LoadState::Empty);
    }

    #[tokio::test]
    async fn test_loads_items() {
        let item = AbsenceItem {
            id: "1".to_string(),
            title: "Absence 12/03".to_string(),
            body: "Cours de réseaux".to_string(),
        };
        let api = FakeApi::default().with_absences(vec![item.clone()]);

        let mut view = AbsencesView::default();
        view.begin();
        view.apply(api.fetch_absences().await);

        assert_eq!(view.items, vec![item]);
        assert_eq!(view.state, LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_failure_shows_empty_list() {
        let api = FakeApi::default();
        let mut view = AbsencesView::default();
        view.begin();
        view.apply(api.fetch_absences().await);

        assert!(view.items.is_empty());
        assert!(matches!(view.state, LoadState::Failed(_)));
    }
}
