//! Projects screen state: debounced search, sequenced replies, expand-many rows.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::error::Result;
use crate::models::{ProjectEntry, ProjectsResponse};

use super::LoadState;

/// A search to send, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    pub seq: u64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ProjectsView {
    pub filter: String,
    pub projects: Vec<ProjectEntry>,
    pub state: LoadState,
    debouncer: Debouncer<String>,
    latest_seq: u64,
    expanded: HashSet<String>,
}

impl ProjectsView {
    pub fn new(quiet: Duration) -> Self {
        Self {
            filter: String::new(),
            projects: Vec::new(),
            state: LoadState::Idle,
            debouncer: Debouncer::new(quiet),
            latest_seq: 0,
            expanded: HashSet::new(),
        }
    }

    /// Issue a search now for the current filter.
    pub fn refresh(&mut self) -> ProjectQuery {
        self.debouncer.cancel();
        self.issue(self.filter.clone())
    }

    /// The filter text changed; restart the quiet period.
    pub fn filter_changed(&mut self, now: Instant) {
        self.debouncer.schedule(self.filter.clone(), now);
    }

    /// Search to send once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<ProjectQuery> {
        self.debouncer.poll(now).map(|name| self.issue(name))
    }

    /// Time until a pending search fires.
    pub fn next_wake(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    fn issue(&mut self, name: String) -> ProjectQuery {
        self.latest_seq += 1;
        self.state = LoadState::Loading;
        tracing::debug!("Project search #{} for {:?}", self.latest_seq, name);
        ProjectQuery {
            seq: self.latest_seq,
            name,
        }
    }

    /// Apply a reply. Replies to superseded searches are dropped.
    ///
    /// Returns whether the reply was used.
    pub fn apply(&mut self, seq: u64, result: Result<ProjectsResponse>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!("Dropping stale project reply #{} (latest #{})", seq, self.latest_seq);
            return false;
        }

        match result {
            Ok(response) if response.success => {
                self.projects = response.projects;
                self.state = LoadState::settled(&self.projects);
            }
            Ok(_) => {
                self.projects.clear();
                self.state = LoadState::Empty;
            }
            Err(e) => {
                tracing::warn!("Project search #{} failed: {}", seq, e);
                self.projects.clear();
                self.state = LoadState::Failed(e.to_string());
            }
        }
        true
    }

    /// Flip one row. Rows expand independently.
    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PortalApi;
    use crate::error::AppError;
    use crate::testing::FakeApi;

    const QUIET: Duration = Duration::from_millis(500);

    fn project(id: &str, name: &str) -> ProjectEntry {
        ProjectEntry {
            id: id.to_string(),
            project_name: name.to_string(),
            ..Default::default()
        }
    }

    fn found(projects: Vec<ProjectEntry>) -> ProjectsResponse {
        ProjectsResponse {
            success: true,
            projects,
        }
    }

    #[tokio::test]
    async fn test_rapid_typing_sends_one_search() {
        let api = FakeApi::default().with_projects(found(Vec::new()));
        let mut view = ProjectsView::new(QUIET);
        let start = Instant::now();

        for (i, text) in ["G", "Ge", "Ges", "Gest", "Gestion"].into_iter().enumerate() {
            let now = start + Duration::from_millis(80 * i as u64);
            view.filter = text.to_string();
            view.filter_changed(now);
            assert!(view.poll(now).is_none());
        }

        let mut queries = Vec::new();
        for step in 0..20u64 {
            queries.extend(view.poll(start + Duration::from_millis(100 * step)));
        }
        assert_eq!(queries.len(), 1);

        for query in &queries {
            let reply = api.search_projects(&query.name).await;
            view.apply(query.seq, reply);
        }
        assert_eq!(api.calls(), vec!["projects:Gestion".to_string()]);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let mut view = ProjectsView::new(QUIET);
        let query = view.refresh();

        assert!(view.apply(query.seq, Ok(found(Vec::new()))));
        assert_eq!(view.state, LoadState::Empty);
    }

    #[test]
    fn test_stale_reply_is_dropped() {
        let mut view = ProjectsView::new(QUIET);
        let first = view.refresh();
        view.filter = "stock".to_string();
        let second = view.refresh();

        assert!(view.apply(second.seq, Ok(found(vec![project("2", "Gestion stock")]))));
        assert!(!view.apply(first.seq, Ok(found(vec![project("1", "Ancien")]))));

        assert_eq!(view.projects.len(), 1);
        assert_eq!(view.projects[0].project_name, "Gestion stock");
        assert_eq!(view.state, LoadState::Loaded);
    }

    #[test]
    fn test_latest_reply_waits_for_latest_query() {
        let mut view = ProjectsView::new(QUIET);
        let first = view.refresh();
        let _second = view.refresh();

        view.apply(first.seq, Ok(found(vec![project("1", "Ancien")])));
        assert!(view.state.is_loading());
        assert!(view.projects.is_empty());
    }

    #[test]
    fn test_failure_shows_empty_list() {
        let mut view = ProjectsView::new(QUIET);
        let query = view.refresh();
        view.apply(query.seq, Err(AppError::Timeout("projects".to_string())));

        assert!(view.projects.is_empty());
        assert!(matches!(view.state, LoadState::Failed(_)));
    }

    #[test]
    fn test_rows_expand_independently() {
        let mut view = ProjectsView::new(QUIET);
        view.toggle("1");
        view.toggle("2");
        assert!(view.is_expanded("1"));
        assert!(view.is_expanded("2"));

        view.toggle("1");
        assert!(!view.is_expanded("1"));
        assert!(view.is_expanded("2"));
    }

    #[test]
    fn test_refresh_cancels_pending_search() {
        let mut view = ProjectsView::new(QUIET);
        let start = Instant::now();
        view.filter = "web".to_string();
        view.filter_changed(start);

        let query = view.refresh();
        assert_eq!(query.name, "web");
        assert_eq!(view.poll(start + QUIET), None);
    }
}
