//! Project upload portal.
//!
//! The upload site is a web page. The client keeps its own navigation
//! history, so only pages under the portal origin stay inside the screen and
//! anything else goes to the system browser.

use reqwest::Url;

use crate::error::Result;

/// Where a navigation request should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    LoadInPlace,
    OpenExternal,
}

/// Reachability of the portal page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PortalStatus {
    /// No page requested yet
    #[default]
    Idle,
    Checking,
    Online,
    Offline(String),
}

#[derive(Debug, Clone)]
pub struct UploadPortal {
    home: String,
    scope: Option<Url>,
    history: Vec<String>,
    pub status: PortalStatus,
    generation: u64,
}

impl UploadPortal {
    pub fn new(home: &str) -> Self {
        let scope = match Url::parse(home) {
            Ok(mut url) => {
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                Some(url)
            }
            Err(e) => {
                tracing::warn!("Upload portal address '{}' is not a URL: {}", home, e);
                None
            }
        };

        Self {
            home: home.to_string(),
            scope,
            history: vec![home.to_string()],
            status: PortalStatus::Idle,
            generation: 0,
        }
    }

    pub fn current_url(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or(&self.home)
    }

    /// Same scheme, host and port as the portal, under its path.
    fn in_scope(&self, url: &str) -> bool {
        let (Some(scope), Ok(url)) = (&self.scope, Url::parse(url)) else {
            return false;
        };
        if url.origin() != scope.origin() {
            return false;
        }
        let base = scope.path();
        url.path() == base.trim_end_matches('/') || url.path().starts_with(base)
    }

    /// Decide a navigation request.
    ///
    /// In-scope pages join the history and start a new reachability check;
    /// use `generation` for the probe.
    pub fn request(&mut self, url: &str) -> NavigationDecision {
        if self.in_scope(url) {
            if self.current_url() != url {
                self.history.push(url.to_string());
            }
            self.check();
            NavigationDecision::LoadInPlace
        } else {
            tracing::info!("Opening {} outside the portal", url);
            NavigationDecision::OpenExternal
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Step back through the portal history.
    ///
    /// Returns false when there is nothing to go back to, so the caller
    /// falls through to its default back action.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.history.pop();
            true
        } else {
            false
        }
    }

    /// Begin a reachability check of the current page.
    ///
    /// Returns the generation the probe must report with. Earlier probes are
    /// ignored from here on.
    pub fn check(&mut self) -> u64 {
        self.status = PortalStatus::Checking;
        self.generation += 1;
        self.generation
    }

    /// Start over from the portal home. Returns the generation of the new probe.
    pub fn reload(&mut self) -> u64 {
        self.history.truncate(1);
        self.check()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_checking(&self) -> bool {
        self.status == PortalStatus::Checking
    }

    /// Record a reachability probe. Only the latest check counts.
    pub fn apply_probe(&mut self, generation: u64, result: Result<()>) {
        if generation != self.generation {
            tracing::debug!("Dropping probe {} (latest {})", generation, self.generation);
            return;
        }
        self.status = match result {
            Ok(()) => PortalStatus::Online,
            Err(e) => {
                tracing::warn!("Upload portal unreachable: {}", e);
                PortalStatus::Offline(e.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const ORIGIN: &str = "https://miageksar.ct.ws/";

    #[test]
    fn test_same_origin_loads_in_place() {
        let mut portal = UploadPortal::new(ORIGIN);
        let decision = portal.request("https://miageksar.ct.ws/upload.php?step=2");

        assert_eq!(decision, NavigationDecision::LoadInPlace);
        assert_eq!(portal.current_url(), "https://miageksar.ct.ws/upload.php?step=2");
    }

    #[test]
    fn test_foreign_url_opens_externally() {
        let mut portal = UploadPortal::new(ORIGIN);
        let decision = portal.request("https://drive.google.com/file/d/abc");

        assert_eq!(decision, NavigationDecision::OpenExternal);
        assert_eq!(portal.current_url(), ORIGIN);
        assert!(!portal.can_go_back());
    }

    #[test]
    fn test_back_uses_history_first() {
        let mut portal = UploadPortal::new(ORIGIN);
        portal.request("https://miageksar.ct.ws/a");
        portal.request("https://miageksar.ct.ws/b");

        assert!(portal.back());
        assert_eq!(portal.current_url(), "https://miageksar.ct.ws/a");
        assert!(portal.back());
        assert_eq!(portal.current_url(), ORIGIN);
        assert!(!portal.back());
    }

    #[test]
    fn test_lookalike_host_opens_externally() {
        let mut portal = UploadPortal::new("https://miageksar.ct.ws");
        assert_eq!(
            portal.request("https://miageksar.ct.ws.evil.example/phish"),
            NavigationDecision::OpenExternal
        );
        assert_eq!(portal.request("http://miageksar.ct.ws/"), NavigationDecision::OpenExternal);
        assert_eq!(portal.request("https://miageksar.ct.ws/upload.php"), NavigationDecision::LoadInPlace);
    }

    #[test]
    fn test_portal_path_is_a_directory_prefix() {
        let mut portal = UploadPortal::new("https://school.example/portal");
        assert_eq!(portal.request("https://school.example/portalevil"), NavigationDecision::OpenExternal);
        assert_eq!(portal.request("https://school.example/portal/step2"), NavigationDecision::LoadInPlace);
    }

    #[test]
    fn test_new_portal_is_idle_until_checked() {
        let mut portal = UploadPortal::new(ORIGIN);
        assert_eq!(portal.status, PortalStatus::Idle);
        assert!(!portal.is_checking());

        portal.check();
        assert!(portal.is_checking());
    }

    #[test]
    fn test_probe_for_previous_page_is_ignored() {
        let mut portal = UploadPortal::new(ORIGIN);
        portal.request("https://miageksar.ct.ws/a");
        let page_a = portal.generation();
        portal.request("https://miageksar.ct.ws/b");
        let page_b = portal.generation();
        assert_ne!(page_a, page_b);

        portal.apply_probe(page_a, Err(AppError::Timeout("https://miageksar.ct.ws/a".to_string())));
        assert_eq!(portal.status, PortalStatus::Checking);

        portal.apply_probe(page_b, Ok(()));
        assert_eq!(portal.status, PortalStatus::Online);

        portal.apply_probe(page_a, Ok(()));
        assert_eq!(portal.status, PortalStatus::Online);
    }

    #[test]
    fn test_reload_resets_and_ignores_old_probe() {
        let mut portal = UploadPortal::new(ORIGIN);
        let first = portal.check();
        portal.apply_probe(first, Err(AppError::Timeout(ORIGIN.to_string())));
        assert!(matches!(portal.status, PortalStatus::Offline(_)));
        portal.request("https://miageksar.ct.ws/a");

        let second = portal.reload();
        assert_eq!(portal.status, PortalStatus::Checking);
        assert_eq!(portal.current_url(), ORIGIN);

        portal.apply_probe(first, Err(AppError::Timeout(ORIGIN.to_string())));
        assert_eq!(portal.status, PortalStatus::Checking);

        portal.apply_probe(second, Ok(()));
        assert_eq!(portal.status, PortalStatus::Online);
    }
}
