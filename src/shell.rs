//! Navigation shell: route stack plus the session it is driven by.

use crate::error::Result;
use crate::models::Student;
use crate::session::{KeyValueStore, SessionContext, SessionStore};

/// Named screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Home,
    Grades,
    Projects,
    Absences,
    Upload,
}

impl Route {
    /// Get the display name for the screen.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Connexion",
            Route::Home => "Accueil",
            Route::Grades => "Notes",
            Route::Projects => "Projets",
            Route::Absences => "Absences",
            Route::Upload => "Déposer un projet",
        }
    }

    /// Screens that need a signed-in student.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// Stack of screens. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new(root: Route) -> Self {
        Self { stack: vec![root] }
    }

    /// Home when a student is stored, Login otherwise.
    pub fn initial_route(student: Option<&Student>) -> Route {
        if student.is_some() { Route::Home } else { Route::Login }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or_default()
    }

    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Drop the top screen. The root screen is never popped.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Replace the whole stack with a single screen.
    pub fn replace(&mut self, route: Route) {
        self.stack.clear();
        self.stack.push(route);
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Session plus navigation, the state every screen hangs off.
#[derive(Debug)]
pub struct Shell<S> {
    session: SessionContext<S>,
    nav: Navigator,
}

impl<S: KeyValueStore> Shell<S> {
    /// Restore the stored session and pick the first screen from it.
    pub fn start(store: SessionStore<S>) -> Self {
        let session = SessionContext::restore(store);
        let nav = Navigator::new(Navigator::initial_route(session.current()));
        tracing::info!("Starting on {:?}", nav.current());
        Self { session, nav }
    }

    pub fn student(&self) -> Option<&Student> {
        self.session.current()
    }

    pub fn route(&self) -> Route {
        self.nav.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn session(&self) -> &SessionContext<S> {
        &self.session
    }

    /// Apply the outcome of a login attempt.
    ///
    /// Success stores the student and replaces the stack with Home. Failure
    /// leaves both session and navigation untouched and hands the error back.
    pub fn finish_login(&mut self, outcome: Result<Student>) -> Result<()> {
        let student = outcome?;
        self.session.sign_in(student)?;
        self.nav.replace(Route::Home);
        Ok(())
    }

    pub fn logout(&mut self) {
        tracing::info!("Logging out");
        self.session.sign_out();
        self.nav.replace(Route::Login);
    }

    /// Open a screen on top of the current one.
    pub fn open(&mut self, route: Route) {
        if route.requires_session() && !self.session.is_signed_in() {
            tracing::warn!("Ignoring navigation to {:?} without a session", route);
            return;
        }
        self.nav.push(route);
    }

    pub fn back(&mut self) -> bool {
        self.nav.pop()
    }

    pub fn into_store(self) -> SessionStore<S> {
        self.session.into_store()
    }
}
