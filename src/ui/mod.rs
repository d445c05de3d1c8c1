//! GUI panels and application state.

pub mod absences_panel;
pub mod app;
pub mod components;
pub mod grades_panel;
pub mod home_panel;
pub mod login_panel;
pub mod projects_panel;
pub mod upload_panel;

pub use app::PortalApp;
