pub mod auth;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod session;
pub mod shell;
pub mod ui;
pub mod views;

#[cfg(test)]
mod testing;

pub use error::{AppError, Result};
