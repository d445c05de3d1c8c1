//! Student login.

use chrono::NaiveDate;

use crate::client::PortalApi;
use crate::error::{AppError, Result};
use crate::models::{LoginRequest, Student};

/// Shown when the server refuses a login without saying why.
pub const GENERIC_LOGIN_FAILURE: &str = "Échec de connexion.";

/// Login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub school_id: String,
    pub dob: Option<NaiveDate>,
}

impl LoginForm {
    /// Check both fields are filled and build the request body.
    pub fn to_request(&self) -> Result<LoginRequest> {
        match self.dob {
            Some(dob) if !self.school_id.trim().is_empty() => Ok(LoginRequest::new(&self.school_id, dob)),
            _ => Err(AppError::validation("Veuillez remplir tous les champs.")),
        }
    }
}

/// Validate the form and make one login attempt.
///
/// Returns the student record on success. Invalid input fails before any
/// request is made.
pub async fn submit<A: PortalApi>(api: &A, form: &LoginForm) -> Result<Student> {
    let request = form.to_request()?;
    tracing::info!("Login attempt for {}", request.school_id);

    let response = api.login(&request).await?;
    match response.student {
        Some(student) if response.success => {
            tracing::info!("Login succeeded for {}", request.school_id);
            Ok(student)
        }
        _ => {
            let message = response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string());
            tracing::warn!("Login refused for {}: {}", request.school_id, message);
            Err(AppError::LoginRejected(message))
        }
    }
}

/// Text for the login error dialog.
pub fn failure_message(err: &AppError) -> String {
    match err {
        AppError::Validation(msg) | AppError::LoginRejected(msg) => msg.clone(),
        AppError::Timeout(_) => "Le serveur ne répond pas. Réessayez plus tard.".to_string(),
        other => format!("Impossible de se connecter au serveur. {other}"),
    }
}
