//! Student portal HTTP client.

use std::future::Future;
use std::sync::Arc;

use reqwest::{Client, StatusCode, Url, cookie::Jar};
use serde::de::DeserializeOwned;

use crate::config::{ApiConfig, PortalConfig};
use crate::error::{AppError, Result};
use crate::models::{AbsenceList, GradesResponse, LoginRequest, LoginResponse, ProjectsResponse};

/// Calls made against the portal API.
///
/// Flows are written against this trait so they can run without a server.
pub trait PortalApi: Send + Sync {
    /// `POST api/login`. A non-2xx reply with a JSON body comes back as
    /// `success: false` so its message can be shown.
    fn login(&self, request: &LoginRequest) -> impl Future<Output = Result<LoginResponse>> + Send;

    /// `GET api/grades.php?student_id=<id>`
    fn fetch_grades(&self, student_id: &str) -> impl Future<Output = Result<GradesResponse>> + Send;

    /// `GET api/projects.php?name=<filter>`
    fn search_projects(&self, name: &str) -> impl Future<Output = Result<ProjectsResponse>> + Send;

    /// The absences list endpoint.
    fn fetch_absences(&self) -> impl Future<Output = Result<AbsenceList>> + Send;
}

/// Portal HTTP client.
///
/// One instance is shared by every screen. Cookies set by the server are kept
/// for the lifetime of the client and every request carries a deadline.
pub struct PortalClient {
    client: Client,
    base_url: String,
    absences_url: String,
}

impl PortalClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `api` - API origin and request deadline
    /// * `portal` - External endpoints (absences list)
    pub fn new(api: &ApiConfig, portal: &PortalConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar)
            .timeout(api.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            absences_url: portal.absences_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{base}/{path}", base = self.base_url)
    }

    /// Public URL of an uploaded project file, with the name percent-encoded.
    pub fn file_url(&self, file: &str) -> Result<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::config(format!("Invalid API origin '{}': {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::config(format!("API origin '{}' cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .push("uploads")
            .push(file);
        Ok(url.to_string())
    }

    /// Check that a page answers at all. Any HTTP status counts as reachable.
    pub async fn probe(&self, url: &str) -> Result<()> {
        self.client.get(url).send().await?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status(status));
        }
        Ok(response.json().await?)
    }
}

impl PortalApi for PortalClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let url = self.endpoint("api/login");
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();

        match response.json::<LoginResponse>().await {
            Ok(body) if status.is_success() => Ok(body),
            Ok(body) => Ok(rejected(status, body)),
            Err(_) if !status.is_success() => Err(AppError::Status(status)),
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_grades(&self, student_id: &str) -> Result<GradesResponse> {
        let url = self.endpoint("api/grades.php");
        self.get_json(&url, &[("student_id", student_id)]).await
    }

    async fn search_projects(&self, name: &str) -> Result<ProjectsResponse> {
        let url = self.endpoint("api/projects.php");
        self.get_json(&url, &[("name", name)]).await
    }

    async fn fetch_absences(&self) -> Result<AbsenceList> {
        self.get_json(&self.absences_url, &[]).await
    }
}

fn rejected(status: StatusCode, body: LoginResponse) -> LoginResponse {
    tracing::debug!("Login answered {} with a JSON body", status);
    LoginResponse {
        success: false,
        student: None,
        ..body
    }
}
