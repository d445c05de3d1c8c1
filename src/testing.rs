//! Test doubles shared by unit tests.

use std::sync::Mutex;

use serde_json::json;

use crate::client::PortalApi;
use crate::error::{AppError, Result};
use crate::models::{AbsenceList, GradesResponse, LoginRequest, LoginResponse, ProjectsResponse, Student};

pub(crate) fn student() -> Student {
    serde_json::from_value(json!({
        "id": 17,
        "school_id": "E2024",
        "name": "Nour Trabelsi",
        "date_of_birth": "2003-02-01",
        "class": "L3 MIAGE"
    }))
    .unwrap()
}

/// Canned portal replies. A missing reply behaves like a server that never answers.
#[derive(Default)]
pub(crate) struct FakeApi {
    login: Option<LoginResponse>,
    grades: Option<GradesResponse>,
    projects: Option<ProjectsResponse>,
    absences: Option<AbsenceList>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_login(mut self, response: LoginResponse) -> Self {
        self.login = Some(response);
        self
    }

    pub fn with_grades(mut self, response: GradesResponse) -> Self {
        self.grades = Some(response);
        self
    }

    pub fn with_projects(mut self, response: ProjectsResponse) -> Self {
        self.projects = Some(response);
        self
    }

    pub fn with_absences(mut self, list: AbsenceList) -> Self {
        self.absences = Some(list);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn reply<T: Clone>(reply: &Option<T>) -> Result<T> {
        reply
            .clone()
            .ok_or_else(|| AppError::Timeout("http://fake.invalid/".to_string()))
    }
}

impl PortalApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.record(format!("login:{}:{}", request.school_id, request.dob));
        Self::reply(&self.login)
    }

    async fn fetch_grades(&self, student_id: &str) -> Result<GradesResponse> {
        self.record(format!("grades:{student_id}"));
        Self::reply(&self.grades)
    }

    async fn search_projects(&self, name: &str) -> Result<ProjectsResponse> {
        self.record(format!("projects:{name}"));
        Self::reply(&self.projects)
    }

    async fn fetch_absences(&self) -> Result<AbsenceList> {
        self.record("absences".to_string());
        Self::reply(&self.absences)
    }
}
