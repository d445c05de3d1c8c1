//! Main application UI.

use std::sync::{Arc, mpsc};
use std::time::Instant;

use chrono::NaiveDate;
use eframe::egui::{self, Align, Layout, RichText};

use crate::auth::{self, LoginForm};
use crate::client::{PortalApi, PortalClient};
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{AbsenceList, GradesResponse, ProjectsResponse, Student};
use crate::session::{FileStore, SessionStore};
use crate::shell::{Route, Shell};
use crate::views::{AbsencesView, GradesView, NavigationDecision, ProjectQuery, ProjectsView, UploadPortal};

use super::components::colors;
use super::{absences_panel, grades_panel, home_panel, login_panel, projects_panel, upload_panel};

type ProjectReply = (u64, Result<ProjectsResponse>);
type ProbeReply = (u64, Result<()>);

/// Main application state.
pub struct PortalApp {
    config: AppConfig,
    rt: tokio::runtime::Runtime,
    api: Arc<PortalClient>,
    shell: Shell<FileStore>,

    // Login
    login_form: LoginForm,
    dob_picker: NaiveDate,
    login_rx: Option<mpsc::Receiver<Result<Student>>>,
    error_dialog: Option<String>,

    // Grades
    grades: GradesView,
    grades_rx: Option<mpsc::Receiver<Result<GradesResponse>>>,

    // Projects: replies from every in-flight search share one channel
    projects: ProjectsView,
    projects_tx: mpsc::Sender<ProjectReply>,
    projects_rx: mpsc::Receiver<ProjectReply>,

    // Absences
    absences: AbsencesView,
    absences_rx: Option<mpsc::Receiver<Result<AbsenceList>>>,

    // Upload portal
    upload: UploadPortal,
    upload_address: String,
    probe_tx: mpsc::Sender<ProbeReply>,
    probe_rx: mpsc::Receiver<ProbeReply>,
}

impl PortalApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        rt: tokio::runtime::Runtime,
        api: PortalClient,
        store: SessionStore<FileStore>,
    ) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let (projects_tx, projects_rx) = mpsc::channel();
        let (probe_tx, probe_rx) = mpsc::channel();
        let upload = UploadPortal::new(&config.portal.upload_url);
        let upload_address = upload.current_url().to_string();

        Self {
            projects: ProjectsView::new(config.ui.search_debounce()),
            config,
            rt,
            api: Arc::new(api),
            shell: Shell::start(store),
            login_form: LoginForm::default(),
            dob_picker: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
            login_rx: None,
            error_dialog: None,
            grades: GradesView::default(),
            grades_rx: None,
            projects_tx,
            projects_rx,
            absences: AbsencesView::default(),
            absences_rx: None,
            upload,
            upload_address,
            probe_tx,
            probe_rx,
        }
    }

    /// Submit the login form in the background.
    fn start_login(&mut self) {
        let (tx, rx) = mpsc::channel();
        self.login_rx = Some(rx);

        let api = Arc::clone(&self.api);
        let form = self.login_form.clone();
        self.rt.spawn(async move {
            let result = auth::submit(&*api, &form).await;
            let _ = tx.send(result);
        });
    }

    /// Open a screen and start whatever it loads on entry.
    fn navigate(&mut self, route: Route) {
        self.shell.open(route);
        if self.shell.route() == route {
            self.enter(route);
        }
    }

    fn go_back(&mut self) {
        self.shell.back();
    }

    fn logout(&mut self) {
        self.shell.logout();
        self.login_form = LoginForm::default();
        self.grades = GradesView::default();
        self.grades_rx = None;
        self.absences = AbsencesView::default();
        self.absences_rx = None;
    }

    fn enter(&mut self, route: Route) {
        match route {
            Route::Grades => self.load_grades(),
            Route::Projects => {
                self.projects = ProjectsView::new(self.config.ui.search_debounce());
                let query = self.projects.refresh();
                self.search_projects(query);
            }
            Route::Absences => {
                self.absences = AbsencesView::default();
                self.load_absences();
            }
            Route::Upload => {
                self.upload = UploadPortal::new(&self.config.portal.upload_url);
                self.upload_address = self.upload.current_url().to_string();
                self.upload.check();
                self.probe_portal();
            }
            Route::Login | Route::Home => {}
        }
    }

    fn load_grades(&mut self) {
        let Some(student_id) = self.grades.begin(self.shell.student()) else {
            self.grades_rx = None;
            return;
        };

        let (tx, rx) = mpsc::channel();
        self.grades_rx = Some(rx);

        let api = Arc::clone(&self.api);
        self.rt.spawn(async move {
            let result = api.fetch_grades(&student_id).await;
            let _ = tx.send(result);
        });
    }

    fn search_projects(&mut self, query: ProjectQuery) {
        let api = Arc::clone(&self.api);
        let tx = self.projects_tx.clone();
        self.rt.spawn(async move {
            let result = api.search_projects(&query.name).await;
            let _ = tx.send((query.seq, result));
        });
    }

    fn load_absences(&mut self) {
        if !self.absences.begin() {
            return;
        }

        let (tx, rx) = mpsc::channel();
        self.absences_rx = Some(rx);

        let api = Arc::clone(&self.api);
        self.rt.spawn(async move {
            let result = api.fetch_absences().await;
            let _ = tx.send(result);
        });
    }

    /// Probe the current portal page for the latest check.
    fn probe_portal(&mut self) {
        let generation = self.upload.generation();
        let url = self.upload.current_url().to_string();
        let api = Arc::clone(&self.api);
        let tx = self.probe_tx.clone();
        self.rt.spawn(async move {
            let result = api.probe(&url).await;
            let _ = tx.send((generation, result));
        });
    }

    fn open_project_file(&self, ctx: &egui::Context, file: &str) {
        match self.api.file_url(file) {
            Ok(url) => ctx.open_url(egui::OpenUrl::new_tab(url)),
            Err(e) => tracing::warn!("Cannot open project file {}: {}", file, e),
        }
    }

    fn upload_navigate(&mut self, ctx: &egui::Context, url: String) {
        if url.is_empty() {
            return;
        }
        match self.upload.request(&url) {
            NavigationDecision::LoadInPlace => self.probe_portal(),
            NavigationDecision::OpenExternal => {
                ctx.open_url(egui::OpenUrl::new_tab(url));
                self.upload_address = self.upload.current_url().to_string();
            }
        }
    }

    /// Back on the upload screen walks the portal history first.
    fn upload_back(&mut self) {
        if self.upload.back() {
            self.upload_address = self.upload.current_url().to_string();
        } else {
            self.go_back();
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        if let Some(rx) = &self.login_rx
            && let Ok(result) = rx.try_recv()
        {
            self.login_rx = None;
            match self.shell.finish_login(result) {
                Ok(()) => {
                    self.login_form = LoginForm::default();
                    self.error_dialog = None;
                }
                Err(e) => self.error_dialog = Some(auth::failure_message(&e)),
            }
        }

        if let Some(rx) = &self.grades_rx
            && let Ok(result) = rx.try_recv()
        {
            self.grades_rx = None;
            self.grades.apply(result);
        }

        while let Ok((seq, result)) = self.projects_rx.try_recv() {
            self.projects.apply(seq, result);
        }

        if let Some(rx) = &self.absences_rx
            && let Ok(result) = rx.try_recv()
        {
            self.absences_rx = None;
            self.absences.apply(result);
        }

        while let Ok((generation, result)) = self.probe_rx.try_recv() {
            self.upload.apply_probe(generation, result);
        }
    }

    /// Fire the project search once typing has paused.
    fn poll_search_debounce(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(query) = self.projects.poll(now) {
            self.search_projects(query);
        }
        if let Some(wait) = self.projects.next_wake(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn is_busy(&self) -> bool {
        self.login_rx.is_some()
            || self.grades_rx.is_some()
            || self.absences_rx.is_some()
            || self.projects.state.is_loading()
            || self.upload.is_checking()
    }

    /// Render top bar with the current screen and student.
    fn show_top_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").min_height(32.0).show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(self.shell.route().title()).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if let Some(student) = self.shell.student() {
                        ui.label(
                            RichText::new(format!("{} · {}", student.name(), student.class_name()))
                                .color(colors::NEUTRAL),
                        );
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("API: {}", self.config.api.base_url)).small());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.is_busy() {
                            ui.spinner();
                        }
                    });
                });
            });
    }

    /// Render blocking error dialog.
    fn show_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.error_dialog else {
            return;
        };

        let mut open = true;
        let mut dismissed = false;
        egui::Window::new("Erreur")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                ui.colored_label(colors::ERROR, message);
                ui.add_space(15.0);
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if !open || dismissed {
            self.error_dialog = None;
        }
    }
}

impl eframe::App for PortalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();
        self.poll_search_debounce(ctx);

        // Request repaint during async operations
        if self.is_busy() {
            ctx.request_repaint();
        }

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        self.show_error_dialog(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.shell.route() {
            Route::Login => {
                let busy = self.login_rx.is_some();
                if login_panel::show(ui, &mut self.login_form, &mut self.dob_picker, busy) {
                    self.start_login();
                }
            }
            Route::Home => match home_panel::show(ui, self.shell.student()) {
                home_panel::Action::None => {}
                home_panel::Action::Open(route) => self.navigate(route),
                home_panel::Action::Logout => self.logout(),
            },
            Route::Grades => {
                if grades_panel::show(ui, &mut self.grades) {
                    self.go_back();
                }
            }
            Route::Projects => match projects_panel::show(ui, &mut self.projects) {
                projects_panel::Action::None => {}
                projects_panel::Action::GoBack => self.go_back(),
                projects_panel::Action::FilterChanged => self.projects.filter_changed(Instant::now()),
                projects_panel::Action::Refresh => {
                    let query = self.projects.refresh();
                    self.search_projects(query);
                }
                projects_panel::Action::OpenFile(file) => self.open_project_file(ctx, &file),
            },
            Route::Absences => {
                if absences_panel::show(ui, &self.absences) {
                    self.go_back();
                }
            }
            Route::Upload => match upload_panel::show(ui, &self.upload, &mut self.upload_address) {
                upload_panel::Action::None => {}
                upload_panel::Action::GoBack => self.upload_back(),
                upload_panel::Action::Reload => {
                    self.upload.reload();
                    self.upload_address = self.upload.current_url().to_string();
                    self.probe_portal();
                }
                upload_panel::Action::Navigate(url) => self.upload_navigate(ctx, url),
                upload_panel::Action::OpenCurrent => {
                    ctx.open_url(egui::OpenUrl::new_tab(self.upload.current_url()));
                }
            },
        });

        // Mouse back button mirrors the hardware back key
        if ctx.input(|i| i.pointer.button_pressed(egui::PointerButton::Extra1)) {
            match self.shell.route() {
                Route::Upload => self.upload_back(),
                _ => self.go_back(),
            }
        }
    }
}
