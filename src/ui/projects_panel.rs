//! Projects screen: debounced name search, rows expand independently.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_PDF, FILE_PPT, FILE_ZIP, MAGNIFYING_GLASS};

use crate::models::{AttachmentKind, ProjectEntry};
use crate::views::{LoadState, ProjectsView};

use super::components::{back_button, card_frame, colors, empty_state, icon_button, loading, panel_header};

pub enum Action {
    None,
    GoBack,
    FilterChanged,
    Refresh,
    OpenFile(String),
}

/// Show the projects panel.
pub fn show(ui: &mut Ui, view: &mut ProjectsView) -> Action {
    let mut action = Action::None;

    if back_button(ui) {
        action = Action::GoBack;
    }

    panel_header(ui, "Projets");

    ui.horizontal(|ui| {
        ui.label(MAGNIFYING_GLASS);
        let response = ui.add(
            egui::TextEdit::singleline(&mut view.filter)
                .desired_width(280.0)
                .hint_text("Rechercher ex: Gestion stock"),
        );
        if response.changed() {
            action = Action::FilterChanged;
        }

        ui.add_space(10.0);

        if icon_button(ui, !view.state.is_loading(), ARROWS_CLOCKWISE, "Actualiser").clicked() {
            action = Action::Refresh;
        }
    });

    ui.add_space(10.0);

    match &view.state {
        LoadState::Idle | LoadState::Loading => {
            loading(ui, "Recherche...");
            return action;
        }
        LoadState::Failed(reason) => {
            empty_state(ui, "Aucun projet trouvé.", Some(reason.as_str()));
            return action;
        }
        LoadState::Empty => {
            empty_state(ui, "Aucun projet trouvé.", None);
            return action;
        }
        LoadState::Loaded => {}
    }

    let mut toggled = None;

    ScrollArea::vertical().id_salt("projects_scroll").show(ui, |ui| {
        for project in &view.projects {
            let expanded = view.is_expanded(&project.id);

            card_frame(ui).show(ui, |ui| {
                ui.set_width(ui.available_width());

                let title = RichText::new(&project.project_name).size(16.0).strong();
                if ui.selectable_label(expanded, title).clicked() {
                    toggled = Some(project.id.clone());
                }

                if expanded {
                    ui.add_space(6.0);
                    if let Some(file) = show_details(ui, project) {
                        action = Action::OpenFile(file);
                    }
                }
            });
        }
    });

    if let Some(id) = toggled {
        view.toggle(&id);
    }

    action
}

/// Render the expanded part of a row. Returns the file to open, if clicked.
fn show_details(ui: &mut Ui, project: &ProjectEntry) -> Option<String> {
    let mut open = None;

    ui.label(format!("Étudiant: {} ({})", project.student_name, project.class_name));
    ui.label(format!("Type: {}", project.project_type));
    if !project.description.is_empty() {
        ui.label(RichText::new(&project.description).weak());
    }

    ui.add_space(6.0);

    ui.horizontal(|ui| {
        for kind in AttachmentKind::ALL {
            let file = project.attachment(kind);
            let icon = match kind {
                AttachmentKind::Report => FILE_PDF,
                AttachmentKind::Presentation => FILE_PPT,
                AttachmentKind::Source => FILE_ZIP,
            };
            if icon_button(ui, file.is_some(), icon, kind.label()).clicked()
                && let Some(file) = file
            {
                open = Some(file.to_string());
            }
        }
    });

    ui.add_space(4.0);
    ui.label(
        RichText::new(format!("Date: {}", project.upload_date))
            .italics()
            .small()
            .color(colors::NEUTRAL),
    );

    open
}
