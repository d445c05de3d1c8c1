//! Home screen: student card and navigation cards.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{CALENDAR_X, CHART_BAR, FOLDER_OPEN, SIGN_OUT, UPLOAD_SIMPLE, USER_CIRCLE};

use crate::models::Student;
use crate::shell::Route;

use super::components::{card_frame, colors, dashboard_card, icon_button};

pub enum Action {
    None,
    Open(Route),
    Logout,
}

/// Show the home panel.
pub fn show(ui: &mut Ui, student: Option<&Student>) -> Action {
    let mut action = Action::None;

    let Some(student) = student else {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(RichText::new("Chargement des données...").weak());
        });
        return action;
    };

    ui.vertical_centered(|ui| {
        ui.add_space(20.0);

        card_frame(ui).show(ui, |ui| {
            ui.set_max_width(420.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(USER_CIRCLE).size(56.0).color(colors::ACCENT));
                ui.label(RichText::new(student.name()).size(22.0).strong());
            });
            ui.add_space(10.0);

            egui::Grid::new("student_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("ID scolaire:").strong());
                    ui.label(student.school_id());
                    ui.end_row();

                    ui.label(RichText::new("Date de naissance:").strong());
                    ui.label(student.date_of_birth());
                    ui.end_row();

                    ui.label(RichText::new("Classe:").strong());
                    ui.label(student.class_name());
                    ui.end_row();
                });
        });

        ui.add_space(30.0);
    });

    // Navigation cards, two per row
    let available = ui.available_width();
    let spacing = 30.0;
    let card_width = ((available - spacing) / 2.0).clamp(150.0, 240.0);
    let card_size = egui::vec2(card_width, card_width * 0.7);
    let start_offset = ((available - (card_width * 2.0 + spacing)) / 2.0).max(0.0);

    let cards = [
        [
            ("Déposer un projet", "Portail de dépôt", UPLOAD_SIMPLE, Route::Upload),
            ("Voir les projets", "Rechercher les projets", FOLDER_OPEN, Route::Projects),
        ],
        [
            ("Voir les notes", "Notes par module", CHART_BAR, Route::Grades),
            ("Voir les absences", "Liste des absences", CALENDAR_X, Route::Absences),
        ],
    ];

    for row in cards {
        ui.horizontal(|ui| {
            ui.add_space(start_offset);
            for (i, (title, description, icon, route)) in row.into_iter().enumerate() {
                if i > 0 {
                    ui.add_space(spacing);
                }
                if dashboard_card(ui, title, description, icon, card_size).clicked() {
                    action = Action::Open(route);
                }
            }
        });
        ui.add_space(spacing);
    }

    ui.vertical_centered(|ui| {
        if icon_button(ui, true, SIGN_OUT, "Se déconnecter").clicked() {
            action = Action::Logout;
        }
    });

    action
}
