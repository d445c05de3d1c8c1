//! Grades screen: one row per module, one row expanded at a time.

use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::models::grade::mark_text;
use crate::views::{GradesView, LoadState};

use super::components::{back_button, colors, empty_state, loading, panel_header};

/// Show the grades panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(ui: &mut Ui, view: &mut GradesView) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Notes");

    match &view.state {
        LoadState::Idle | LoadState::Loading => {
            loading(ui, "Chargement des notes...");
            return go_back;
        }
        LoadState::Failed(reason) if view.rows.is_empty() => {
            empty_state(ui, "Aucune note disponible.", Some(reason.as_str()));
            return go_back;
        }
        _ if view.rows.is_empty() => {
            empty_state(ui, "Aucune note disponible.", None);
            return go_back;
        }
        _ => {}
    }

    let mut clicked = None;

    ScrollArea::vertical().id_salt("grades_scroll").show(ui, |ui| {
        egui::Grid::new("grades_grid")
            .num_columns(3)
            .striped(true)
            .min_col_width(80.0)
            .spacing([30.0, 8.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Module").strong().color(colors::ACCENT));
                ui.label(RichText::new("MP").strong().color(colors::ACCENT));
                ui.label(RichText::new("MG").strong().color(colors::ACCENT));
                ui.end_row();

                for (index, row) in view.rows.iter().enumerate() {
                    let expanded = view.is_expanded(index);
                    if ui.selectable_label(expanded, &row.nom_module).clicked() {
                        clicked = Some(index);
                    }
                    ui.label(mark_text(&row.mp));
                    ui.label(mark_text(&row.mg));
                    ui.end_row();

                    if expanded {
                        ui.vertical(|ui| {
                            for (n, mark) in row.components() {
                                ui.label(format!("CC{n}: {mark}"));
                            }
                            ui.label(format!("Examen théorique: {}", mark_text(&row.exam_theo)));
                            ui.label(format!("Examen pratique: {}", mark_text(&row.exam_prati)));
                        });
                        ui.label("");
                        ui.label("");
                        ui.end_row();
                    }
                }
            });
    });

    if let Some(index) = clicked {
        view.toggle(index);
    }

    go_back
}
