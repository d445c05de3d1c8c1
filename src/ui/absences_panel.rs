//! Absences screen: flat list, no interaction.

use eframe::egui::{RichText, ScrollArea, Ui};

use crate::views::{AbsencesView, LoadState};

use super::components::{back_button, card_frame, empty_state, loading, panel_header};

/// Show the absences panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(ui: &mut Ui, view: &AbsencesView) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Absences");

    match &view.state {
        LoadState::Idle | LoadState::Loading => loading(ui, "Chargement..."),
        LoadState::Failed(reason) => empty_state(ui, "Aucune absence.", Some(reason.as_str())),
        LoadState::Empty => empty_state(ui, "Aucune absence.", None),
        LoadState::Loaded => {
            ScrollArea::vertical().id_salt("absences_scroll").show(ui, |ui| {
                for item in &view.items {
                    card_frame(ui).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(&item.title).strong());
                        ui.label(&item.body);
                    });
                }
            });
        }
    }

    go_back
}
