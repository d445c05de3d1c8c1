//! Login screen: school id and date of birth.

use chrono::NaiveDate;
use eframe::egui::{self, Key, RichText, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::{GRADUATION_CAP, SIGN_IN};

use crate::auth::LoginForm;

use super::components::{card_frame, colors, icon_button};

/// Show the login panel.
///
/// Returns `true` when the form is submitted.
pub fn show(ui: &mut Ui, form: &mut LoginForm, picker: &mut NaiveDate, busy: bool) -> bool {
    let mut submit = false;

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);

        card_frame(ui).show(ui, |ui| {
            ui.set_max_width(380.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(GRADUATION_CAP).size(48.0).color(colors::ACCENT));
                ui.label(RichText::new("Connexion Étudiant").size(22.0).strong().color(colors::ACCENT));
            });
            ui.add_space(20.0);

            egui::Grid::new("login_grid")
                .num_columns(2)
                .spacing([20.0, 12.0])
                .show(ui, |ui| {
                    ui.label("ID scolaire:");
                    let id_response = ui.add(
                        egui::TextEdit::singleline(&mut form.school_id)
                            .desired_width(200.0)
                            .hint_text("ID Scolaire"),
                    );
                    if id_response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                        submit = true;
                    }
                    ui.end_row();

                    ui.label("Date de naissance:");
                    ui.horizontal(|ui| {
                        if ui.add(DatePickerButton::new(picker).id_salt("dob_picker")).changed() {
                            form.dob = Some(*picker);
                        }
                        match form.dob {
                            Some(dob) => ui.label(dob.format("%Y-%m-%d").to_string()),
                            None => ui.label(RichText::new("YYYY-MM-DD").weak()),
                        };
                    });
                    ui.end_row();
                });

            ui.add_space(20.0);

            ui.vertical_centered(|ui| {
                if icon_button(ui, !busy, SIGN_IN, "Se connecter").clicked() {
                    submit = true;
                }
                if busy {
                    ui.add_space(8.0);
                    ui.spinner();
                }
            });
        });
    });

    submit && !busy
}
