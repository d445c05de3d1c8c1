//! Project upload screen.
//!
//! egui has no web engine, so pages open in the system browser. The screen
//! keeps the portal history and the reachability check.

use eframe::egui::{self, Color32, RichText, Ui};
use egui_phosphor::regular::{ARROW_SQUARE_OUT, ARROWS_CLOCKWISE, CHECK_CIRCLE, WIFI_SLASH};

use crate::views::{PortalStatus, UploadPortal};

use super::components::{back_button, card_frame, colors, icon_button, panel_header};

pub enum Action {
    None,
    GoBack,
    Reload,
    Navigate(String),
    OpenCurrent,
}

/// Show the upload panel.
///
/// `address` is the editable address bar content.
pub fn show(ui: &mut Ui, portal: &UploadPortal, address: &mut String) -> Action {
    let mut action = Action::None;

    if back_button(ui) {
        action = Action::GoBack;
    }

    panel_header(ui, "Déposer un projet");

    if let PortalStatus::Offline(reason) = &portal.status {
        show_offline(ui, reason, &mut action);
        return action;
    }

    card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.label("Page:");
            let response = ui.add(egui::TextEdit::singleline(address).desired_width(ui.available_width() - 90.0));
            if ui.button("Aller").clicked()
                || (response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)))
            {
                action = Action::Navigate(address.trim().to_string());
            }
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            match portal.status {
                PortalStatus::Checking => {
                    ui.spinner();
                    ui.label("Vérification de la connexion...");
                }
                PortalStatus::Online => {
                    ui.colored_label(colors::SUCCESS, format!("{CHECK_CIRCLE} Portail accessible"));
                }
                PortalStatus::Idle | PortalStatus::Offline(_) => {}
            }
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            let online = matches!(portal.status, PortalStatus::Online);
            if icon_button(ui, online, ARROW_SQUARE_OUT, "Ouvrir dans le navigateur").clicked() {
                action = Action::OpenCurrent;
            }
            if icon_button(ui, true, ARROWS_CLOCKWISE, "Recharger").clicked() {
                action = Action::Reload;
            }
        });

        if portal.can_go_back() {
            ui.add_space(6.0);
            ui.label(
                RichText::new("Retour revient à la page précédente du portail.")
                    .small()
                    .weak(),
            );
        }
    });

    action
}

fn show_offline(ui: &mut Ui, reason: &str, action: &mut Action) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new(WIFI_SLASH).size(48.0).color(colors::ERROR));
        ui.label(RichText::new("Connexion impossible au portail").size(18.0).strong());
        ui.add_space(6.0);
        ui.label(RichText::new(reason).small().color(Color32::GRAY));
        ui.add_space(16.0);
        if icon_button(ui, true, ARROWS_CLOCKWISE, "Recharger").clicked() {
            *action = Action::Reload;
        }
    });
}
