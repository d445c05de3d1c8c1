//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, StrokeKind, Ui};

/// Clickable home-screen tile: icon badge on the left, title and caption on
/// the right.
pub fn dashboard_card(ui: &mut Ui, title: &str, description: &str, icon: &str, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    if !ui.is_rect_visible(rect) {
        return response;
    }

    let visuals = ui.style().interact(&response);
    let painter = ui.painter();
    let pad = (size.y * 0.12).clamp(8.0, 18.0);

    painter.rect_filled(rect, 10.0, visuals.bg_fill);
    painter.rect_stroke(rect, 10.0, visuals.bg_stroke, StrokeKind::Inside);

    let radius = (size.y * 0.22).min(size.x * 0.18);
    let badge = egui::pos2(rect.left() + pad + radius, rect.center().y);
    painter.circle_filled(badge, radius, colors::ACCENT.gamma_multiply(0.18));
    painter.text(
        badge,
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(radius * 1.1),
        colors::ACCENT,
    );

    let text_left = badge.x + radius + pad;
    painter.text(
        egui::pos2(text_left, rect.center().y - 2.0),
        egui::Align2::LEFT_BOTTOM,
        title,
        egui::FontId::proportional(16.0),
        visuals.text_color(),
    );
    painter.text(
        egui::pos2(text_left, rect.center().y + 2.0),
        egui::Align2::LEFT_TOP,
        description,
        egui::FontId::proportional(12.0),
        ui.visuals().weak_text_color(),
    );

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const ACCENT: Color32 = Color32::from_rgb(0, 123, 255);
}

/// Render a back button that returns true when clicked.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new(format!("{} Retour", egui_phosphor::regular::ARROW_LEFT)).size(14.0))
        .clicked()
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Button with a leading phosphor icon.
pub fn icon_button(ui: &mut Ui, enabled: bool, icon: &str, text: &str) -> Response {
    ui.add_enabled(enabled, egui::Button::new(RichText::new(format!("{icon} {text}"))))
}

/// Rounded frame used for list rows and cards.
pub fn card_frame(ui: &Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(12))
        .outer_margin(Margin::symmetric(0, 4))
        .corner_radius(CornerRadius::same(8))
}

/// Centered spinner with a caption.
pub fn loading(ui: &mut Ui, caption: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.spinner();
        ui.label(RichText::new(caption).weak());
    });
}

/// Centered message for a list with nothing to show.
///
/// `reason` is the failure that led here, if any.
pub fn empty_state(ui: &mut Ui, message: &str, reason: Option<&str>) {
    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.label(RichText::new(message).italics().weak());
        if let Some(reason) = reason {
            ui.add_space(6.0);
            ui.label(RichText::new(reason).small().color(colors::ERROR));
        }
    });
}
