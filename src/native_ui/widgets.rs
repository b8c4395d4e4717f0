//! Small reusable UI pieces for the converter window

use eframe::egui::{self, Color32, RichText, Rounding, Stroke, Vec2};

use super::theme::{FontSize, Palette, Radius, Spacing};
use crate::core::StatusMessage;

/// Muted caption above a control
pub fn field_label(ui: &mut egui::Ui, text: &str, palette: &Palette) {
    ui.label(RichText::new(text).size(FontSize::SM).color(palette.text_muted));
    ui.add_space(Spacing::XS);
}

/// Rounded bordered container
pub fn card(ui: &mut egui::Ui, fill: Color32, palette: &Palette, content: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(fill)
        .stroke(Stroke::new(1.0, palette.border))
        .rounding(Rounding::same(Radius::MD))
        .inner_margin(Spacing::MD)
        .show(ui, content);
}

/// Full-width accent button
pub fn primary_button(ui: &mut egui::Ui, text: &str, enabled: bool, palette: &Palette) -> bool {
    let button = egui::Button::new(
        RichText::new(text)
            .size(FontSize::MD)
            .color(palette.button_text),
    )
    .fill(palette.button)
    .stroke(Stroke::NONE)
    .rounding(Rounding::same(Radius::MD))
    .min_size(Vec2::new(ui.available_width(), 40.0));

    ui.add_enabled(enabled, button).clicked()
}

/// Banner color and icon: errors in red, everything else neutral
fn status_style(status: &StatusMessage, palette: &Palette) -> (Color32, &'static str) {
    if status.is_error {
        (palette.error, "✕")
    } else {
        (palette.text_muted, "…")
    }
}

/// Status banner
pub fn status_message(ui: &mut egui::Ui, status: &StatusMessage, palette: &Palette) {
    let (color, icon) = status_style(status, palette);

    egui::Frame::none()
        .fill(color.gamma_multiply(0.12))
        .rounding(Rounding::same(Radius::MD))
        .inner_margin(Spacing::SM)
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(icon).size(FontSize::SM).color(color));
                ui.add_space(Spacing::XS);
                ui.label(RichText::new(&status.text).size(FontSize::SM).color(color));
            });
        });
}

/// Dropdown listing every currency code
pub fn currency_picker(ui: &mut egui::Ui, id: &str, selected: &mut String, codes: &[String], enabled: bool) {
    ui.add_enabled_ui(enabled, |ui| {
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected.as_str())
            .width(ui.available_width())
            .height(300.0)
            .show_ui(ui, |ui| {
                for code in codes {
                    ui.selectable_value(selected, code.clone(), code.as_str());
                }
            });
    });
}
