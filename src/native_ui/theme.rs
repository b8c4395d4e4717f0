//! Light and dark palettes plus sizing constants for the converter window

use eframe::egui::{self, Color32, Rounding, Stroke};

use crate::core::ThemeMode;

pub struct FontSize;

impl FontSize {
    pub const SM: f32 = 14.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 18.0;
}

pub struct Spacing;

impl Spacing {
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 10.0;
    pub const LG: f32 = 16.0;
}

pub struct Radius;

impl Radius {
    pub const MD: f32 = 10.0;
}

/// Every color the window uses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub input_bg: Color32,
    pub history_bg: Color32,
    pub border: Color32,
    pub button: Color32,
    pub button_text: Color32,
    pub error: Color32,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color32::from_rgb(0xf4, 0xf4, 0xf4),
        text: Color32::from_rgb(0x33, 0x33, 0x33),
        text_muted: Color32::from_rgb(0x77, 0x77, 0x77),
        input_bg: Color32::WHITE,
        history_bg: Color32::from_rgb(0xf9, 0xf9, 0xf9),
        border: Color32::from_rgb(0xcc, 0xcc, 0xcc),
        button: Color32::from_rgb(0x4c, 0xaf, 0x50),
        button_text: Color32::WHITE,
        error: Color32::from_rgb(0xc6, 0x28, 0x28),
    };

    pub const DARK: Palette = Palette {
        background: Color32::from_rgb(0x33, 0x33, 0x33),
        text: Color32::from_rgb(0xf4, 0xf4, 0xf4),
        text_muted: Color32::from_rgb(0xaa, 0xaa, 0xaa),
        input_bg: Color32::from_rgb(0x55, 0x55, 0x55),
        history_bg: Color32::from_rgb(0x44, 0x44, 0x44),
        border: Color32::from_rgb(0x66, 0x66, 0x66),
        button: Color32::from_rgb(0x4a, 0x7a, 0xc2),
        button_text: Color32::WHITE,
        error: Color32::from_rgb(0xef, 0x53, 0x50),
    };

    pub fn for_mode(mode: ThemeMode) -> Palette {
        match mode {
            ThemeMode::Light => Palette::LIGHT,
            ThemeMode::Dark => Palette::DARK,
        }
    }
}

/// egui visuals for a theme, built from the stock light/dark visuals
pub fn visuals(mode: ThemeMode) -> egui::Visuals {
    let palette = Palette::for_mode(mode);
    let mut visuals = if mode.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    visuals.override_text_color = Some(palette.text);
    visuals.panel_fill = palette.background;
    visuals.window_fill = palette.background;
    visuals.extreme_bg_color = palette.input_bg;
    visuals.faint_bg_color = palette.history_bg;
    visuals.selection.bg_fill = palette.button.gamma_multiply(0.6);
    visuals.error_fg_color = palette.error;

    let rounding = Rounding::same(Radius::MD);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        widget.rounding = rounding;
    }
    visuals.widgets.inactive.weak_bg_fill = palette.input_bg;
    visuals.widgets.inactive.bg_fill = palette.input_bg;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, palette.border);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.border);

    visuals
}

/// Apply a theme to the whole window, overriding the system preference
pub fn apply(ctx: &egui::Context, mode: ThemeMode) {
    let theme = if mode.is_dark() {
        egui::Theme::Dark
    } else {
        egui::Theme::Light
    };
    ctx.set_theme(theme);
    ctx.set_visuals(visuals(mode));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Palette::for_mode(ThemeMode::Light), Palette::for_mode(ThemeMode::Dark));
        assert_eq!(Palette::LIGHT.button, Color32::from_rgb(76, 175, 80));
    }

    #[test]
    fn test_double_toggle_restores_style() {
        let mode = ThemeMode::Light;
        assert_eq!(visuals(mode.toggled().toggled()), visuals(mode));
        assert_ne!(visuals(mode.toggled()), visuals(mode));
    }

    #[test]
    fn test_visuals_follow_palette() {
        let dark = visuals(ThemeMode::Dark);
        assert!(dark.dark_mode);
        assert_eq!(dark.panel_fill, Palette::DARK.background);
        assert_eq!(dark.override_text_color, Some(Palette::DARK.text));
    }
}
