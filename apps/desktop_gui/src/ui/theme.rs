//! Colors and visuals for the light contact-book look.

use client_core::sections::AvatarColor;
use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x00, 0x7A, 0xFF);
pub const DESTRUCTIVE: egui::Color32 = egui::Color32::from_rgb(0xFF, 0x3B, 0x30);
pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0xF2, 0xF2, 0xF7);
pub const ROW_FILL: egui::Color32 = egui::Color32::WHITE;
pub const SECTION_TITLE: egui::Color32 = egui::Color32::from_rgb(0x6D, 0x6D, 0x72);
pub const SECONDARY_TEXT: egui::Color32 = egui::Color32::from_rgb(0x8E, 0x8E, 0x93);
pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(0xFD, 0xEC, 0xEA);
pub const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(0xF2, 0xA5, 0x9F);

pub const AVATAR_RADIUS: f32 = 20.0;
pub const ROW_HEIGHT: f32 = 56.0;

pub fn avatar_fill(color: AvatarColor) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = ROW_FILL;
    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT;
    visuals.window_corner_radius = egui::CornerRadius::same(12);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
    });
}
