//! Sectioned contact list with avatar rows.

use client_core::sections::{avatar_color, build_sections, initials, ContactSection};
use eframe::egui;
use shared::domain::Contact;

use crate::controller::reducer::ScreenEvent;
use crate::ui::theme;

/// Draws every section and returns the row action the user picked, if any.
pub fn show(ui: &mut egui::Ui, contacts: &[Contact], delete_enabled: bool) -> Option<ScreenEvent> {
    if contacts.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            ui.label(egui::RichText::new("No contacts yet").color(theme::SECONDARY_TEXT));
            ui.label(
                egui::RichText::new("Press + to add your first contact.")
                    .small()
                    .color(theme::SECONDARY_TEXT),
            );
        });
        return None;
    }

    let mut action = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for section in build_sections(contacts) {
                if let Some(picked) = show_section(ui, &section, delete_enabled) {
                    action = Some(picked);
                }
            }
        });
    action
}

fn show_section(
    ui: &mut egui::Ui,
    section: &ContactSection,
    delete_enabled: bool,
) -> Option<ScreenEvent> {
    ui.add_space(6.0);
    ui.label(
        egui::RichText::new(&section.title)
            .strong()
            .color(theme::SECTION_TITLE),
    );

    let mut action = None;
    egui::Frame::NONE
        .fill(theme::ROW_FILL)
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            for (index, contact) in section.contacts.iter().enumerate() {
                if index > 0 {
                    ui.separator();
                }
                if let Some(picked) = show_row(ui, contact, delete_enabled) {
                    action = Some(picked);
                }
            }
        });
    action
}

fn show_row(ui: &mut egui::Ui, contact: &Contact, delete_enabled: bool) -> Option<ScreenEvent> {
    let mut action = None;
    let row = ui
        .push_id(contact.id.as_str(), |ui| {
            ui.horizontal(|ui| {
                ui.set_min_height(theme::ROW_HEIGHT);
                paint_avatar(ui, &contact.name);

                ui.vertical(|ui| {
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(&contact.name).strong());
                    ui.label(egui::RichText::new(&contact.phone).color(theme::SECONDARY_TEXT));
                    if let Some(email) = contact.email.as_deref().filter(|email| !email.is_empty()) {
                        ui.label(egui::RichText::new(email).small().color(theme::SECONDARY_TEXT));
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let delete = egui::Button::new(
                        egui::RichText::new("Delete").color(theme::DESTRUCTIVE),
                    );
                    if ui.add_enabled(delete_enabled, delete).clicked() {
                        action = Some(ScreenEvent::RequestDelete(contact.id.clone()));
                    }
                });
            })
            .response
        })
        .inner;

    if action.is_none() && row.interact(egui::Sense::click()).clicked() {
        action = Some(ScreenEvent::OpenEditForm(contact.clone()));
    }
    action
}

fn paint_avatar(ui: &mut egui::Ui, name: &str) {
    let size = egui::vec2(theme::AVATAR_RADIUS * 2.0, theme::AVATAR_RADIUS * 2.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(
        rect.center(),
        theme::AVATAR_RADIUS,
        theme::avatar_fill(avatar_color(name)),
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initials(name),
        egui::FontId::proportional(15.0),
        egui::Color32::WHITE,
    );
}
