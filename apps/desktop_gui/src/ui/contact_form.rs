//! Add/edit contact window.

use client_core::form::{ContactForm, FieldEntry, ValidationError};
use eframe::egui;

use crate::controller::reducer::ScreenEvent;
use crate::ui::theme;

/// Draws the form window. Field edits go straight into `form`; the returned
/// event is Cancel or Done.
pub fn show(ctx: &egui::Context, form: &mut ContactForm, busy: bool) -> Option<ScreenEvent> {
    let title = if form.is_editing() {
        "Edit Contact"
    } else {
        "New Contact"
    };

    let mut action = None;
    egui::Window::new(title)
        .id(egui::Id::new("contact_form_window"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    action = Some(ScreenEvent::CloseForm);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let done = egui::Button::new(egui::RichText::new("Done").strong());
                    if ui.add_enabled(form.can_submit() && !busy, done).clicked() {
                        action = Some(ScreenEvent::SubmitForm);
                    }
                });
            });
            ui.separator();

            ui.add(egui::TextEdit::singleline(&mut form.first_name).hint_text("First name"));
            inline_error(ui, form.error(), ValidationError::NameRequired);
            ui.add(egui::TextEdit::singleline(&mut form.last_name).hint_text("Last name"));

            ui.add_space(8.0);
            phone_fields(ui, form);
            inline_error(ui, form.error(), ValidationError::PhoneRequired);

            ui.add_space(8.0);
            email_fields(ui, form);

            if busy {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Saving...");
                });
            }
        });
    action
}

fn phone_fields(ui: &mut egui::Ui, form: &mut ContactForm) {
    for entry in form.phone_fields().to_vec() {
        match field_row(ui, &entry, "Phone") {
            FieldChange::Edited(value) => {
                form.update_phone_field(entry.id, value);
            }
            FieldChange::Removed => form.remove_phone_field(entry.id),
            FieldChange::None => {}
        }
    }
    if form.phone_fields().is_empty() && ui.button("+ add phone").clicked() {
        form.add_phone_field();
    }
}

fn email_fields(ui: &mut egui::Ui, form: &mut ContactForm) {
    for entry in form.email_fields().to_vec() {
        match field_row(ui, &entry, "Email") {
            FieldChange::Edited(value) => {
                form.update_email_field(entry.id, value);
            }
            FieldChange::Removed => form.remove_email_field(entry.id),
            FieldChange::None => {}
        }
    }
    if form.email_fields().is_empty() && ui.button("+ add email").clicked() {
        form.add_email_field();
    }
}

enum FieldChange {
    None,
    Edited(String),
    Removed,
}

fn field_row(ui: &mut egui::Ui, entry: &FieldEntry, hint: &str) -> FieldChange {
    let mut value = entry.value.clone();
    let mut change = FieldChange::None;
    ui.push_id(entry.id, |ui| {
        ui.horizontal(|ui| {
            let remove = egui::Button::new(egui::RichText::new("−").color(theme::DESTRUCTIVE));
            if ui.add(remove).clicked() {
                change = FieldChange::Removed;
            }
            if ui
                .add(egui::TextEdit::singleline(&mut value).hint_text(hint))
                .changed()
            {
                change = FieldChange::Edited(value.clone());
            }
        });
    });
    change
}

fn inline_error(ui: &mut egui::Ui, current: Option<ValidationError>, shown_for: ValidationError) {
    if current == Some(shown_for) {
        ui.label(
            egui::RichText::new(shown_for.to_string())
                .small()
                .color(theme::DESTRUCTIVE),
        );
    }
}
