use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::{BackendCommand, RequestKind};
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{reduce, AlertKind, ScreenEvent, ScreenState};
use crate::ui::{contact_form, contact_list, theme};

pub struct ContactBookApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: ScreenState,
    server_url: String,
}

impl ContactBookApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
    ) -> Self {
        theme::apply(&cc.egui_ctx);
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: ScreenState::default(),
            server_url,
        };
        app.apply(ScreenEvent::Activate);
        app
    }

    /// Runs one event through the reducer and queues whatever it asks for.
    /// Commands that cannot be queued are fed back as rejections.
    fn apply(&mut self, event: ScreenEvent) {
        let mut pending = vec![event];
        while let Some(event) = pending.pop() {
            for cmd in reduce(&mut self.state, event) {
                let kind = cmd.kind();
                if let Err(error) = dispatch_backend_command(&self.cmd_tx, cmd) {
                    pending.push(ScreenEvent::CommandRejected { kind, error });
                }
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply(ScreenEvent::Backend(event));
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let mut open_form = false;
        egui::TopBottomPanel::top("contacts_header")
            .frame(
                egui::Frame::NONE
                    .fill(theme::ROW_FILL)
                    .inner_margin(egui::Margin::symmetric(14, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Contacts");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let add = egui::Button::new(
                            egui::RichText::new("+").size(20.0).color(theme::ACCENT),
                        )
                        .frame(false);
                        if ui
                            .add(add)
                            .on_hover_text("Add contact")
                            .clicked()
                        {
                            open_form = true;
                        }
                    });
                });
            });
        if open_form {
            self.apply(ScreenEvent::OpenNewForm);
        }
    }

    fn show_body(&mut self, ctx: &egui::Context) {
        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| match body_view(&self.state) {
            BodyView::ErrorBanner(message) => {
                if show_error_banner(ui, &message, &self.server_url) {
                    action = Some(ScreenEvent::Retry);
                }
            }
            BodyView::Spinner => {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    ui.add(egui::Spinner::new().size(28.0));
                });
            }
            BodyView::List => {
                let delete_enabled = !self.state.in_flight.is_pending(RequestKind::Delete);
                if let Some(picked) = contact_list::show(ui, &self.state.contacts, delete_enabled)
                {
                    action = Some(picked);
                }
            }
        });
        if let Some(event) = action {
            self.apply(event);
        }
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        if !self.state.form_visible {
            return;
        }
        let busy = self.state.in_flight.is_pending(RequestKind::Update);
        if let Some(event) = contact_form::show(ctx, &mut self.state.form, busy) {
            self.apply(event);
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(id) = self.state.pending_delete.clone() else {
            return;
        };
        let name = self
            .state
            .contacts
            .iter()
            .find(|contact| contact.id == id)
            .map(|contact| contact.name.clone())
            .unwrap_or_else(|| "this contact".to_string());

        let mut action = None;
        egui::Window::new("Delete Contact")
            .id(egui::Id::new("delete_confirmation_window"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!("Are you sure you want to delete {name}?"));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        action = Some(ScreenEvent::CancelDelete);
                    }
                    let delete = egui::Button::new(
                        egui::RichText::new("Delete").color(theme::DESTRUCTIVE),
                    );
                    if ui.add(delete).clicked() {
                        action = Some(ScreenEvent::ConfirmDelete);
                    }
                });
            });
        if let Some(event) = action {
            self.apply(event);
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.state.alert.clone() else {
            return;
        };
        let title_color = match alert.kind {
            AlertKind::Success => theme::ACCENT,
            AlertKind::Error => theme::DESTRUCTIVE,
        };

        let mut dismissed = false;
        egui::Window::new(alert.title.as_str())
            .id(egui::Id::new("alert_window"))
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 64.0))
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(&alert.title).strong().color(title_color));
                ui.label(&alert.message);
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.apply(ScreenEvent::DismissAlert);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BodyView {
    ErrorBanner(String),
    Spinner,
    List,
}

/// A failed load replaces the list entirely with the banner.
fn body_view(state: &ScreenState) -> BodyView {
    if let Some(message) = &state.error {
        return BodyView::ErrorBanner(message.clone());
    }
    if state.loading && state.contacts.is_empty() {
        return BodyView::Spinner;
    }
    BodyView::List
}

/// Returns true when "Try again" was pressed.
fn show_error_banner(ui: &mut egui::Ui, message: &str, server_url: &str) -> bool {
    let mut retry = false;
    egui::Frame::NONE
        .fill(theme::ERROR_FILL)
        .stroke(egui::Stroke::new(1.0, theme::ERROR_STROKE))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(message).color(theme::DESTRUCTIVE));
                    ui.label(
                        egui::RichText::new(format!("Server: {server_url}"))
                            .small()
                            .color(theme::SECONDARY_TEXT),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Try again").clicked() {
                        retry = true;
                    }
                });
            });
        });
    retry
}

impl eframe::App for ContactBookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_body(ctx);
        self.show_form(ctx);
        self.show_delete_confirmation(ctx);
        self.show_alert(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::Contact;

    use super::*;

    #[test]
    fn load_error_hides_the_list_and_placeholder() {
        let state = ScreenState {
            error: Some("Could not load contacts; the server rejected the request.".to_string()),
            ..ScreenState::default()
        };

        assert_eq!(
            body_view(&state),
            BodyView::ErrorBanner("Could not load contacts; the server rejected the request.".to_string())
        );

        let state = ScreenState {
            contacts: vec![Contact::new("1", "Jane Doe", "123")],
            ..state
        };
        assert!(matches!(body_view(&state), BodyView::ErrorBanner(_)));
    }

    #[test]
    fn first_load_spins_then_lists() {
        let loading = ScreenState {
            loading: true,
            ..ScreenState::default()
        };
        assert_eq!(body_view(&loading), BodyView::Spinner);

        assert_eq!(body_view(&ScreenState::default()), BodyView::List);
    }
}
