//! Chat panel — shaped message bubbles, empty-conversation prompt, and the
//! composer input.

use chrono::Local;
use egui::{self, Align, Align2, FontId, Layout, RichText, ScrollArea, Sense, Vec2};
use chat_core::conversation::SendTicket;
use chat_types::message::Role;
use crate::state::{MessageRow, UiState};
use crate::theme::*;

/// Render the chat panel. Returns a ticket when the user submits input;
/// the caller is expected to start the stream consumer with it.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<SendTicket> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new(state.assistant_label())
                            .color(TEXT_PRIMARY)
                            .strong(),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });

                ui.separator();

                let available_height = ui.available_height() - 60.0;
                match state.placeholder_prompt() {
                    Some(prompt) => {
                        ui.allocate_ui(Vec2::new(ui.available_width(), available_height), |ui| {
                            render_prompt(ui, &prompt);
                        });
                    }
                    None => {
                        let initial = state.persona.as_ref().map(|p| p.initial()).unwrap_or('?');
                        ScrollArea::vertical()
                            .max_height(available_height)
                            .auto_shrink([false, false])
                            .stick_to_bottom(true)
                            .show(ui, |ui| {
                                for row in state.rows() {
                                    render_row(ui, &row, initial);
                                    ui.add_space(6.0);
                                }
                            });
                    }
                }

                ui.add_space(8.0);

                // Composer
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type a message")
                        .desired_width(ui.available_width() - 70.0)
                        .font(FontId::proportional(16.0));

                    let response = ui.add(input);

                    let send_enabled = state.can_send();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if enter || send_btn.clicked() {
                        submitted = state.submit();
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn render_prompt(ui: &mut egui::Ui, prompt: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.label(RichText::new("Prompt").color(TEXT_PRIMARY).size(20.0));
        ui.add_space(6.0);
        let mut text = prompt.to_string();
        ui.add(
            egui::TextEdit::multiline(&mut text)
                .interactive(false)
                .desired_rows(6)
                .desired_width(ui.available_width().min(512.0)),
        );
    });
}

fn render_row(ui: &mut egui::Ui, row: &MessageRow, persona_initial: char) {
    let is_user = row.role == Role::User;
    let layout = if is_user {
        Layout::right_to_left(Align::Max)
    } else {
        Layout::left_to_right(Align::Max)
    };

    let response = ui
        .with_layout(layout, |ui| {
            if !is_user {
                render_avatar(ui, persona_initial);
            }
            let column = if is_user {
                Layout::top_down(Align::Max)
            } else {
                Layout::top_down(Align::Min)
            };
            ui.with_layout(column, |ui| {
                ui.spacing_mut().item_spacing.y = 2.0;
                ui.label(RichText::new(&row.label).color(TEXT_SECONDARY).small());
                if row.typing {
                    ui.label(RichText::new("▌").color(ACCENT).strong());
                }
                for bubble in &row.bubbles {
                    let fill = if is_user { USER_BUBBLE } else { ASSISTANT_BUBBLE };
                    egui::Frame::default()
                        .fill(fill)
                        .corner_radius(bubble_radius(bubble.corners))
                        .inner_margin(BUBBLE_PADDING)
                        .show(ui, |ui| {
                            ui.label(RichText::new(&bubble.text).color(TEXT_PRIMARY).size(16.0));
                        });
                }
            });
        })
        .response;

    let local = row.created_at.with_timezone(&Local);
    response.on_hover_text(local.format("%b %e, %H:%M").to_string());
}

fn render_avatar(ui: &mut egui::Ui, initial: char) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(AVATAR_SIZE), Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, BG_SURFACE);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        initial,
        FontId::proportional(14.0),
        TEXT_PRIMARY,
    );
}
