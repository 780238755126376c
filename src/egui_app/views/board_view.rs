//! Feedback board: submission form, the list, and the delete confirmation.

use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::{Feedback, FeedbackStatus};

/// Card interaction collected while the list is borrowed
enum CardAction {
    Upvote(String),
    ChangeStatus(String, FeedbackStatus),
    Delete(String),
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    render_messages(ui, state);
    render_form(ui, state);
    ui.add_space(16.0);

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("All Feedback ({})", state.board.feedbacks.len()))
                .size(18.0)
                .strong()
                .color(colors::TEXT_LIGHT),
        );
        if state.board.loading {
            ui.spinner();
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if state.can_promote() && ui.button("Promote to admin").clicked() {
                state.promote_to_admin();
            }
            if ui.button("🔄 Refresh").clicked() {
                state.refresh_feedback();
            }
        });
    });
    ui.add_space(8.0);

    if state.board.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.colored_label(
                colors::TEXT_SECONDARY,
                "No feedback yet. Be the first to share an idea!",
            );
        });
    } else {
        let can_change_status = state.can_change_status();
        let mut actions = Vec::new();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for feedback in &state.board.feedbacks {
                    let can_delete = state.can_delete(feedback);
                    if let Some(action) = render_card(ui, feedback, can_change_status, can_delete) {
                        actions.push(action);
                    }
                    ui.add_space(8.0);
                }
            });

        for action in actions {
            match action {
                CardAction::Upvote(id) => state.upvote(&id),
                CardAction::ChangeStatus(id, status) => state.change_status(&id, status),
                CardAction::Delete(id) => state.request_delete(&id),
            }
        }
    }

    render_delete_dialog(ui.ctx(), state);
}

fn render_messages(ui: &mut egui::Ui, state: &mut AppState) {
    let message = match (&state.board.error, &state.board.success) {
        (Some(error), _) => Some((error.clone(), colors::ERROR)),
        (None, Some(success)) => Some((success.clone(), colors::SUCCESS)),
        (None, None) => None,
    };
    if let Some((text, color)) = message {
        ui.horizontal(|ui| {
            ui.colored_label(color, text);
            if ui.small_button("✖").clicked() {
                state.board.dismiss_messages();
            }
        });
        ui.add_space(8.0);
    }
}

fn render_form(ui: &mut egui::Ui, state: &mut AppState) {
    styles::form_frame().show(ui, |ui| {
        ui.label(
            egui::RichText::new("Submit Feedback")
                .size(16.0)
                .strong()
                .color(colors::TEXT_LIGHT),
        );
        ui.add_space(8.0);
        ui.add(
            egui::TextEdit::singleline(&mut state.board.title_input)
                .hint_text("Title")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);
        ui.add(
            egui::TextEdit::multiline(&mut state.board.description_input)
                .hint_text("Describe your idea or issue")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("new_feedback_status")
                .selected_text(state.board.status_input.label())
                .show_ui(ui, |ui| {
                    for status in FeedbackStatus::ALL {
                        ui.selectable_value(&mut state.board.status_input, status, status.label());
                    }
                });

            let submit = egui::Button::new(
                egui::RichText::new("Submit").color(colors::TEXT_LIGHT),
            )
            .fill(colors::ACCENT);
            if ui.add_enabled(!state.board.loading, submit).clicked() {
                state.submit_feedback();
            }
        });
    });
}

fn render_card(
    ui: &mut egui::Ui,
    feedback: &Feedback,
    can_change_status: bool,
    can_delete: bool,
) -> Option<CardAction> {
    let mut action = None;
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(&feedback.title)
                    .size(16.0)
                    .strong()
                    .color(colors::TEXT_DARK),
            );
            styles::badge_frame(colors::status_color(feedback.status)).show(ui, |ui| {
                ui.colored_label(colors::TEXT_LIGHT, feedback.status.label());
            });
        });
        ui.add_space(4.0);
        ui.colored_label(colors::TEXT_DARK, &feedback.description);
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let mut meta = format!("by {}", feedback.author_name());
            if let Some(created_at) = feedback.created_at {
                meta.push_str(&format!(" · {}", created_at.format("%b %d, %Y")));
            }
            ui.colored_label(colors::TEXT_SECONDARY, meta);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if can_delete && ui.button("🗑 Delete").clicked() {
                    action = Some(CardAction::Delete(feedback.id.clone()));
                }

                if can_change_status {
                    let mut selected = feedback.status;
                    egui::ComboBox::from_id_salt(("status", &feedback.id))
                        .selected_text(selected.label())
                        .show_ui(ui, |ui| {
                            for status in FeedbackStatus::ALL {
                                ui.selectable_value(&mut selected, status, status.label());
                            }
                        });
                    if selected != feedback.status {
                        action = Some(CardAction::ChangeStatus(feedback.id.clone(), selected));
                    }
                }

                if ui.button(format!("👍 {}", feedback.upvotes)).clicked() {
                    action = Some(CardAction::Upvote(feedback.id.clone()));
                }
            });
        });
    });
    action
}

fn render_delete_dialog(ctx: &egui::Context, state: &mut AppState) {
    let Some(id) = state.board.pending_delete.clone() else {
        return;
    };
    let title = state
        .board
        .find(&id)
        .map(|f| f.title.clone())
        .unwrap_or_default();

    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new("Delete feedback?")
        .collapsible(false)
        .resizable(false)
        .frame(styles::modal_frame())
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(
                colors::TEXT_DARK,
                format!("\"{}\" will be removed permanently.", title),
            );
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                let delete = egui::Button::new(
                    egui::RichText::new("Delete").color(colors::TEXT_LIGHT),
                )
                .fill(colors::DANGER);
                if ui.add(delete).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        state.confirm_delete();
    } else if cancelled {
        state.cancel_delete();
    }
}
