use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;
use crate::shared::Role;

pub mod auth_view;
pub mod board_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new("📋 Feedback Board").size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);

                    match state.is_online {
                        Some(true) => {
                            ui.colored_label(colors::STATUS_ONLINE, "🟢 Online");
                        }
                        Some(false) => {
                            if ui
                                .add(egui::Label::new(
                                    egui::RichText::new("🔴 Offline").color(colors::STATUS_OFFLINE),
                                ).sense(egui::Sense::click()))
                                .on_hover_text("Click to retry")
                                .clicked()
                            {
                                state.check_connection();
                            }
                        }
                        None => {
                            ui.colored_label(colors::STATUS_CHECKING, "Connecting...");
                        }
                    }

                    ui.add_space(16.0);

                    if state.current_view == AppView::Board {
                        if ui.button("Logout").clicked() {
                            state.logout();
                        }
                        if let Some(user) = state.current_user() {
                            let badge = match user.role {
                                Role::Admin => colors::ADMIN_BADGE,
                                Role::User => colors::USER_BADGE,
                            };
                            styles::badge_frame(badge).show(ui, |ui| {
                                ui.colored_label(colors::TEXT_LIGHT, user.role.to_string());
                            });
                            ui.colored_label(colors::TEXT_LIGHT, format!("@{}", user.username));
                        }
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::main_frame())
        .show(ctx, |ui| match state.current_view {
            AppView::Loading => render_loading(ui),
            AppView::Auth => auth_view::render(ui, state),
            AppView::Board => board_view::render(ui, state),
        });
}

fn render_loading(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 2.0 - 20.0);
        ui.spinner();
        ui.colored_label(colors::TEXT_SECONDARY, "Checking session...");
    });
}
