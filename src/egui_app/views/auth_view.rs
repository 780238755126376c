use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

fn field(ui: &mut egui::Ui, offset: f32, label: &str, value: &mut String, password: bool) {
    let input_width = 280.0;
    let label_width = 80.0;
    ui.horizontal(|ui| {
        ui.add_space(offset);
        ui.add_sized(
            [label_width, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized(
            [input_width, 28.0],
            egui::TextEdit::singleline(value)
                .password(password)
                .text_color(colors::TEXT_DARK),
        );
    });
    ui.add_space(8.0);
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let available_rect = ui.available_rect_before_wrap();

    ui.scope_builder(egui::UiBuilder::new().max_rect(available_rect), |ui| {
        ui.vertical_centered(|ui| {
            let total_height = if state.is_signup_mode { 380.0 } else { 280.0 };
            let top_space = (available_rect.height() - total_height).max(0.0) / 2.0;
            ui.add_space(top_space);

            ui.label(
                egui::RichText::new(if state.is_signup_mode { "Create Account" } else { "Welcome Back" })
                    .size(24.0)
                    .color(colors::TEXT_LIGHT),
            );
            ui.add_space(20.0);

            if let Some(ref error) = state.auth_state.error {
                ui.label(egui::RichText::new(error).color(colors::ERROR));
                ui.add_space(10.0);
            } else if let Some(ref success) = state.auth_state.success {
                ui.label(egui::RichText::new(success).color(colors::SUCCESS));
                ui.add_space(10.0);
            }

            let offset = ((available_rect.width() - 380.0) / 2.0).max(0.0);

            field(ui, offset, "Username:", &mut state.username_input, false);
            if state.is_signup_mode {
                field(ui, offset, "Email:", &mut state.email_input, false);
                field(ui, offset, "Phone:", &mut state.phone_input, false);
            }
            field(ui, offset, "Password:", &mut state.password_input, true);

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                let button_width = 120.0;
                let total_buttons_width = button_width * 2.0 + 10.0;
                ui.add_space(((available_rect.width() - total_buttons_width) / 2.0).max(0.0));

                let submit = egui::Button::new(
                    egui::RichText::new(if state.is_signup_mode { "Sign Up" } else { "Login" })
                        .color(colors::TEXT_LIGHT),
                )
                .fill(colors::ACCENT);
                if ui
                    .add_enabled_ui(!state.auth_state.loading, |ui| {
                        ui.add_sized([button_width, 32.0], submit)
                    })
                    .inner
                    .clicked()
                {
                    state.auth_state.clear_error();
                    if state.is_signup_mode {
                        state.handle_signup();
                    } else {
                        state.handle_login();
                    }
                }

                ui.add_space(10.0);

                if ui
                    .add_sized(
                        [button_width, 32.0],
                        egui::Button::new(
                            egui::RichText::new(if state.is_signup_mode {
                                "Back to Login"
                            } else {
                                "Create Account"
                            })
                            .color(colors::TEXT_SECONDARY),
                        ),
                    )
                    .clicked()
                {
                    state.toggle_auth_mode();
                }
            });

            if state.auth_state.loading {
                ui.add_space(15.0);
                ui.horizontal(|ui| {
                    ui.add_space(((available_rect.width() - 100.0) / 2.0).max(0.0));
                    ui.label(egui::RichText::new("Loading...").color(colors::TEXT_LIGHT));
                    ui.spinner();
                });
            }
        });
    });
}
