/**
 * Feedback Board - Main Entry Point
 *
 * Native desktop client for the feedback board. Network calls run on a tokio
 * runtime owned by this binary; egui only ever touches `AppState`.
 */
use eframe::egui;
use feedback_board::egui_app::{theme, views, AppState, Config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    tracing::info!(server = %config.server_url(), "Starting feedback board");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("feedback-board-io")
        .build()?;
    let _guard = runtime.enter();
    let state = AppState::new(config, runtime.handle().clone())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([720.0, 540.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Feedback Board",
        options,
        Box::new(move |cc| {
            theme::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(FeedbackApp { state }))
        }),
    )?;
    Ok(())
}

struct FeedbackApp {
    state: AppState,
}

impl eframe::App for FeedbackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
