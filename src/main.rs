//! Main application for the YouTube Downloader GUI

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// eframe/egui for GUI application framework
use eframe::{App, Frame, egui};
use egui::{Color32, Visuals};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use youtube_download_client::config::{CONFIG_FILE, ClientConfig, SaveMode};
use youtube_download_client::controller::DownloadController;
use youtube_download_client::downloader::HttpBackend;
use youtube_download_client::model::{MediaFormat, StatusKind};
use youtube_download_client::saver::{DialogSaver, DirectorySaver, FileSaver};

const URL_PLACEHOLDER: &str = "e.g., https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// Program entry point: loads settings, starts the runtime and launches the GUI
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = ClientConfig::load(Path::new(CONFIG_FILE))?;
    init_tracing(&loaded.settings.log_filter);
    match &loaded.source {
        Some(path) => tracing::debug!(path = %path.display(), "loaded settings"),
        None => tracing::debug!(path = CONFIG_FILE, "no config file, using defaults"),
    }
    if loaded.is_plaintext() {
        tracing::warn!(endpoint = %loaded.endpoint, "backend endpoint is not using TLS");
    }
    let config = loaded.settings;

    // Runtime lives for the whole session; network futures run on its workers
    let runtime = Runtime::new()?;
    let backend = HttpBackend::new(loaded.endpoint)?;
    tracing::info!(endpoint = %backend.endpoint(), save_mode = ?config.save_mode, "starting client");

    let saver: Box<dyn FileSaver> = match config.save_mode {
        SaveMode::Dialog => Box::new(DialogSaver::new(&config.download_dir)),
        SaveMode::Directory => Box::new(DirectorySaver::new(&config.download_dir)),
    };
    let controller = DownloadController::new(Arc::new(backend), runtime.handle().clone());
    let app = DownloaderApp::new(controller, saver);

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "YouTube Downloader",
        options,
        Box::new(move |cc| {
            // Use dark theme visuals
            cc.egui_ctx.set_visuals(Visuals::dark());
            Box::new(app)
        }),
    )?;
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Application state for the GUI
struct DownloaderApp {
    /// Input field for YouTube URL
    url_input: String,
    controller: DownloadController,
    saver: Box<dyn FileSaver>,
}

impl DownloaderApp {
    fn new(controller: DownloadController, saver: Box<dyn FileSaver>) -> Self {
        Self {
            url_input: String::new(),
            controller,
            saver,
        }
    }
}

fn status_color(kind: StatusKind) -> Color32 {
    match kind {
        StatusKind::Info => Color32::YELLOW,
        StatusKind::Error => Color32::RED,
        StatusKind::Success => Color32::GREEN,
    }
}

/// GUI update loop: called each frame to redraw and handle interactions
impl App for DownloaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // Apply any requests that finished since the last frame
        self.controller.poll(self.saver.as_ref());

        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("YouTube Video & Audio Downloader");

            ui.label("Paste YouTube video URL:");
            ui.add(egui::TextEdit::singleline(&mut self.url_input).hint_text(URL_PLACEHOLDER));

            ui.horizontal(|ui| {
                if ui.button("Download Video").clicked() {
                    clicked = Some(MediaFormat::Video);
                }
                if ui.button("Download Audio").clicked() {
                    clicked = Some(MediaFormat::Audio);
                }
            });

            // Status region is hidden until there is something to say
            if let Some(message) = self.controller.status().message() {
                ui.separator();
                ui.colored_label(status_color(message.kind), message.text.as_str());
            }
        });

        if let Some(format) = clicked {
            // Errors are already shown in the status region
            let _ = self.controller.submit(&self.url_input, format);
        }

        // Request periodic repaint so finished downloads surface promptly
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
