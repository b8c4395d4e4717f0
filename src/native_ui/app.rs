//! Converter window
//!
//! All state lives in a [`ConverterState`] owned by the egui thread. Rate
//! fetches run on the tokio runtime and report back over a channel, so the
//! window keeps repainting while a request is in flight.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui::{self, RichText, Vec2};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::theme::{self, FontSize, Palette, Spacing};
use super::widgets::{card, currency_picker, field_label, primary_button, status_message};
use crate::core::{ConvertError, ConvertStep, ConverterState, PendingConversion, RateSource, RateTable, StatusMessage, ThemeMode};
use crate::providers::{ExchangeRateProvider, BASE_CURRENCY};

const WINDOW_TITLE: &str = "Currency Converter";
const WINDOW_SIZE: [f32; 2] = [400.0, 500.0];
const WINDOW_POS: [f32; 2] = [100.0, 100.0];

/// Why a fetch was started
#[derive(Debug)]
enum FetchPurpose {
    Currencies,
    Conversion(PendingConversion),
}

/// A finished fetch, delivered back to the UI thread
#[derive(Debug)]
struct FetchOutcome {
    purpose: FetchPurpose,
    rates: Result<RateTable, ConvertError>,
}

pub struct ConverterApp {
    state: ConverterState,
    source: Arc<dyn RateSource>,
    runtime: Handle,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    in_flight: Option<JoinHandle<()>>,
    applied_theme: Option<ThemeMode>,
}

impl ConverterApp {
    pub fn new(ctx: &egui::Context, runtime: Handle, source: Arc<dyn RateSource>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut app = Self {
            state: ConverterState::new(),
            source,
            runtime,
            tx,
            rx,
            in_flight: None,
            applied_theme: None,
        };
        app.start_fetch(ctx, FetchPurpose::Currencies);
        app
    }

    fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    fn start_fetch(&mut self, ctx: &egui::Context, purpose: FetchPurpose) {
        if self.is_busy() {
            tracing::debug!("Fetch already in flight, ignoring {:?}", purpose);
            return;
        }

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.in_flight = Some(self.runtime.spawn(async move {
            let rates = source.fetch_rates().await;
            if tx.send(FetchOutcome { purpose, rates }).is_err() {
                tracing::debug!("Window closed before fetch completed");
            }
            ctx.request_repaint();
        }));
    }

    /// Apply every finished fetch
    fn drain_outcomes(&mut self) {
        // A task sends before it finishes, so a finished task with nothing
        // queued ended without reporting back.
        let finished = self.in_flight.as_ref().is_some_and(|task| task.is_finished());

        while let Ok(outcome) = self.rx.try_recv() {
            self.in_flight = None;
            match outcome.purpose {
                FetchPurpose::Currencies => match outcome.rates {
                    Ok(table) => self.state.load_currencies(&table),
                    Err(err) => self.state.currencies_failed(&err),
                },
                FetchPurpose::Conversion(pending) => {
                    let _ = self.state.finish_conversion(pending, outcome.rates);
                }
            }
        }

        if finished && self.in_flight.take().is_some() {
            tracing::error!("Rate fetch task ended without a result");
            self.state.status = Some(StatusMessage::error("Rate fetch was interrupted."));
        }
    }

    fn convert(&mut self, ctx: &egui::Context) {
        match self.state.begin_conversion() {
            Ok(ConvertStep::Fetch(pending)) => self.start_fetch(ctx, FetchPurpose::Conversion(pending)),
            Ok(ConvertStep::Done) | Err(_) => {}
        }
    }

    fn reload_currencies(&mut self, ctx: &egui::Context) {
        self.state.status = Some(StatusMessage::info("Loading currencies..."));
        self.start_fetch(ctx, FetchPurpose::Currencies);
    }

    fn sync_theme(&mut self, ctx: &egui::Context) {
        let mode = self.state.theme();
        if self.applied_theme != Some(mode) {
            theme::apply(ctx, mode);
            self.applied_theme = Some(mode);
        }
    }

    fn show_inputs(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        let loaded = self.state.has_currencies();

        field_label(ui, "Amount", palette);
        let amount = ui.add(
            egui::TextEdit::singleline(&mut self.state.amount_text)
                .hint_text("Enter amount")
                .font(egui::FontId::proportional(FontSize::MD))
                .margin(Vec2::splat(Spacing::MD))
                .desired_width(f32::INFINITY),
        );
        let submitted = amount.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(Spacing::SM);
        field_label(ui, "From", palette);
        currency_picker(ui, "from_currency", &mut self.state.from, &self.state.currencies, loaded);

        ui.add_space(Spacing::SM);
        field_label(ui, "To", palette);
        currency_picker(ui, "to_currency", &mut self.state.to, &self.state.currencies, loaded);

        ui.add_space(Spacing::LG);
        let label = if self.is_busy() { "Converting..." } else { "Convert" };
        let clicked = primary_button(ui, label, loaded && !self.is_busy(), palette);
        if clicked || (submitted && loaded && !self.is_busy()) {
            self.convert(ui.ctx());
        }
    }

    fn show_result(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        if let Some(result) = &self.state.result {
            ui.label(
                RichText::new(format!("Result: {}", result))
                    .size(FontSize::LG)
                    .strong()
                    .color(palette.text),
            );
        }

        if let Some(status) = &self.state.status {
            ui.add_space(Spacing::XS);
            status_message(ui, status, palette);
        }

        if !self.state.has_currencies() {
            ui.add_space(Spacing::XS);
            if self.is_busy() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading currencies...").color(palette.text_muted));
                });
            } else if primary_button(ui, "Reload currencies", true, palette) {
                self.reload_currencies(ui.ctx());
            }
        }
    }

    fn show_history(&self, ui: &mut egui::Ui, palette: &Palette) {
        field_label(ui, "History", palette);

        let text = self.state.history().render();
        let height = (ui.available_height() - 60.0).max(80.0);
        card(ui, palette.history_bg, palette, |ui| {
            egui::ScrollArea::vertical()
                .max_height(height)
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    let mut view = text.as_str();
                    ui.add(
                        egui::TextEdit::multiline(&mut view)
                            .font(egui::FontId::proportional(FontSize::SM))
                            .frame(false)
                            .desired_width(f32::INFINITY),
                    );
                });
        });
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_outcomes();
        self.sync_theme(ctx);

        let palette = Palette::for_mode(self.state.theme());

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(palette.background)
                    .inner_margin(Spacing::LG),
            )
            .show(ctx, |ui| {
                self.show_inputs(ui, &palette);
                ui.add_space(Spacing::MD);
                self.show_result(ui, &palette);
                ui.add_space(Spacing::MD);
                self.show_history(ui, &palette);

                ui.add_space(Spacing::SM);
                if primary_button(ui, "Toggle theme", true, &palette) {
                    self.state.toggle_theme();
                }

                if let Some(as_of) = self.state.rates_as_of {
                    ui.add_space(Spacing::XS);
                    ui.label(
                        RichText::new(format!("Rates against {} as of {}", BASE_CURRENCY, as_of))
                            .size(FontSize::SM)
                            .color(palette.text_muted),
                    );
                }
            });
    }
}

impl Drop for ConverterApp {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            tracing::debug!("Cancelling in-flight rate fetch");
            task.abort();
        }
    }
}

/// Open the converter window and block until it is closed
pub fn run(runtime: Handle) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size([320.0, 420.0])
            .with_position(WINDOW_POS),
        ..Default::default()
    };

    tracing::info!("Opening converter window");
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            let source: Arc<dyn RateSource> = Arc::new(ExchangeRateProvider::new());
            Ok(Box::new(ConverterApp::new(&cc.egui_ctx, runtime, source)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run converter window: {}", e))
}
