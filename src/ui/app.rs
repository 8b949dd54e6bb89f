use crate::analyzer::selection::{detail_at, PointDetail};
use crate::analyzer::Snapshot;
use crate::model::{HistoryRequest, Period};
use crate::session::{FetchOutcome, FetchResult, Session};
use crate::ui::format;
use crate::utils::{from_plot_x, normalize_symbol, start_of_day, to_plot_x};

use eframe::egui;
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, PlotUi, Points};
use tracing::info;

const ACCENT_BLUE: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const ACCENT_RED: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(148, 163, 184);

pub struct ForecastApp {
    session: Session,
    symbols: Vec<String>,
    symbol_input: String,
    period: Period,
    error: Option<String>,
    snapshot: Option<Snapshot>,
    selected: Option<PointDetail>,
}

impl ForecastApp {
    pub fn new(cc: &eframe::CreationContext<'_>, session: Session, symbols: Vec<String>, period: Period) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self {
            session,
            symbols,
            symbol_input: String::new(),
            period,
            error: None,
            snapshot: None,
            selected: None,
        }
    }

    fn request_forecast(&mut self, ctx: &egui::Context) {
        let symbol = normalize_symbol(&self.symbol_input);
        if symbol.is_empty() {
            self.error = Some(format::EMPTY_SYMBOL.to_string());
            return;
        }
        self.symbol_input = symbol.clone();

        let ctx = ctx.clone();
        self.session.submit(
            HistoryRequest {
                symbol,
                period: self.period,
            },
            move || ctx.request_repaint(),
        );
    }

    fn apply(&mut self, result: FetchResult) {
        match result.outcome {
            FetchOutcome::Ready(snapshot) => {
                info!(
                    "Showing {} bars for {}, trend slope {:.4}",
                    snapshot.history.len(),
                    result.request.symbol,
                    snapshot.forecast.fit.slope
                );
                self.error = None;
                self.selected = None;
                self.snapshot = Some(*snapshot);
            }
            other => self.error = other.error_message(),
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label("Enter Stock Symbol:");

            let edit = ui.add(egui::TextEdit::singleline(&mut self.symbol_input).desired_width(140.0));
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            egui::ComboBox::from_id_salt("symbol_suggestions")
                .selected_text("▼")
                .width(60.0)
                .show_ui(ui, |ui| {
                    for symbol in &self.symbols {
                        ui.selectable_value(&mut self.symbol_input, symbol.clone(), symbol.as_str());
                    }
                });

            let clicked = ui
                .add(egui::Button::new("Get Forecast").fill(ACCENT_BLUE))
                .clicked();
            if clicked || submitted {
                self.request_forecast(ctx);
            }

            if self.session.is_loading() {
                ui.spinner();
            }
        });

        if let Some(err) = &self.error {
            ui.label(egui::RichText::new(err).color(ACCENT_RED));
        }

        ui.horizontal(|ui| {
            for period in Period::ALL {
                if ui.radio_value(&mut self.period, period, period.label()).clicked() {
                    info!("Period changed to {}", period);
                    self.request_forecast(ctx);
                }
            }
        });
    }

    fn render_summary(&self, ui: &mut egui::Ui) {
        let stats = self.snapshot.as_ref().map(|s| &s.stats);
        ui.label(stats.map(format::minimum).unwrap_or_else(|| format::MIN_PLACEHOLDER.into()));
        ui.label(stats.map(format::maximum).unwrap_or_else(|| format::MAX_PLACEHOLDER.into()));

        let details = match (&self.selected, stats) {
            (Some(point), _) => format::point(point),
            (None, Some(stats)) => format::details(stats),
            (None, None) => format::DETAILS_PLACEHOLDER.into(),
        };
        ui.add_space(4.0);
        ui.label(details);
    }

    fn render_chart(&mut self, ui: &mut egui::Ui) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };

        ui.vertical_centered(|ui| {
            ui.heading(format::chart_title(&snapshot.history.symbol));
        });

        let plot = Plot::new("forecast_chart")
            .legend(Legend::default())
            .x_axis_label("Date")
            .y_axis_label("Price (USD)")
            .x_axis_formatter(|mark, _range| {
                from_plot_x(mark.value).map(format::day).unwrap_or_default()
            })
            .label_formatter(|name, value| {
                let date = from_plot_x(value.x).map(format::day).unwrap_or_default();
                if name.is_empty() {
                    format!("{}\n{:.2} USD", date, value.y)
                } else {
                    format!("{}\n{}\n{:.2} USD", name, date, value.y)
                }
            });

        let response = plot.show(ui, |plot_ui| {
            draw_series(plot_ui, snapshot);
            plot_ui.pointer_coordinate()
        });

        if response.response.clicked() {
            if let Some(coord) = response.inner {
                self.selected = detail_at(&snapshot.history, coord.x);
            }
        }
    }
}

fn draw_series(plot_ui: &mut PlotUi, snapshot: &Snapshot) {
    let actual: Vec<[f64; 2]> = snapshot
        .history
        .bars
        .iter()
        .map(|b| [to_plot_x(start_of_day(b.date)), b.close])
        .collect();
    let projected: Vec<[f64; 2]> = snapshot
        .forecast
        .points
        .iter()
        .map(|p| [to_plot_x(p.date), p.price])
        .collect();

    plot_ui.line(
        Line::new(PlotPoints::new(actual.clone()))
            .name("Actual Price")
            .color(ACCENT_BLUE)
            .width(1.8),
    );
    plot_ui.points(
        Points::new(PlotPoints::new(actual))
            .name("Actual Price")
            .color(ACCENT_BLUE)
            .shape(MarkerShape::Circle)
            .radius(2.5),
    );

    plot_ui.line(
        Line::new(PlotPoints::new(projected.clone()))
            .name("Forecasted Price")
            .color(ACCENT_RED)
            .style(LineStyle::Dashed { length: 8.0 })
            .width(1.5),
    );
    plot_ui.points(
        Points::new(PlotPoints::new(projected))
            .name("Forecasted Price")
            .color(ACCENT_RED)
            .shape(MarkerShape::Cross)
            .radius(4.0),
    );
}

impl eframe::App for ForecastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(result) = self.session.poll() {
            self.apply(result);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_controls(ui, ctx);
            ui.add_space(4.0);
            self.render_summary(ui);
            ui.add_space(6.0);
        });

        // The central panel takes whatever the window leaves, so the chart follows resizes.
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.snapshot.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("Pick a symbol and press Get Forecast").color(TEXT_SECONDARY));
                });
                return;
            }
            self.render_chart(ui);
        });
    }
}
