use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::model::{
    DateRangeController, Intervention, InterventionKind, InterventionStatus, Portfolio, Property,
    Reservation, ReservationStatus, ViewportSync, ZoomLevel,
};
use crate::settings::Settings;
use crate::ui;

/// Main application state.
pub struct StaygridApp {
    pub portfolio: Portfolio,
    pub portfolio_path: Option<PathBuf>,

    pub controller: DateRangeController,
    pub sync: ViewportSync,
    pub zoom: ZoomLevel,

    // Filters exposed to the toolbar
    pub status_filter: Option<ReservationStatus>,
    pub kind_filter: Option<InterventionKind>,
    pub show_interventions: bool,
    pub property_page: usize,

    // Derived display state
    pub month_title: String,
    pub status_message: String,
    pub loading: bool,
    pub loading_more: bool,
}

impl StaygridApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = Settings::load();
        let today = chrono::Local::now().date_naive();

        let (portfolio, portfolio_path) = match settings
            .last_portfolio
            .as_deref()
            .filter(|p| p.exists())
        {
            Some(path) => match crate::io::load_portfolio(path) {
                Ok(p) => {
                    tracing::debug!(path = %path.display(), "restored last portfolio");
                    (p, Some(path.to_path_buf()))
                }
                Err(e) => {
                    tracing::warn!("could not restore last portfolio: {e:#}");
                    (Self::sample_portfolio(today), None)
                }
            },
            None => (Self::sample_portfolio(today), None),
        };

        Self {
            portfolio,
            portfolio_path,
            controller: DateRangeController::new(today),
            sync: ViewportSync::new(),
            zoom: settings.zoom,
            status_filter: settings.status_filter,
            kind_filter: settings.kind_filter,
            show_interventions: settings.show_interventions,
            property_page: 0,
            month_title: String::new(),
            status_message: "Ready".to_string(),
            loading: false,
            loading_more: false,
        }
    }

    /// Generate a sample portfolio for demonstration.
    fn sample_portfolio(today: NaiveDate) -> Portfolio {
        let day = |d: i64| today + chrono::Duration::days(d);
        let mut portfolio = Portfolio::new("Sample Portfolio");

        let properties: Vec<Property> = [
            ("Alfama Loft", "Rua dos Remédios 12", "Lisbon"),
            ("Baixa Studio", "Rua Augusta 145", "Lisbon"),
            ("Riverside Duplex", "Cais do Sodré 3", "Lisbon"),
            ("Douro View", "Rua das Flores 88", "Porto"),
            ("Ribeira Nest", "Cais da Ribeira 21", "Porto"),
            ("Garden Flat", "Rua de Cedofeita 210", "Porto"),
            ("Old Town Rooms", "Rua Direita 7", "Faro"),
            ("Marina Suite", "Av. da República 54", "Faro"),
            ("Cliff House", "Rua do Farol 2", "Lagos"),
            ("Surf Cabin", "Rua da Praia 19", "Ericeira"),
        ]
        .into_iter()
        .map(|(name, address, city)| Property::new(name, address, city))
        .collect();

        let mut reservations = Vec::new();
        let mut interventions = Vec::new();

        // Past stay, already checked out, with its turnaround cleaning.
        let mut past = Reservation::new(properties[0].id, "Helena Costa", day(-9), day(-4));
        past.source = "Booking".into();
        past.total_price = 540.0;
        let mut past_clean = Intervention::new(
            properties[0].id,
            InterventionKind::Cleaning,
            "Marta",
            day(-4),
        );
        past_clean.linked_reservation_id = Some(past.id);
        past_clean.status = InterventionStatus::Completed;
        past_clean.start_time = Some("11:00".into());
        reservations.push(past);
        interventions.push(past_clean);

        // Current stay with a cleaning and an inspection queued on checkout.
        let mut current = Reservation::new(properties[0].id, "James Whitfield", day(-2), day(3));
        current.guest_count = 4;
        current.source = "Airbnb".into();
        current.total_price = 820.0;
        let mut turn_clean = Intervention::new(
            properties[0].id,
            InterventionKind::Cleaning,
            "Marta",
            day(3),
        );
        turn_clean.linked_reservation_id = Some(current.id);
        turn_clean.estimated_duration_hours = 3.0;
        let mut boiler_check = Intervention::new(
            properties[0].id,
            InterventionKind::Maintenance,
            "Rui",
            day(3),
        );
        boiler_check.linked_reservation_id = Some(current.id);
        reservations.push(current);
        interventions.push(turn_clean);
        interventions.push(boiler_check);

        // Future bookings across the portfolio.
        let mut upcoming = Reservation::new(properties[1].id, "Anaïs Laurent", day(5), day(12));
        upcoming.source = "Direct".into();
        upcoming.total_price = 1130.0;
        let mut upcoming_clean = Intervention::new(
            properties[1].id,
            InterventionKind::Cleaning,
            "Sofia",
            day(12),
        );
        upcoming_clean.linked_reservation_id = Some(upcoming.id);
        reservations.push(upcoming);
        interventions.push(upcoming_clean);

        let mut pending = Reservation::new(properties[2].id, "Tomás Oliveira", day(8), day(10));
        pending.status = ReservationStatus::Pending;
        pending.total_price = 260.0;
        reservations.push(pending);

        let mut cancelled = Reservation::new(properties[3].id, "Mia Schneider", day(2), day(6));
        cancelled.status = ReservationStatus::Cancelled;
        cancelled.source = "Booking".into();
        reservations.push(cancelled);

        let mut long_stay = Reservation::new(properties[4].id, "Nora Lindqvist", day(1), day(18));
        long_stay.guest_count = 2;
        long_stay.source = "Direct".into();
        long_stay.total_price = 2240.0;
        reservations.push(long_stay);

        // Standalone maintenance, not tied to any stay.
        let mut repaint = Intervention::new(
            properties[5].id,
            InterventionKind::Maintenance,
            "Rui",
            day(4),
        );
        repaint.end_date = day(6);
        repaint.start_time = Some("09:00".into());
        repaint.estimated_duration_hours = 16.0;
        interventions.push(repaint);

        let mut deep_clean = Intervention::new(
            properties[6].id,
            InterventionKind::Cleaning,
            "Sofia",
            day(7),
        );
        deep_clean.estimated_duration_hours = 5.0;
        interventions.push(deep_clean);

        portfolio.properties = properties;
        portfolio.reservations = reservations;
        portfolio.interventions = interventions;
        portfolio
    }

    // --- Derived record sets (recomputed per render) ---

    /// Reservations surviving the status filter. Filtering compares the
    /// effective status so the dropdown matches what the bars show.
    pub fn filtered_reservations(&self) -> Vec<Reservation> {
        let today = self.controller.today;
        self.portfolio
            .reservations
            .iter()
            .filter(|r| match self.status_filter {
                None => true,
                Some(f) => r.effective_status(today) == f,
            })
            .cloned()
            .collect()
    }

    /// Interventions surviving the kind filter.
    pub fn filtered_interventions(&self) -> Vec<Intervention> {
        self.portfolio
            .interventions
            .iter()
            .filter(|i| match self.kind_filter {
                None => true,
                Some(k) => i.kind == k,
            })
            .cloned()
            .collect()
    }

    // --- Navigation / viewport ---

    pub fn go_today(&mut self) {
        self.controller.go_today();
        self.sync.arm_scroll_to_today();
        self.status_message = "Back to today".to_string();
    }

    /// The toolbar changed the zoom level; keep the centered day centered.
    pub fn on_zoom_changed(&mut self, old: ZoomLevel) {
        self.sync.recenter_on_zoom(old, self.zoom);
        self.persist_settings();
        tracing::debug!(from = old.label(), to = self.zoom.label(), "zoom changed");
    }

    pub fn persist_settings(&self) {
        Settings {
            zoom: self.zoom,
            show_interventions: self.show_interventions,
            status_filter: self.status_filter,
            kind_filter: self.kind_filter,
            last_portfolio: self.portfolio_path.clone(),
        }
        .save();
    }

    // --- File operations ---

    pub fn open_portfolio(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Portfolio", &["json"])
            .pick_file()
        {
            self.loading = true;
            match crate::io::load_portfolio(&path) {
                Ok(portfolio) => {
                    tracing::debug!(
                        properties = portfolio.properties.len(),
                        reservations = portfolio.reservations.len(),
                        "portfolio loaded"
                    );
                    self.portfolio = portfolio;
                    self.portfolio_path = Some(path);
                    self.property_page = 0;
                    self.sync.arm_scroll_to_today();
                    self.persist_settings();
                    self.status_message = "Portfolio loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {e:#}");
                }
            }
            self.loading = false;
        }
    }

    pub fn save_portfolio(&mut self) {
        if let Some(path) = self.portfolio_path.clone() {
            self.portfolio.touch();
            match crate::io::save_portfolio(&self.portfolio, &path) {
                Ok(()) => self.status_message = "Portfolio saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {e:#}"),
            }
        } else {
            self.save_portfolio_as();
        }
    }

    pub fn save_portfolio_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Portfolio", &["json"])
            .set_file_name(format!("{}.json", self.portfolio.name))
            .save_file()
        {
            self.portfolio.touch();
            match crate::io::save_portfolio(&self.portfolio, &path) {
                Ok(()) => {
                    self.portfolio_path = Some(path);
                    self.persist_settings();
                    self.status_message = "Portfolio saved".to_string();
                }
                Err(e) => self.status_message = format!("Error saving: {e:#}"),
            }
        }
    }

    pub fn export_csv(&mut self) {
        let reservations = self.filtered_reservations();
        if reservations.is_empty() {
            self.status_message = "Nothing to export — no reservations match".to_string();
            return;
        }

        let default_name = format!("{}-reservations.csv", self.portfolio.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(default_name)
            .save_file()
        {
            match crate::io::csv_export::export_reservations(
                &self.portfolio.properties,
                &reservations,
                &path,
            ) {
                Ok(count) => {
                    self.status_message = format!("Exported {count} reservations to CSV");
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {e:#}");
                }
            }
        }
    }
}

impl eframe::App for StaygridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);
        self.loading_more = false;

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Properties: {}",
                                self.portfolio.properties.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Visible days: {}",
                                self.controller.range.total_days()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Central panel: the timeline grid
        let frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            ui::timeline_grid::show_timeline_grid(self, ui);
        });

        // Deferred path of the scroll handler: the settled extension check.
        let now = Instant::now();
        if self.sync.extension_check(now) && self.controller.extend_range(now) {
            self.loading_more = true;
            tracing::debug!(
                total_days = self.controller.range.total_days(),
                "visible range extended"
            );
        }
        if self.sync.has_deferred_work() {
            ctx.request_repaint_after(Duration::from_millis(60));
        }
    }
}
