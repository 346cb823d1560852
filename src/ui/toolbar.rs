use egui::{menu, RichText, Ui};

use crate::app::StaygridApp;
use crate::model::{property, InterventionKind, NavUnit, ReservationStatus, ZoomLevel};
use crate::ui::theme;

/// Render the top toolbar: file menu, navigation, zoom and filters.
pub fn show_toolbar(app: &mut StaygridApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open Portfolio...").clicked() {
                app.open_portfolio();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save").clicked() {
                app.save_portfolio();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_portfolio_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export Reservations CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Config Folder").clicked() {
                let _ = open::that(crate::settings::Settings::config_dir());
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button(egui_phosphor::regular::CARET_LEFT).clicked() {
            app.controller.go_prev(NavUnit::Month);
        }
        if ui.button("Today").clicked() {
            app.go_today();
        }
        if ui.button(egui_phosphor::regular::CARET_RIGHT).clicked() {
            app.controller.go_next(NavUnit::Month);
        }
        ui.label(
            RichText::new(&app.month_title)
                .font(theme::font_menu())
                .strong(),
        );

        ui.separator();

        let old_zoom = app.zoom;
        egui::ComboBox::from_id_salt("zoom_level")
            .selected_text(app.zoom.label())
            .width(92.0)
            .show_ui(ui, |ui| {
                for zoom in ZoomLevel::ALL {
                    ui.selectable_value(&mut app.zoom, zoom, zoom.label());
                }
            });
        if app.zoom != old_zoom {
            app.on_zoom_changed(old_zoom);
        }

        ui.separator();

        let status_text = app
            .status_filter
            .map(|s| s.label())
            .unwrap_or("All statuses");
        let mut filters_changed = false;
        egui::ComboBox::from_id_salt("status_filter")
            .selected_text(status_text)
            .width(110.0)
            .show_ui(ui, |ui| {
                filters_changed |= ui
                    .selectable_value(&mut app.status_filter, None, "All statuses")
                    .changed();
                for status in ReservationStatus::ALL {
                    filters_changed |= ui
                        .selectable_value(&mut app.status_filter, Some(status), status.label())
                        .changed();
                }
            });

        let kind_text = app.kind_filter.map(|k| k.label()).unwrap_or("All types");
        egui::ComboBox::from_id_salt("kind_filter")
            .selected_text(kind_text)
            .width(110.0)
            .show_ui(ui, |ui| {
                filters_changed |= ui
                    .selectable_value(&mut app.kind_filter, None, "All types")
                    .changed();
                for kind in InterventionKind::ALL {
                    filters_changed |= ui
                        .selectable_value(&mut app.kind_filter, Some(kind), kind.label())
                        .changed();
                }
            });

        filters_changed |= ui
            .checkbox(&mut app.show_interventions, "Interventions")
            .changed();
        if filters_changed {
            app.persist_settings();
        }

        ui.separator();

        let pages = property::page_count(app.portfolio.properties.len());
        if ui.button("‹").clicked() && app.property_page > 0 {
            app.property_page -= 1;
        }
        ui.label(
            RichText::new(format!("Page {}/{}", app.property_page + 1, pages))
                .font(theme::font_status())
                .color(theme::TEXT_SECONDARY),
        );
        if ui.button("›").clicked() && app.property_page + 1 < pages {
            app.property_page += 1;
        }

        // Right-aligned portfolio name + loading indicator
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.portfolio_path.is_some() {
                ""
            } else {
                " (unsaved)"
            };
            ui.label(
                RichText::new(format!("{}{}", app.portfolio.name, modified))
                    .size(11.0)
                    .weak(),
            );
            if app.loading || app.loading_more {
                ui.spinner();
            }
        });
    });
}
