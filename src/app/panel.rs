//! Zone panel rendering for `HabZoneApp`.
//!
//! Draws the toolbar (system name, manual lookup, preferences) and the grid
//! with one row per visible world type.

use eframe::egui;

use habzone::state::{LookupCell, ZoneRow};

use super::HabZoneApp;

impl HabZoneApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let system = self.state.system().unwrap_or("Unknown system");
            ui.strong(system);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("\u{2699}").on_hover_text("Preferences").clicked() {
                    self.open_prefs();
                }
                if self.settings.mask.edsm() {
                    if ui.button("Update").clicked() {
                        self.manual_update(ctx);
                    }
                    ui.checkbox(&mut self.manual_docked, "Docked");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.manual_system)
                            .hint_text("System...")
                            .desired_width(120.0),
                    );
                }
            });
        });
    }

    /// Render the world-type grid.
    pub fn draw_zones(&self, ui: &mut egui::Ui) {
        let mask = self.settings.mask;
        if !mask.any_rows() {
            // Keep the window from collapsing to nothing.
            ui.add_space(8.0);
            ui.weak("No world types selected");
            return;
        }

        let abbreviate = self.settings.abbreviate;
        let format = self.number_format;
        let show_edsm = mask.edsm();

        egui::Grid::new("zones")
            .num_columns(6)
            .spacing([6.0, 4.0])
            .show(ui, |ui| {
                for row in self.state.visible_rows(mask) {
                    draw_row(ui, row, &format, abbreviate, show_edsm);
                    ui.end_row();
                }
            });
    }
}

fn draw_row(
    ui: &mut egui::Ui,
    row: &ZoneRow,
    format: &habzone::format::NumberFormat,
    abbreviate: bool,
    show_edsm: bool,
) {
    let text = row.text(format, abbreviate);

    ui.label(format!("{}:", row.name()));

    match &row.lookup {
        LookupCell::Found(link) if show_edsm && !link.text.is_empty() => match &link.url {
            Some(url) => {
                ui.add(egui::Hyperlink::from_label_and_url(
                    egui::RichText::new(&link.text).small(),
                    url,
                ));
            }
            None => {
                ui.label(&link.text);
            }
        },
        LookupCell::Failed if show_edsm => {
            ui.label("?");
        }
        _ => {
            ui.label("");
        }
    }

    right_aligned(ui, &text.near, text.near_exact.as_deref());
    right_aligned(ui, text.separator, None);
    right_aligned(ui, &text.far, text.far_exact.as_deref());
    ui.label(text.unit);
}

fn right_aligned(ui: &mut egui::Ui, text: &str, hover: Option<&str>) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        let response = ui.label(text);
        if let Some(exact) = hover {
            response.on_hover_text(exact);
        }
    });
}
