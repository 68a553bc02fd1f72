//! `HabZoneApp` — the eframe application hosting the zone panel.
//!
//! This module declares the app struct and its constructor. Methods are
//! split across the sibling sub-modules:
//!
//! - `events` — journal and EDSM channels, commands, startup restore
//! - `panel`  — the zone grid and its toolbar
//! - `prefs`  — the preferences window

pub mod events;
pub mod panel;
pub mod prefs;

use std::path::Path;
use std::time::Instant;

use eframe::egui;

use habzone::config::{ConfigStore, Settings};
use habzone::edsm::LookupDispatcher;
use habzone::format::NumberFormat;
use habzone::journal::watcher::JournalWatcher;
use habzone::state::{HabZoneState, RestoreSchedule};

use prefs::PrefsDraft;

// ─── Application state ───────────────────────────────────────────────────────

pub struct HabZoneApp {
    pub store: ConfigStore,
    pub settings: Settings,
    pub state: HabZoneState,
    pub number_format: NumberFormat,
    pub lookups: LookupDispatcher,
    pub journal: Option<JournalWatcher>,
    pub restore: RestoreSchedule,
    /// Whether the verbose toggle controls `log::max_level`.
    pub runtime_log_level: bool,
    /// Open preferences window, editing a copy of the settings.
    pub prefs: Option<PrefsDraft>,
    // Manual update
    pub manual_system: String,
    pub manual_docked: bool,
}

impl HabZoneApp {
    pub fn new(
        ctx: &egui::Context,
        store: ConfigStore,
        settings: Settings,
        runtime_log_level: bool,
    ) -> Self {
        let journal = spawn_watcher(ctx, &settings.journal_dir);
        Self {
            store,
            settings,
            state: HabZoneState::new(),
            number_format: NumberFormat::default(),
            lookups: LookupDispatcher::new(),
            journal,
            restore: RestoreSchedule::new(Instant::now()),
            runtime_log_level,
            prefs: None,
            manual_system: String::new(),
            manual_docked: false,
        }
    }
}

/// Follow journals in `dir`, waking the UI for each batch of events.
pub fn spawn_watcher(ctx: &egui::Context, dir: &Path) -> Option<JournalWatcher> {
    if !dir.is_dir() {
        log::warn!("Journal directory {} not found", dir.display());
        return None;
    }
    let ctx = ctx.clone();
    Some(JournalWatcher::spawn(dir.to_path_buf(), move || {
        ctx.request_repaint()
    }))
}

impl eframe::App for HabZoneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.try_restore(ctx);
        self.poll_journal(ctx);
        self.check_lookup();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_zones(ui);
        });

        self.draw_prefs(ctx);
    }
}
