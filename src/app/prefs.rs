//! Preferences window for `HabZoneApp`.
//!
//! Edits a `PrefsDraft` copy of the settings; nothing takes effect until
//! Apply, which writes the config, updates row visibility and the log
//! level, and restarts the journal watcher if its directory changed.

use std::collections::BTreeMap;
use std::path::PathBuf;

use eframe::egui;

use habzone::config::{DisplayMask, Settings, SETTING_EDSM};
use habzone::zone::WorldType;

use super::{spawn_watcher, HabZoneApp};

/// Settings being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefsDraft {
    pub worlds: BTreeMap<WorldType, bool>,
    pub edsm: bool,
    pub abbreviate: bool,
    pub verbose: bool,
    pub journal_dir: String,
}

impl PrefsDraft {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            worlds: WorldType::ALL
                .iter()
                .map(|w| (*w, settings.mask.shows(*w)))
                .collect(),
            edsm: settings.mask.edsm(),
            abbreviate: settings.abbreviate,
            verbose: settings.verbose,
            journal_dir: settings.journal_dir.display().to_string(),
        }
    }

    pub fn to_settings(&self) -> Settings {
        let mask = self
            .worlds
            .iter()
            .fold(DisplayMask(0), |mask, (world, on)| {
                mask.with(world.display_bit(), *on)
            })
            .with(SETTING_EDSM, self.edsm);
        Settings {
            mask,
            abbreviate: self.abbreviate,
            verbose: self.verbose,
            journal_dir: PathBuf::from(self.journal_dir.trim()),
        }
    }
}

impl HabZoneApp {
    pub fn open_prefs(&mut self) {
        if self.prefs.is_none() {
            self.prefs = Some(PrefsDraft::from_settings(&self.settings));
        }
    }

    /// Render the preferences window while it is open.
    pub fn draw_prefs(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.prefs.as_mut() else {
            return;
        };

        let mut open = true;
        let mut apply = false;
        let mut cancel = false;

        egui::Window::new("Preferences")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Display:");
                for world in WorldType::ALL {
                    if let Some(on) = draft.worlds.get_mut(&world) {
                        ui.checkbox(on, world.spec().name);
                    }
                }

                ui.add_space(6.0);
                ui.label("Elite Dangerous Star Map:");
                ui.checkbox(&mut draft.edsm, "Look up system in EDSM database");

                ui.add_space(6.0);
                ui.checkbox(&mut draft.abbreviate, "Abbreviate large distances (k / M)");
                ui.checkbox(&mut draft.verbose, "Verbose logging");

                ui.add_space(6.0);
                ui.label("Journal directory:");
                ui.add(
                    egui::TextEdit::singleline(&mut draft.journal_dir)
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Monospace),
                );

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    apply = ui.button("Apply").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
                ui.weak(format!("Version {}", habzone::VERSION));
            });

        if apply {
            let settings = draft.to_settings();
            self.prefs = None;
            self.apply_settings(settings, ctx);
        } else if cancel || !open {
            self.prefs = None;
        }
    }

    /// Persist `settings` and bring the running app in line with them.
    pub fn apply_settings(&mut self, settings: Settings, ctx: &egui::Context) {
        settings.write(&mut self.store);
        self.save_store();

        if self.runtime_log_level {
            log::set_max_level(settings.log_level());
        }
        if settings.journal_dir != self.settings.journal_dir {
            log::info!("Journal directory changed to {}", settings.journal_dir.display());
            self.journal = spawn_watcher(ctx, &settings.journal_dir);
        }
        if !settings.mask.edsm() {
            self.lookups.invalidate();
        }
        self.settings = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_round_trips_settings() {
        let settings = Settings {
            mask: DisplayMask(0x1015),
            abbreviate: true,
            verbose: false,
            journal_dir: PathBuf::from("/games/journals"),
        };
        let draft = PrefsDraft::from_settings(&settings);
        assert!(draft.worlds[&WorldType::MetalRich]);
        assert!(!draft.worlds[&WorldType::EarthLike]);
        assert!(draft.edsm);
        assert_eq!(draft.to_settings(), settings);
    }

    #[test]
    fn unticking_everything_stores_none() {
        let mut draft = PrefsDraft::from_settings(&Settings::default());
        for on in draft.worlds.values_mut() {
            *on = false;
        }
        draft.edsm = false;
        let settings = draft.to_settings();
        assert_eq!(settings.mask, DisplayMask(0));
        assert_eq!(settings.mask.to_stored(), 0xffff);
    }
}
