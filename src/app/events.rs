//! Event plumbing for `HabZoneApp`.
//!
//! Drains the journal and EDSM channels on the UI thread, carries out the
//! commands the state handlers return, and runs the startup restore.

use std::time::Instant;

use eframe::egui;

use habzone::config::{LastObservation, KEY_LAST_SYSTEM};
use habzone::journal::recovery::recover;
use habzone::journal::CommanderSnapshot;
use habzone::state::Command;

use super::HabZoneApp;

impl HabZoneApp {
    /// Apply every journal event received since the last frame.
    pub fn poll_journal(&mut self, ctx: &egui::Context) {
        let Some(watcher) = &self.journal else {
            return;
        };
        for event in watcher.poll() {
            let commands = self.state.on_journal_event(&event, self.settings.mask);
            self.run_commands(commands, ctx);
        }
    }

    /// Apply the newest EDSM reply, if one has arrived.
    pub fn check_lookup(&mut self) {
        if let Some(reply) = self.lookups.poll() {
            log::debug!("EDSM reply #{} for {}", reply.seq, reply.system);
            self.state.apply_lookup(&reply.outcome);
        }
    }

    /// Manual update from the toolbar.
    pub fn manual_update(&mut self, ctx: &egui::Context) {
        let snapshot = CommanderSnapshot::new(self.manual_system.trim(), self.manual_docked);
        let commands = self.state.on_commander(&snapshot, self.settings.mask);
        if commands.is_empty() {
            log::debug!("Manual update skipped (docked, empty, or EDSM off)");
        }
        self.run_commands(commands, ctx);
    }

    pub fn run_commands(&mut self, commands: Vec<Command>, ctx: &egui::Context) {
        for command in commands {
            match command {
                Command::Lookup(system) => {
                    let ctx = ctx.clone();
                    let seq = self.lookups.request(&system, move || ctx.request_repaint());
                    log::debug!("EDSM request #{} for {}", seq, system);
                    self.manual_system = system;
                }
                Command::CancelLookups => self.lookups.invalidate(),
                Command::RememberObservation(last) => {
                    last.write(&mut self.store);
                    self.save_store();
                }
                Command::ForgetObservation { system } => {
                    LastObservation::clear(&mut self.store);
                    match system.as_deref() {
                        Some(name) => {
                            self.store.set_str(KEY_LAST_SYSTEM, name);
                            self.manual_system = name.to_string();
                        }
                        None => self.store.remove(KEY_LAST_SYSTEM),
                    }
                    self.save_store();
                }
            }
        }
    }

    /// Restore the last observation on the fixed startup schedule. Saved
    /// settings are tried first, then the newest journal.
    pub fn try_restore(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.restore.due(now) {
            if let Some(last) = LastObservation::read(&self.store) {
                self.state.restore(last.system, last.observation);
                self.restore.succeeded();
            } else if let Some(recovered) = recover(&self.settings.journal_dir) {
                if let Some(system) = &recovered.system {
                    self.manual_system = system.clone();
                }
                if let Some(observation) = recovered.observation {
                    self.state.restore(recovered.system, observation);
                    self.restore.succeeded();
                }
            }
        }
        if let Some(wait) = self.restore.next_in(now) {
            ctx.request_repaint_after(wait);
        }
    }

    pub fn save_store(&self) {
        if let Err(e) = self.store.save() {
            log::warn!("Could not save settings: {}", e);
        }
    }
}
