//! Panel state and the event handlers that drive it.
//!
//! `HabZoneState` is owned by the UI thread. Handlers never perform I/O:
//! they update rows and return `Command`s (lookups, persistence) for the
//! app to carry out.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::config::{DisplayMask, LastObservation};
use crate::edsm::{collate, BodyLink, SystemBodies};
use crate::error::LookupError;
use crate::format::{FormattedDistance, NumberFormat};
use crate::journal::{CommanderSnapshot, JournalEvent, ScanRecord};
use crate::zone::{evaluate, StarObservation, WorldType, ZoneResult, WORLDS};

/// Distance columns of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowZone {
    /// Nothing known yet (new system, or just started).
    Empty,
    /// The last arrival scan could not be read.
    Unknown,
    /// The whole band lies inside the star.
    Swallowed,
    Range { near: u64, far: u64 },
}

impl From<ZoneResult> for RowZone {
    fn from(result: ZoneResult) -> Self {
        match result.range() {
            Some((near, far)) if !result.degenerate => RowZone::Range { near, far },
            _ => RowZone::Swallowed,
        }
    }
}

/// EDSM column of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupCell {
    Empty,
    Failed,
    Found(BodyLink),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRow {
    pub world: WorldType,
    pub zone: RowZone,
    pub lookup: LookupCell,
}

/// Text for each column of a row, ready for the widgets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowText {
    pub near: String,
    pub near_exact: Option<String>,
    pub separator: &'static str,
    pub far: String,
    pub far_exact: Option<String>,
    pub unit: &'static str,
}

impl ZoneRow {
    fn new(world: WorldType) -> Self {
        Self {
            world,
            zone: RowZone::Empty,
            lookup: LookupCell::Empty,
        }
    }

    pub fn name(&self) -> &'static str {
        self.world.spec().name
    }

    pub fn text(&self, format: &NumberFormat, abbreviate: bool) -> RowText {
        match self.zone {
            RowZone::Empty => RowText::default(),
            RowZone::Unknown => RowText {
                unit: "?",
                ..RowText::default()
            },
            RowZone::Swallowed => RowText {
                separator: "\u{00D7}",
                ..RowText::default()
            },
            RowZone::Range { near, far } => {
                let FormattedDistance {
                    display: near,
                    exact: near_exact,
                } = format.format_distance(near, abbreviate);
                let FormattedDistance {
                    display: far,
                    exact: far_exact,
                } = format.format_distance(far, abbreviate);
                RowText {
                    near,
                    near_exact,
                    separator: "-",
                    far,
                    far_exact,
                    unit: "ls",
                }
            }
        }
    }
}

/// Side effects requested by a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Lookup(String),
    CancelLookups,
    RememberObservation(LastObservation),
    ForgetObservation { system: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoObservation,
    HasObservation,
}

pub struct HabZoneState {
    rows: BTreeMap<WorldType, ZoneRow>,
    observation: Option<StarObservation>,
    system: Option<String>,
}

impl Default for HabZoneState {
    fn default() -> Self {
        Self::new()
    }
}

impl HabZoneState {
    pub fn new() -> Self {
        Self {
            rows: WorldType::ALL
                .iter()
                .map(|w| (*w, ZoneRow::new(*w)))
                .collect(),
            observation: None,
            system: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.observation {
            Some(_) => Phase::HasObservation,
            None => Phase::NoObservation,
        }
    }

    pub fn observation(&self) -> Option<&StarObservation> {
        self.observation.as_ref()
    }

    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    pub fn row(&self, world: WorldType) -> &ZoneRow {
        // Every WorldType is inserted in `new` and never removed.
        &self.rows[&world]
    }

    /// Rows in table order.
    pub fn rows(&self) -> impl Iterator<Item = &ZoneRow> {
        self.rows.values()
    }

    /// Rows the mask selects, in table order.
    pub fn visible_rows(&self, mask: DisplayMask) -> impl Iterator<Item = &ZoneRow> {
        self.rows.values().filter(move |r| mask.shows(r.world))
    }

    pub fn on_journal_event(&mut self, event: &JournalEvent, mask: DisplayMask) -> Vec<Command> {
        let mut commands = Vec::new();
        match event {
            JournalEvent::Scan(scan) => self.on_scan(scan, &mut commands),
            JournalEvent::FsdJump { .. } => {
                self.clear();
                self.system = event.arrival_system().map(str::to_string);
                commands.push(Command::CancelLookups);
                commands.push(Command::ForgetObservation {
                    system: self.system.clone(),
                });
            }
            JournalEvent::Location { .. } => {
                self.system = event.arrival_system().map(str::to_string);
            }
            JournalEvent::Other(_) => {}
        }

        if mask.edsm() {
            if let Some(system) = event.arrival_system() {
                commands.push(Command::Lookup(system.to_string()));
            }
        }
        commands
    }

    /// Manual refresh from a commander status snapshot.
    pub fn on_commander(&mut self, snapshot: &CommanderSnapshot, mask: DisplayMask) -> Vec<Command> {
        if !mask.edsm() || snapshot.commander.docked {
            return Vec::new();
        }
        let name = snapshot.last_system.name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        vec![Command::Lookup(name.to_string())]
    }

    /// Same as `on_commander`, for a raw JSON snapshot.
    pub fn on_commander_json(&mut self, json: &str, mask: DisplayMask) -> Vec<Command> {
        match CommanderSnapshot::parse(json) {
            Ok(snapshot) => self.on_commander(&snapshot, mask),
            Err(e) => {
                log::debug!("Ignoring commander snapshot: {}", e);
                Vec::new()
            }
        }
    }

    /// Fill the EDSM column from a lookup result.
    pub fn apply_lookup(&mut self, outcome: &Result<SystemBodies, LookupError>) {
        match outcome {
            Ok(system) => {
                let mut links = collate(system);
                for row in self.rows.values_mut() {
                    let link = links.remove(&row.world).unwrap_or_default();
                    row.lookup = LookupCell::Found(link);
                }
            }
            Err(e) => {
                log::warn!("EDSM lookup failed: {}", e);
                for row in self.rows.values_mut() {
                    row.lookup = LookupCell::Failed;
                }
            }
        }
    }

    /// Show a previously saved observation. Does nothing if a live scan
    /// has already arrived.
    pub fn restore(&mut self, system: Option<String>, observation: StarObservation) {
        if self.observation.is_none() {
            log::info!(
                "Restoring last star ({:?}): r={} m, T={} K",
                system,
                observation.radius_meters,
                observation.surface_temperature_kelvin
            );
            if system.is_some() {
                self.system = system;
            }
            self.show(observation);
        }
    }

    fn on_scan(&mut self, scan: &ScanRecord, commands: &mut Vec<Command>) {
        match scan.star_observation() {
            Ok(Some(observation)) => {
                if scan.star_system.is_some() {
                    self.system = scan.star_system.clone();
                }
                self.show(observation);
                commands.push(Command::RememberObservation(LastObservation {
                    system: self.system.clone(),
                    observation,
                }));
            }
            Ok(None) => {}
            Err(e) => {
                log::debug!("Arrival scan unreadable: {}", e);
                self.observation = None;
                for row in self.rows.values_mut() {
                    row.zone = RowZone::Unknown;
                }
            }
        }
    }

    fn show(&mut self, observation: StarObservation) {
        for result in evaluate(&observation, &WORLDS) {
            if let Some(row) = self.rows.get_mut(&result.world) {
                row.zone = result.into();
            }
        }
        self.observation = Some(observation);
    }

    fn clear(&mut self) {
        self.observation = None;
        for row in self.rows.values_mut() {
            row.zone = RowZone::Empty;
            row.lookup = LookupCell::Empty;
        }
    }
}

/// Startup restore attempts at fixed offsets after the UI is built. The
/// host may still be loading at the first attempt.
#[derive(Debug, Clone)]
pub struct RestoreSchedule {
    started: Instant,
    pending: Vec<Duration>,
    done: bool,
}

impl RestoreSchedule {
    pub const OFFSETS_MS: [u64; 3] = [250, 1000, 2500];

    pub fn new(started: Instant) -> Self {
        Self {
            started,
            pending: Self::OFFSETS_MS
                .iter()
                .rev()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
            done: false,
        }
    }

    /// Whether an attempt is due at `now`. Consumes every elapsed slot.
    pub fn due(&mut self, now: Instant) -> bool {
        if self.done {
            return false;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let mut due = false;
        while self.pending.last().is_some_and(|at| *at <= elapsed) {
            self.pending.pop();
            due = true;
        }
        due
    }

    /// Time until the next attempt, for scheduling a repaint.
    pub fn next_in(&self, now: Instant) -> Option<Duration> {
        if self.done {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started);
        self.pending.last().map(|at| at.saturating_sub(elapsed))
    }

    pub fn succeeded(&mut self) {
        self.done = true;
        self.pending.clear();
    }

    pub fn is_finished(&self) -> bool {
        self.done || self.pending.is_empty()
    }
}
