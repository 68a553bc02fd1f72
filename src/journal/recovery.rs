//! Startup recovery from existing journal files.
//!
//! Best-effort and read-only: any failure simply means nothing is
//! recovered.

use std::io::{BufRead, BufReader};
use std::path::Path;

use super::event::JournalEvent;
use super::latest_journal;
use crate::zone::StarObservation;

/// Where the commander was last seen, according to the journal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecoveredState {
    pub system: Option<String>,
    /// Arrival-star scan made after the last system change, if any.
    pub observation: Option<StarObservation>,
}

/// Replay the newest journal in `dir`.
pub fn recover(dir: &Path) -> Option<RecoveredState> {
    let path = latest_journal(dir)?;
    let file = std::fs::File::open(&path)
        .map_err(|e| log::debug!("Cannot open {}: {}", path.display(), e))
        .ok()?;

    let mut state = RecoveredState::default();
    for line in BufReader::new(file).lines() {
        let Ok(line) = line else { break };
        let Ok(event) = JournalEvent::parse(&line) else {
            continue;
        };
        replay(&mut state, event);
    }

    log::debug!("Recovered {:?} from {}", state, path.display());
    Some(state)
}

fn replay(state: &mut RecoveredState, event: JournalEvent) {
    match event {
        JournalEvent::Location { .. } | JournalEvent::FsdJump { .. } => {
            state.system = event.arrival_system().map(str::to_string);
            state.observation = None;
        }
        JournalEvent::Scan(scan) => {
            if let Ok(Some(obs)) = scan.star_observation() {
                state.observation = Some(obs);
                if state.system.is_none() {
                    state.system = scan.star_system;
                }
            }
        }
        JournalEvent::Other(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_last_arrival_scan() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Journal.2024-03-05T090000.01.log"),
            concat!(
                "{\"event\":\"FSDJump\",\"StarSystem\":\"Sol\"}\n",
                "{\"event\":\"Scan\",\"DistanceFromArrivalLS\":0.0,\"Radius\":695700000.0,\"SurfaceTemperature\":5778.0}\n",
                "{\"event\":\"FSDJump\",\"StarSystem\":\"Lave\"}\n",
                "garbage\n",
                "{\"event\":\"Scan\",\"DistanceFromArrivalLS\":0.0,\"Radius\":500000000.0,\"SurfaceTemperature\":4900.0}\n",
                "{\"event\":\"Scan\",\"DistanceFromArrivalLS\":12.5,\"Radius\":7000000.0,\"SurfaceTemperature\":300.0}\n",
            ),
        )
        .unwrap();

        let state = recover(dir.path()).unwrap();
        assert_eq!(state.system.as_deref(), Some("Lave"));
        assert_eq!(
            state.observation,
            Some(StarObservation::new(500_000_000.0, 4900.0))
        );
    }

    #[test]
    fn jump_without_scan_has_no_observation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Journal.2024-03-05T090000.01.log"),
            concat!(
                "{\"event\":\"Scan\",\"DistanceFromArrivalLS\":0.0,\"Radius\":695700000.0,\"SurfaceTemperature\":5778.0}\n",
                "{\"event\":\"FSDJump\",\"StarSystem\":\"Achenar\"}\n",
            ),
        )
        .unwrap();

        let state = recover(dir.path()).unwrap();
        assert_eq!(state.system.as_deref(), Some("Achenar"));
        assert_eq!(state.observation, None);
    }

    #[test]
    fn nothing_to_recover_without_journals() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(recover(dir.path()), None);
    }
}
