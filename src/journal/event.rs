//! Journal records.
//!
//! Each journal line is one JSON object with an `event` field. Only the
//! records that move the zone panel are modelled; everything else parses
//! as `Other`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ScanParseError;
use crate::zone::StarObservation;

/// A parsed journal line.
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEvent {
    Scan(ScanRecord),
    Location { star_system: Option<String> },
    FsdJump { star_system: Option<String> },
    Other(String),
}

impl JournalEvent {
    pub fn parse(line: &str) -> Result<Self, ScanParseError> {
        let raw: RawEntry = serde_json::from_str(line)?;
        Ok(raw.into_event())
    }

    /// System named by a `Location` or `FSDJump` record.
    pub fn arrival_system(&self) -> Option<&str> {
        match self {
            JournalEvent::Location { star_system } | JournalEvent::FsdJump { star_system } => {
                star_system.as_deref().filter(|s| !s.is_empty())
            }
            _ => None,
        }
    }
}

/// Fields of a `Scan` record, kept loosely typed until the observation is
/// extracted so that a bad field marks the panel unknown rather than
/// dropping the record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanRecord {
    pub star_system: Option<String>,
    pub body_name: Option<String>,
    pub distance_from_arrival: Option<Value>,
    pub radius: Option<Value>,
    pub surface_temperature: Option<Value>,
}

impl ScanRecord {
    /// `Ok(None)` for bodies other than the arrival star.
    pub fn star_observation(&self) -> Result<Option<StarObservation>, ScanParseError> {
        let distance = match &self.distance_from_arrival {
            None | Some(Value::Null) => 0.0,
            Some(v) => numeric("DistanceFromArrivalLS", v)?,
        };
        if distance != 0.0 {
            return Ok(None);
        }

        let radius = required("Radius", self.radius.as_ref())?;
        let temperature = required("SurfaceTemperature", self.surface_temperature.as_ref())?;
        Ok(Some(StarObservation::new(radius, temperature)))
    }
}

/// Stellar radius and temperature: present, numeric and strictly positive.
fn required(field: &'static str, value: Option<&Value>) -> Result<f64, ScanParseError> {
    let v = match value {
        None | Some(Value::Null) => return Err(ScanParseError::Missing(field)),
        Some(v) => v,
    };
    let parsed = numeric(field, v)?;
    if parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(ScanParseError::NotPositive {
            field,
            value: v.to_string(),
        })
    }
}

/// Accepts JSON numbers and numeric strings.
fn numeric(field: &'static str, value: &Value) -> Result<f64, ScanParseError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| ScanParseError::NotNumeric {
            field,
            value: value.to_string(),
        })
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    event: String,
    #[serde(rename = "StarSystem")]
    star_system: Option<String>,
    #[serde(rename = "BodyName")]
    body_name: Option<String>,
    #[serde(rename = "DistanceFromArrivalLS")]
    distance_from_arrival: Option<Value>,
    #[serde(rename = "Radius")]
    radius: Option<Value>,
    #[serde(rename = "SurfaceTemperature")]
    surface_temperature: Option<Value>,
}

impl RawEntry {
    fn into_event(self) -> JournalEvent {
        match self.event.as_str() {
            "Scan" => JournalEvent::Scan(ScanRecord {
                star_system: self.star_system,
                body_name: self.body_name,
                distance_from_arrival: self.distance_from_arrival,
                radius: self.radius,
                surface_temperature: self.surface_temperature,
            }),
            "Location" => JournalEvent::Location {
                star_system: self.star_system,
            },
            "FSDJump" => JournalEvent::FsdJump {
                star_system: self.star_system,
            },
            _ => JournalEvent::Other(self.event),
        }
    }
}

/// Commander status snapshot, as returned by the companion API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommanderSnapshot {
    pub commander: CommanderStatus,
    #[serde(rename = "lastSystem")]
    pub last_system: LastSystem,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommanderStatus {
    pub docked: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LastSystem {
    pub name: String,
}

impl CommanderSnapshot {
    pub fn new(system: &str, docked: bool) -> Self {
        Self {
            commander: CommanderStatus { docked },
            last_system: LastSystem {
                name: system.to_string(),
            },
        }
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRIVAL_SCAN: &str = r#"{ "timestamp":"2024-03-05T09:12:44Z", "event":"Scan", "ScanType":"AutoScan", "BodyName":"Sol", "BodyID":0, "StarSystem":"Sol", "DistanceFromArrivalLS":0.000000, "StarType":"G", "Radius":695700000.000000, "SurfaceTemperature":5778.000000 }"#;

    #[test]
    fn parses_arrival_scan() {
        let event = JournalEvent::parse(ARRIVAL_SCAN).unwrap();
        let JournalEvent::Scan(scan) = event else {
            panic!("expected scan");
        };
        assert_eq!(scan.star_system.as_deref(), Some("Sol"));
        let obs = scan.star_observation().unwrap().unwrap();
        assert_eq!(obs.radius_meters, 695_700_000.0);
        assert_eq!(obs.surface_temperature_kelvin, 5778.0);
    }

    #[test]
    fn distant_bodies_are_skipped() {
        let line = r#"{"event":"Scan","DistanceFromArrivalLS":499.3,"Radius":6371000.0,"SurfaceTemperature":288.0}"#;
        let JournalEvent::Scan(scan) = JournalEvent::parse(line).unwrap() else {
            panic!("expected scan");
        };
        assert_eq!(scan.star_observation().unwrap(), None);
    }

    #[test]
    fn missing_distance_counts_as_arrival() {
        let line = r#"{"event":"Scan","Radius":"4.2e8","SurfaceTemperature":"6100"}"#;
        let JournalEvent::Scan(scan) = JournalEvent::parse(line).unwrap() else {
            panic!("expected scan");
        };
        let obs = scan.star_observation().unwrap().unwrap();
        assert_eq!(obs.radius_meters, 4.2e8);
        assert_eq!(obs.surface_temperature_kelvin, 6100.0);
    }

    #[test]
    fn missing_radius_is_an_error() {
        let line = r#"{"event":"Scan","DistanceFromArrivalLS":0.0,"SurfaceTemperature":5778.0}"#;
        let JournalEvent::Scan(scan) = JournalEvent::parse(line).unwrap() else {
            panic!("expected scan");
        };
        assert!(matches!(
            scan.star_observation(),
            Err(ScanParseError::Missing("Radius"))
        ));
    }

    #[test]
    fn non_numeric_temperature_is_an_error() {
        let line = r#"{"event":"Scan","DistanceFromArrivalLS":0.0,"Radius":6.9e8,"SurfaceTemperature":"hot"}"#;
        let JournalEvent::Scan(scan) = JournalEvent::parse(line).unwrap() else {
            panic!("expected scan");
        };
        assert!(matches!(
            scan.star_observation(),
            Err(ScanParseError::NotNumeric {
                field: "SurfaceTemperature",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_star_fields_are_errors() {
        for line in [
            r#"{"event":"Scan","DistanceFromArrivalLS":0.0,"Radius":-695700000.0,"SurfaceTemperature":5778.0}"#,
            r#"{"event":"Scan","DistanceFromArrivalLS":0.0,"Radius":0.0,"SurfaceTemperature":5778.0}"#,
            r#"{"event":"Scan","DistanceFromArrivalLS":0.0,"Radius":6.9e8,"SurfaceTemperature":"-5778"}"#,
        ] {
            let JournalEvent::Scan(scan) = JournalEvent::parse(line).unwrap() else {
                panic!("expected scan");
            };
            assert!(
                matches!(scan.star_observation(), Err(ScanParseError::NotPositive { .. })),
                "{}",
                line
            );
        }
    }

    #[test]
    fn system_change_records() {
        let jump = JournalEvent::parse(r#"{"event":"FSDJump","StarSystem":"Achenar"}"#).unwrap();
        assert_eq!(jump.arrival_system(), Some("Achenar"));
        let loc = JournalEvent::parse(r#"{"event":"Location","StarSystem":"Shinrarta Dezhra"}"#)
            .unwrap();
        assert_eq!(loc.arrival_system(), Some("Shinrarta Dezhra"));
        let empty = JournalEvent::parse(r#"{"event":"FSDJump","StarSystem":""}"#).unwrap();
        assert_eq!(empty.arrival_system(), None);
    }

    #[test]
    fn other_records_and_bad_lines() {
        let other = JournalEvent::parse(r#"{"event":"Music","MusicTrack":"Exploration"}"#).unwrap();
        assert_eq!(other, JournalEvent::Other("Music".into()));
        assert!(JournalEvent::parse("not json").is_err());
    }

    #[test]
    fn parses_commander_snapshot() {
        let snap = CommanderSnapshot::parse(
            r#"{"commander":{"name":"Jameson","docked":false},"lastSystem":{"id":1,"name":"Lave"}}"#,
        )
        .unwrap();
        assert_eq!(snap, CommanderSnapshot::new("Lave", false));
        assert!(CommanderSnapshot::parse(r#"{"commander":{}}"#).is_err());
    }
}
