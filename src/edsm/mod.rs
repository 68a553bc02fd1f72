//! EDSM (Elite Dangerous Star Map) body lookup.
//!
//! - `client`  — blocking HTTP request for a system's catalogued bodies
//! - `collate` — groups those bodies under the zone panel's world types
//! - `worker`  — runs lookups off the UI thread, tagged with a sequence

pub mod client;
pub mod collate;
pub mod worker;

pub use client::{Body, EdsmClient, SystemBodies};
pub use collate::{collate, BodyLink};
pub use worker::{LookupDispatcher, LookupReply};

pub const EDSM_BASE: &str = "https://www.edsm.net";
