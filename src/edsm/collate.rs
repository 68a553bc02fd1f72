//! Group EDSM bodies under the world types shown in the zone panel.

use std::collections::{BTreeMap, HashMap};

use url::Url;

use super::client::SystemBodies;
use super::EDSM_BASE;
use crate::zone::{WorldType, WORLDS};

const TERRAFORM_CANDIDATE: &str = "Candidate for terraforming";
const TERRAFORMABLE: &str = "terraformable";

/// Lookup label for one row: compact body names plus a link to EDSM.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyLink {
    pub text: String,
    pub url: Option<String>,
}

/// One `BodyLink` per world type.
///
/// Terraforming candidates are listed as terraformable regardless of
/// their sub-type. A row with exactly one body links straight to it,
/// otherwise to the whole system.
pub fn collate(system: &SystemBodies) -> BTreeMap<WorldType, BodyLink> {
    let mut groups: HashMap<&str, Vec<&str>> = HashMap::new();
    for body in &system.bodies {
        let key = if body.terraforming_state.as_deref() == Some(TERRAFORM_CANDIDATE) {
            TERRAFORMABLE
        } else {
            body.sub_type.as_str()
        };
        groups.entry(key).or_default().push(body.name.as_str());
    }

    let system_name = system.name.as_str();
    WORLDS
        .iter()
        .map(|spec| {
            let names = groups
                .get(spec.edsm_sub_type)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let text = names
                .iter()
                .filter(|n| !n.is_empty())
                .map(|n| compact_name(system_name, n))
                .collect::<Vec<_>>()
                .join(" ");
            let body = match names {
                [only] => *only,
                _ => "ALL",
            };
            let link = BodyLink {
                text,
                url: show_system_url(system_name, body),
            };
            (spec.kind, link)
        })
        .collect()
}

/// `Sol A 3 a` in system `Sol` becomes `A3a`.
fn compact_name(system_name: &str, body_name: &str) -> String {
    match body_name.strip_prefix(system_name) {
        Some(rest) if !system_name.is_empty() => rest.replace(' ', ""),
        _ => body_name.to_string(),
    }
}

fn show_system_url(system_name: &str, body_name: &str) -> Option<String> {
    Url::parse_with_params(
        &format!("{}/show-system", EDSM_BASE),
        &[("systemName", system_name), ("bodyName", body_name)],
    )
    .map(String::from)
    .map_err(|e| log::warn!("Cannot build EDSM link: {}", e))
    .ok()
}
