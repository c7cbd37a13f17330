//! Cross-reference checks between the three input documents.
//!
//! Finds the data-entry mismatches that silently empty a mask: layers whose
//! tag nothing declares, prototype tags no layer routes, placements that
//! reference unknown prototypes, and prototypes without loot points.

use std::collections::BTreeSet;

use lootmask_core::exclusion::ExclusionList;
use lootmask_core::resolver::{layer_tag, resolve_tags, TagRouter, DEF_ALL_LAYER};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::generate::{load_inputs, LoadedInputs};
use crate::inputs::locate_inputs;
use crate::settings::ToolSettings;

/// Findings of a validation pass. All findings are warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Non-excluded layers whose suffix tag is not a declared usage or value.
    pub undeclared_layer_tags: Vec<String>,
    /// Prototype tags that route to no layer.
    pub unrouted_tags: Vec<String>,
    /// Placement group names with no prototype.
    pub unmatched_groups: Vec<String>,
    /// Prototypes without any loot point.
    pub empty_profiles: Vec<String>,
}

impl ValidationReport {
    /// Total number of findings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.undeclared_layer_tags.len()
            + self.unrouted_tags.len()
            + self.unmatched_groups.len()
            + self.empty_profiles.len()
    }

    /// Check if nothing was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warning_count() == 0
    }
}

/// Check loaded inputs against each other.
#[must_use]
pub fn validate_inputs(inputs: &LoadedInputs, excluded: &ExclusionList) -> ValidationReport {
    let config = &inputs.config;

    let undeclared_layer_tags = config
        .layer_names()
        .filter(|layer| *layer != DEF_ALL_LAYER && !excluded.contains(layer))
        .filter(|layer| layer_tag(layer).map_or(true, |tag| !config.declares_tag(tag)))
        .map(String::from)
        .collect();

    let mut router = TagRouter::new(config.layer_names());
    let mut unrouted = BTreeSet::new();
    for (_, profile) in inputs.groups.iter() {
        for tag in profile.tags() {
            if router.layers_for(tag).is_empty() {
                unrouted.insert(tag.to_string());
            }
        }
    }

    let resolution = resolve_tags(&inputs.placements.buildings, &inputs.groups, config.layer_names());

    ValidationReport {
        undeclared_layer_tags,
        unrouted_tags: unrouted.into_iter().collect(),
        unmatched_groups: resolution.unmatched().iter().cloned().collect(),
        empty_profiles: inputs
            .groups
            .iter()
            .filter(|(_, profile)| profile.points.is_empty())
            .map(|(name, _)| name.to_string())
            .collect(),
    }
}

/// Locate, load and cross-check the inputs. Writes nothing.
pub fn run_validate(settings: &ToolSettings) -> Result<ValidationReport> {
    let files = locate_inputs(settings)?;
    let inputs = load_inputs(&files)?;
    let report = validate_inputs(&inputs, &settings.excluded_layers);
    log_report(&report);
    Ok(report)
}

/// Log every finding as a warning.
pub fn log_report(report: &ValidationReport) {
    let sections = [
        ("Layers with undeclared tags", &report.undeclared_layer_tags),
        ("Prototype tags routed to no layer", &report.unrouted_tags),
        ("Unmatched groups", &report.unmatched_groups),
        ("Prototypes without loot points", &report.empty_profiles),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        warn!("{title}: {}", items.len());
        for item in items {
            warn!(" - {item}");
        }
    }

    if report.is_clean() {
        info!("Validation passed");
    } else {
        info!("Validation finished with {} warnings", report.warning_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{parse_group_table, parse_layer_config, parse_placements};
    use lootmask_test_utils::fixtures::{CONFIG_XML, GROUPPOS_XML, PROTO_XML};
    use std::path::PathBuf;

    fn sample_inputs() -> LoadedInputs {
        LoadedInputs {
            config_file: PathBuf::from("config.xml"),
            config: parse_layer_config(CONFIG_XML).unwrap(),
            groups: parse_group_table(PROTO_XML).unwrap(),
            placements: parse_placements(GROUPPOS_XML).unwrap(),
        }
    }

    #[test]
    fn test_sample_inputs_findings() {
        let report = validate_inputs(&sample_inputs(), &ExclusionList::default());

        assert_eq!(report.undeclared_layer_tags, vec!["usgFlg_Industrial"]);
        assert_eq!(report.unrouted_tags, vec!["Tier3"]);
        assert_eq!(report.unmatched_groups, vec!["Land_Lighthouse"]);
        assert_eq!(report.empty_profiles, vec!["Land_Barracks"]);
        assert_eq!(report.warning_count(), 4);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_excluded_layers_are_not_checked() {
        let mut inputs = sample_inputs();
        inputs.config.insert_layer("water-sea", Default::default());

        let report = validate_inputs(&inputs, &ExclusionList::default());
        assert!(!report.undeclared_layer_tags.contains(&"water-sea".to_string()));

        let report = validate_inputs(&inputs, &ExclusionList::empty());
        assert!(report.undeclared_layer_tags.contains(&"water-sea".to_string()));
    }
}
