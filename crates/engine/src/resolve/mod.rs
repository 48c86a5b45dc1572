//! Enabled-set resolution
//!
//! Turns a frozen [`Config`] plus the capability [`Registry`] into the exact
//! set of analyses a run will execute. Resolution is strict: any unknown
//! name or contradictory toggle combination aborts before a single analysis
//! runs, so a typo can never silently shrink the set. The output is
//! deterministic and name-sorted.
//!
//! Selection layers apply in a fixed order: the base set (defaults, or
//! everything under enable-all, or nothing under disable-all), the fast-only
//! trim, preset expansion, the enable list, the disable list, and finally
//! composite-group coalescing. Because the trim runs before the unions,
//! preset members and explicitly enabled analyses always survive fast-only;
//! the flag constrains only what was implied.

mod group;

use std::collections::{BTreeMap, HashSet};

use crate::core::{AnalysisDescriptor, Config, ConfigError};
use crate::registry::Registry;

/// Resolves the active analysis set for a run.
pub fn resolve(
    config: &Config,
    registry: &Registry,
) -> Result<Vec<AnalysisDescriptor>, ConfigError> {
    validate(config, registry)?;

    let mut set = base_set(config, registry);

    if config.fast_only {
        set.retain(|_, descriptor| !descriptor.is_slow());
    }

    for preset in &config.presets {
        if let Some(members) = registry.preset(preset) {
            for member in members {
                if let Some(descriptor) = registry.get(member) {
                    set.insert(descriptor.name(), descriptor.clone());
                }
            }
        }
    }

    for name in &config.enable {
        if let Some(descriptor) = registry.get(name) {
            set.insert(descriptor.name(), descriptor.clone());
        }
    }

    for name in &config.disable {
        if let Some(canonical) = registry.canonical_name(name) {
            set.remove(&canonical);
        }
    }

    group::coalesce(&mut set, registry);

    Ok(set.into_values().collect())
}

fn validate(config: &Config, registry: &Registry) -> Result<(), ConfigError> {
    for name in config.enable.iter().chain(config.disable.iter()) {
        if registry.get(name).is_none() {
            return Err(ConfigError::UnknownAnalysis(name.clone()));
        }
    }

    for preset in &config.presets {
        if registry.preset(preset).is_none() {
            return Err(ConfigError::UnknownPreset(preset.clone()));
        }
    }

    if config.enable_all && config.disable_all {
        return Err(ConfigError::ConflictingOptions);
    }
    if config.disable_all && config.enable.is_empty() {
        return Err(ConfigError::NothingEnabled);
    }

    let disabled: HashSet<String> = config
        .disable
        .iter()
        .filter_map(|name| registry.canonical_name(name))
        .collect();
    for name in &config.enable {
        if let Some(canonical) = registry.canonical_name(name) {
            if disabled.contains(&canonical) {
                return Err(ConfigError::ContradictoryToggle(canonical));
            }
        }
    }

    Ok(())
}

fn base_set(config: &Config, registry: &Registry) -> BTreeMap<String, AnalysisDescriptor> {
    let mut set = BTreeMap::new();
    if config.enable_all {
        for descriptor in registry.all() {
            set.insert(descriptor.name(), descriptor.clone());
        }
    } else if config.disable_all {
        // Empty base; the preset and enable unions below fill it.
    } else {
        for descriptor in registry.default_enabled() {
            set.insert(descriptor.name(), descriptor.clone());
        }
    }
    set
}
