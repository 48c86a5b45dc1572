//! Capability registry
//!
//! The registry is the engine's catalog: every analysis the binary ships is
//! registered here exactly once, together with its descriptor metadata and
//! any presets built on top. Registration happens at startup through the
//! builder; afterwards the registry is read-only, so lookups never race with
//! additions. Selection logic lives in [`crate::resolve`], not here.

use std::collections::{BTreeMap, HashMap};

use crate::core::{AnalysisDescriptor, Speed};

/// Immutable catalog of known analyses and presets.
#[derive(Debug, Default)]
pub struct Registry {
    descriptors: Vec<AnalysisDescriptor>,
    by_name: HashMap<String, usize>,
    presets: BTreeMap<String, Vec<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor to the catalog.
    ///
    /// Panics if the canonical name or any alias is already taken; two
    /// analyses answering to one name is a programming error in the
    /// catalog, not a runtime condition.
    pub fn register(&mut self, descriptor: AnalysisDescriptor) {
        let index = self.descriptors.len();
        let name = descriptor.name();
        assert!(
            !self.by_name.contains_key(&name),
            "analysis name {name:?} registered twice"
        );
        self.by_name.insert(name, index);
        for alias in descriptor.aliases() {
            assert!(
                !self.by_name.contains_key(alias),
                "analysis alias {alias:?} registered twice"
            );
            self.by_name.insert(alias.clone(), index);
        }
        self.descriptors.push(descriptor);
    }

    /// Adds a named preset. Member names may be aliases; they are stored in
    /// canonical form. Panics on unknown members.
    pub fn register_preset(&mut self, name: &str, members: &[&str]) {
        let canonical: Vec<String> = members
            .iter()
            .map(|member| {
                self.canonical_name(member)
                    .unwrap_or_else(|| panic!("preset {name:?} references unknown analysis {member:?}"))
            })
            .collect();
        self.presets.insert(name.to_string(), canonical);
    }

    /// Looks up a descriptor by canonical name or alias.
    pub fn get(&self, name: &str) -> Option<&AnalysisDescriptor> {
        self.by_name.get(name).map(|&index| &self.descriptors[index])
    }

    /// Resolves a canonical name or alias to the canonical name.
    pub fn canonical_name(&self, name: &str) -> Option<String> {
        self.get(name).map(|descriptor| descriptor.name())
    }

    /// All descriptors in registration order.
    pub fn all(&self) -> &[AnalysisDescriptor] {
        &self.descriptors
    }

    /// Descriptors enabled without any configuration, in registration order.
    pub fn default_enabled(&self) -> Vec<&AnalysisDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.enabled_by_default())
            .collect()
    }

    /// Members of a composite group, in registration order.
    pub fn group_members(&self, group: &str) -> Vec<&AnalysisDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.group() == Some(group))
            .collect()
    }

    /// Descriptors in the given speed class, in registration order.
    pub fn by_speed(&self, speed: Speed) -> Vec<&AnalysisDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.speed() == speed)
            .collect()
    }

    pub fn preset(&self, name: &str) -> Option<&[String]> {
        self.presets.get(name).map(|members| members.as_slice())
    }

    pub fn preset_names(&self) -> Vec<&str> {
        self.presets.keys().map(|name| name.as_str()).collect()
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.descriptors.iter().map(|descriptor| descriptor.name()).collect()
    }

    /// Maps every accepted spelling (canonical names and aliases alike) to
    /// its canonical name. Suppression directives are matched through this.
    pub fn alias_table(&self) -> HashMap<String, String> {
        let mut table = HashMap::new();
        for descriptor in &self.descriptors {
            let canonical = descriptor.name();
            table.insert(canonical.clone(), canonical.clone());
            for alias in descriptor.aliases() {
                table.insert(alias.clone(), canonical.clone());
            }
        }
        table
    }
}

/// Builder used to assemble the startup catalog.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, descriptor: AnalysisDescriptor) -> Self {
        self.registry.register(descriptor);
        self
    }

    pub fn with_preset(mut self, name: &str, members: &[&str]) -> Self {
        self.registry.register_preset(name, members);
        self
    }

    pub fn build(self) -> Registry {
        self.registry
    }
}
