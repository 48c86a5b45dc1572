use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::{Analysis, AnalysisDescriptor, Finding, RunContext};
use crate::registry::Registry;

/// A composite group's active members fused into one runnable unit.
///
/// Findings produced by members are re-attributed to the pack's name, so
/// suppression directives and per-analysis caps see the group as a single
/// analysis, exactly as it was selected.
pub struct GroupPack {
    name: String,
    members: Vec<Arc<dyn Analysis>>,
}

impl GroupPack {
    fn new(name: String, members: Vec<Arc<dyn Analysis>>) -> Self {
        Self { name, members }
    }
}

impl Analysis for GroupPack {
    fn id(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &'static str {
        "Composite pack running the active members of a group as one unit"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for member in &self.members {
            let mut batch = member.check(ctx)?;
            for finding in &mut batch {
                finding.analysis = self.name.clone();
            }
            findings.append(&mut batch);
        }
        Ok(findings)
    }
}

/// Replaces every group with two or more active members by a single
/// [`GroupPack`] entry.
///
/// The pack keeps the bare group name when all members are active and the
/// form `group.{member,member}` when only a subset is, with members listed
/// in registration order. A group with exactly one active member is left
/// alone; that member runs under its own name.
pub fn coalesce(set: &mut BTreeMap<String, AnalysisDescriptor>, registry: &Registry) {
    let mut groups: Vec<String> = Vec::new();
    for descriptor in registry.all() {
        if let Some(group) = descriptor.group() {
            if !groups.iter().any(|known| known == group) {
                groups.push(group.to_string());
            }
        }
    }

    for group in groups {
        let members = registry.group_members(&group);
        let active: Vec<&AnalysisDescriptor> = members
            .iter()
            .copied()
            .filter(|member| set.contains_key(&member.name()))
            .collect();
        if active.len() < 2 {
            continue;
        }

        for member in &active {
            set.remove(&member.name());
        }

        let name = if active.len() == members.len() {
            group.clone()
        } else {
            let names: Vec<String> = active.iter().map(|member| member.name()).collect();
            format!("{}.{{{}}}", group, names.join(","))
        };

        let pack = GroupPack::new(
            name.clone(),
            active.iter().map(|member| member.analysis().clone()).collect(),
        );
        let mut descriptor = AnalysisDescriptor::enabled(Arc::new(pack));
        if active.iter().any(|member| member.is_slow()) {
            descriptor = descriptor.slow();
        }
        if active.iter().any(|member| member.needs_source_index()) {
            descriptor = descriptor.with_source_index();
        }
        set.insert(name, descriptor);
    }
}
