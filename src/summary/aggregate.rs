//! Plan aggregation.
//!
//! One pass over the plan's resource changes produces three independent
//! tallies: per action key, per (service, action key), and per (module,
//! action key). The result type is immutable after construction; every
//! rendering mode reads from the same tallies.

use std::collections::BTreeMap;

use crate::plan::{ActionKey, Plan};

use super::service::service_name;

/// Aggregated change counts for one plan.
///
/// All three maps are keyed by immutable composite keys and iterate in a
/// deterministic order, so repeated summarization of the same plan yields
/// byte-identical reports.
#[derive(Debug, Default)]
pub struct PlanSummary {
    /// Count per action key across the whole plan.
    by_action: BTreeMap<ActionKey, u64>,
    /// Count per (service name, action key) pair.
    by_service: BTreeMap<(String, ActionKey), u64>,
    /// Count per (module address, action key) pair.
    by_module: BTreeMap<(String, ActionKey), u64>,
}

/// One group of action rows under a service or module heading.
#[derive(Debug)]
pub struct GroupedTally<'a> {
    /// Service or module name.
    pub name: &'a str,
    /// Total changes in this group.
    pub total: u64,
    /// Action rows, in lexical action-key order.
    pub rows: Vec<(&'a ActionKey, u64)>,
}

impl PlanSummary {
    /// Classifies every change in the plan and builds the three tallies.
    #[must_use]
    pub fn from_plan(plan: &Plan) -> Self {
        let mut summary = Self::default();

        for change in &plan.resource_changes {
            let key = change.action_key();
            let service = service_name(&change.resource_type).to_string();
            let module = change.module_or_root().to_string();

            *summary.by_action.entry(key.clone()).or_insert(0) += 1;
            *summary
                .by_service
                .entry((service, key.clone()))
                .or_insert(0) += 1;
            *summary.by_module.entry((module, key)).or_insert(0) += 1;
        }

        summary
    }

    /// Total number of planned changes.
    #[must_use]
    pub fn total_changes(&self) -> u64 {
        self.by_action.values().sum()
    }

    /// Returns true if the plan contained no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_action.is_empty()
    }

    /// The per-action-key tally.
    #[must_use]
    pub const fn by_action(&self) -> &BTreeMap<ActionKey, u64> {
        &self.by_action
    }

    /// Overall changes ordered for display: descending count, ties broken
    /// by lexical order of the action key.
    #[must_use]
    pub fn overall_sorted(&self) -> Vec<(&ActionKey, u64)> {
        let mut entries: Vec<(&ActionKey, u64)> =
            self.by_action.iter().map(|(key, count)| (key, *count)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Per-service groups in ascending service-name order.
    #[must_use]
    pub fn services(&self) -> Vec<GroupedTally<'_>> {
        Self::grouped(&self.by_service)
    }

    /// Per-module groups in ascending module-address order.
    #[must_use]
    pub fn modules(&self) -> Vec<GroupedTally<'_>> {
        Self::grouped(&self.by_module)
    }

    /// Folds a composite-key tally into named groups.
    ///
    /// The map iterates sorted by (name, action key), so groups come out in
    /// ascending name order and each group's rows in lexical key order.
    fn grouped(map: &BTreeMap<(String, ActionKey), u64>) -> Vec<GroupedTally<'_>> {
        let mut groups: Vec<GroupedTally<'_>> = Vec::new();

        for ((name, key), count) in map {
            let name = name.as_str();
            if groups.last().is_none_or(|group| group.name != name) {
                groups.push(GroupedTally {
                    name,
                    total: 0,
                    rows: Vec::new(),
                });
            }
            if let Some(group) = groups.last_mut() {
                group.total += count;
                group.rows.push((key, *count));
            }
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Action, Change, ResourceChange};

    fn change(resource_type: &str, module: Option<&str>, actions: &[Action]) -> ResourceChange {
        ResourceChange {
            resource_type: resource_type.to_string(),
            module_address: module.map(String::from),
            change: Change {
                actions: actions.to_vec(),
            },
        }
    }

    fn sample_plan() -> Plan {
        Plan::new(vec![
            change("aws_instance", Some("module.network"), &[Action::Create]),
            change("aws_subnet", Some("module.network"), &[Action::Update]),
            change("aws_s3_bucket", None, &[Action::Delete]),
            change(
                "aws_s3_bucket",
                None,
                &[Action::Create, Action::Delete],
            ),
        ])
    }

    #[test]
    fn test_counts_conserved_across_dimensions() {
        let plan = sample_plan();
        let summary = PlanSummary::from_plan(&plan);

        let total = summary.total_changes();
        assert_eq!(total, plan.len() as u64);
        assert_eq!(summary.by_action().values().sum::<u64>(), total);
        assert_eq!(
            summary.services().iter().map(|g| g.total).sum::<u64>(),
            total
        );
        assert_eq!(
            summary.modules().iter().map(|g| g.total).sum::<u64>(),
            total
        );
    }

    #[test]
    fn test_module_totals() {
        let plan = Plan::new(vec![
            change("aws_instance", Some("network"), &[Action::Create]),
            change("aws_subnet", Some("network"), &[Action::Update]),
            change("aws_s3_bucket", None, &[Action::Delete]),
        ]);
        let summary = PlanSummary::from_plan(&plan);

        let modules = summary.modules();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].name, "network");
        assert_eq!(modules[0].total, 2);
        assert_eq!(modules[1].name, "root");
        assert_eq!(modules[1].total, 1);
    }

    #[test]
    fn test_service_grouping() {
        let summary = PlanSummary::from_plan(&sample_plan());
        let services = summary.services();

        // ec2 (instance), s3 (bucket x2), vpc (subnet), ascending
        let names: Vec<&str> = services.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["ec2", "s3", "vpc"]);

        let s3 = &services[1];
        assert_eq!(s3.total, 2);
        assert_eq!(s3.rows.len(), 2);
    }

    #[test]
    fn test_overall_sorted_desc_count_then_lexical() {
        let plan = Plan::new(vec![
            change("aws_instance", None, &[Action::Update]),
            change("aws_subnet", None, &[Action::Update]),
            change("aws_s3_bucket", None, &[Action::Create]),
            change("aws_kms_key", None, &[Action::Delete]),
        ]);
        let summary = PlanSummary::from_plan(&plan);

        let overall = summary.overall_sorted();
        assert_eq!(overall[0].0.canonical(), "update");
        assert_eq!(overall[0].1, 2);
        // tie between create and delete broken lexically
        assert_eq!(overall[1].0.canonical(), "create");
        assert_eq!(overall[2].0.canonical(), "delete");
    }

    #[test]
    fn test_replace_variants_are_distinct_keys() {
        let plan = Plan::new(vec![
            change("aws_s3_bucket", None, &[Action::Create, Action::Delete]),
            change("aws_s3_bucket", None, &[Action::Delete, Action::Create]),
        ]);
        let summary = PlanSummary::from_plan(&plan);

        assert_eq!(summary.by_action().len(), 2);
        assert_eq!(summary.total_changes(), 2);
    }

    #[test]
    fn test_empty_plan() {
        let summary = PlanSummary::from_plan(&Plan::default());
        assert!(summary.is_empty());
        assert_eq!(summary.total_changes(), 0);
        assert!(summary.services().is_empty());
        assert!(summary.modules().is_empty());
    }
}
