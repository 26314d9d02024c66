//! Decides which columns collapse into shared Blueprint calls.

use tablecraft_config::{GlobalConfig, SOFT_DELETE_COLUMNS, TIMESTAMP_COLUMNS};
use tablecraft_schema::Column;

/// A set of columns replaced by one Blueprint call.
///
/// Groups are checked in declaration order; a column listed by several
/// enabled groups belongs to the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharedGroup {
    /// Configured common fields, `$table->commonFields()`
    Common,
    /// `created_at` + `updated_at`, `$table->timestamps()`
    Timestamps,
    /// `deleted_at`, `$table->softDeletes()`
    SoftDeletes,
}

impl SharedGroup {
    pub const ALL: [SharedGroup; 3] = [
        SharedGroup::Common,
        SharedGroup::Timestamps,
        SharedGroup::SoftDeletes,
    ];

    /// Blueprint method name.
    pub fn call(&self) -> &'static str {
        match self {
            SharedGroup::Common => "commonFields",
            SharedGroup::Timestamps => "timestamps",
            SharedGroup::SoftDeletes => "softDeletes",
        }
    }

    fn toggle(&self, global: &GlobalConfig) -> bool {
        match self {
            SharedGroup::Common => global.use_common_fields,
            SharedGroup::Timestamps => global.use_timestamps,
            SharedGroup::SoftDeletes => global.use_soft_deletes,
        }
    }
}

/// One line of a table definition, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanItem<'a> {
    Column(&'a Column),
    Shared(SharedGroup),
}

/// Per-table layout of columns and shared calls.
#[derive(Debug, Clone)]
pub struct SharedFieldPlan<'a> {
    items: Vec<PlanItem<'a>>,
    /// Enabled groups with their member columns
    groups: Vec<(SharedGroup, Vec<String>)>,
    active: Vec<SharedGroup>,
}

impl<'a> SharedFieldPlan<'a> {
    pub fn classify(columns: &'a [Column], global: &GlobalConfig) -> Self {
        let common = global.common_fields();

        let candidates: Vec<(SharedGroup, Vec<String>)> = SharedGroup::ALL
            .into_iter()
            .filter(|group| group.toggle(global))
            .map(|group| {
                let members: Vec<String> = match group {
                    SharedGroup::Common => common
                        .column_names()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                    SharedGroup::Timestamps => {
                        TIMESTAMP_COLUMNS.iter().map(|c| c.to_string()).collect()
                    }
                    SharedGroup::SoftDeletes => {
                        SOFT_DELETE_COLUMNS.iter().map(|c| c.to_string()).collect()
                    }
                };
                (group, members)
            })
            .collect();

        // A column stays with the first group listing it; groups left
        // without members are dropped.
        let mut groups: Vec<(SharedGroup, Vec<String>)> = Vec::new();
        for (group, members) in candidates {
            let members: Vec<String> = members
                .into_iter()
                .filter(|m| !groups.iter().any(|(_, claimed)| claimed.contains(m)))
                .collect();
            if !members.is_empty() {
                groups.push((group, members));
            }
        }

        let mut plan = Self {
            items: Vec::with_capacity(columns.len()),
            groups,
            active: Vec::new(),
        };

        let present: Vec<SharedGroup> = columns
            .iter()
            .filter_map(|c| plan.owner(&c.name))
            .collect();
        plan.active = plan
            .groups
            .iter()
            .map(|(group, _)| *group)
            .filter(|group| global.force_shared_fields || present.contains(group))
            .collect();

        let mut emitted: Vec<SharedGroup> = Vec::new();
        for column in columns {
            match plan.owner(&column.name).filter(|g| plan.is_active(*g)) {
                Some(group) if emitted.contains(&group) => {}
                Some(group) => {
                    emitted.push(group);
                    plan.items.push(PlanItem::Shared(group));
                }
                None => plan.items.push(PlanItem::Column(column)),
            }
        }

        // Forced groups without any member in the table go last
        for group in plan.active.clone() {
            if !emitted.contains(&group) {
                plan.items.push(PlanItem::Shared(group));
            }
        }

        plan
    }

    /// Columns and shared calls in emission order.
    pub fn items(&self) -> &[PlanItem<'a>] {
        &self.items
    }

    pub fn is_active(&self, group: SharedGroup) -> bool {
        self.active.contains(&group)
    }

    /// Whether `column` is emitted through an active shared call.
    pub fn covers(&self, column: &str) -> bool {
        self.owner(column).is_some_and(|g| self.is_active(g))
    }

    /// Whether `column` exists in the table but is not emitted on its own.
    pub fn suppresses(&self, column: &Column) -> bool {
        self.covers(&column.name)
    }

    /// Every column the active shared calls define, in group order.
    pub fn added_columns(&self) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|(group, _)| self.is_active(*group))
            .flat_map(|(group, members)| {
                members
                    .iter()
                    .filter(move |m| self.owner(m) == Some(*group))
                    .map(String::as_str)
            })
            .collect()
    }

    fn owner(&self, column: &str) -> Option<SharedGroup> {
        self.groups
            .iter()
            .find(|(_, members)| members.iter().any(|m| m == column))
            .map(|(group, _)| *group)
    }
}

#[cfg(test)]
mod tests {
    use tablecraft_config::Config;
    use tablecraft_schema::{RawColumn, normalize};

    use super::*;

    fn columns(names: &[&str]) -> Vec<Column> {
        names
            .iter()
            .map(|name| {
                normalize(&RawColumn {
                    name: name.to_string(),
                    native_type: "int".to_string(),
                    ..Default::default()
                })
            })
            .collect()
    }

    fn global(src: &str) -> GlobalConfig {
        src.parse::<Config>().unwrap().global
    }

    fn render(plan: &SharedFieldPlan<'_>) -> Vec<String> {
        plan.items()
            .iter()
            .map(|item| match item {
                PlanItem::Column(c) => c.name.clone(),
                PlanItem::Shared(g) => format!("{}()", g.call()),
            })
            .collect()
    }

    #[test]
    fn test_disabled_groups_keep_every_column() {
        let cols = columns(&["id", "created_at", "updated_at", "deleted_at"]);
        let plan = SharedFieldPlan::classify(&cols, &GlobalConfig::default());

        assert_eq!(render(&plan), vec!["id", "created_at", "updated_at", "deleted_at"]);
        assert!(!plan.covers("created_at"));
        assert!(plan.added_columns().is_empty());
    }

    #[test]
    fn test_timestamps_collapse_at_first_member() {
        let cols = columns(&["id", "created_at", "name", "updated_at"]);
        let plan = SharedFieldPlan::classify(&cols, &global("[global]\nuse_timestamps = true\n"));

        assert_eq!(render(&plan), vec!["id", "timestamps()", "name"]);
        assert!(plan.is_active(SharedGroup::Timestamps));
        assert!(plan.suppresses(&cols[3]));
        assert!(!plan.suppresses(&cols[2]));
    }

    #[test]
    fn test_absent_group_is_inactive_unless_forced() {
        let cols = columns(&["id", "name"]);

        let plan = SharedFieldPlan::classify(
            &cols,
            &global("[global]\nuse_timestamps = true\nuse_soft_deletes = true\n"),
        );
        assert_eq!(render(&plan), vec!["id", "name"]);

        let plan = SharedFieldPlan::classify(
            &cols,
            &global(
                "[global]\nuse_timestamps = true\nuse_soft_deletes = true\nforce_shared_fields = true\n",
            ),
        );
        assert_eq!(render(&plan), vec!["id", "name", "timestamps()", "softDeletes()"]);
        assert_eq!(
            plan.added_columns(),
            vec!["created_at", "updated_at", "deleted_at"]
        );
    }

    #[test]
    fn test_common_fields_claim_columns_first() {
        let cols = columns(&["id", "created_by", "created_at", "updated_at", "deleted_at"]);
        let global = global(
            r#"
            [global]
            use_common_fields = true
            use_timestamps = true
            use_soft_deletes = true

            [[global.common_fields]]
            name = "created_by"
            type = "bigInteger"

            [[global.common_fields]]
            type = "timestamps"
            "#,
        );
        let plan = SharedFieldPlan::classify(&cols, &global);

        assert_eq!(render(&plan), vec!["id", "commonFields()", "softDeletes()"]);
        assert!(plan.is_active(SharedGroup::Common));
        assert!(!plan.is_active(SharedGroup::Timestamps));
        assert_eq!(
            plan.added_columns(),
            vec!["created_by", "created_at", "updated_at", "deleted_at"]
        );
    }

    #[test]
    fn test_forced_groups_claimed_by_common_fields_are_dropped() {
        let cols = columns(&["id", "name"]);
        let global = global(
            r#"
            [global]
            use_common_fields = true
            use_timestamps = true
            use_soft_deletes = true
            force_shared_fields = true

            [[global.common_fields]]
            name = "created_by"
            type = "bigInteger"

            [[global.common_fields]]
            type = "timestamps"

            [[global.common_fields]]
            type = "softDeletes"
            "#,
        );

        let plan = SharedFieldPlan::classify(&cols, &global);
        assert_eq!(render(&plan), vec!["id", "name", "commonFields()"]);
        assert!(!plan.is_active(SharedGroup::Timestamps));
        assert!(!plan.is_active(SharedGroup::SoftDeletes));
        assert_eq!(
            plan.added_columns(),
            vec!["created_by", "created_at", "updated_at", "deleted_at"]
        );
    }

    #[test]
    fn test_forced_enum_group_without_collision() {
        let cols = columns(&["id"]);
        let global = global(
            r#"
            [global]
            use_common_fields = true
            force_shared_fields = true

            [[global.common_fields]]
            name = "status"
            type = "enum"
            enum_values = ["draft", "published"]
            "#,
        );
        let plan = SharedFieldPlan::classify(&cols, &global);

        assert_eq!(render(&plan), vec!["id", "commonFields()"]);
        assert!(plan.covers("status"));
    }

    #[test]
    fn test_empty_common_group_is_never_emitted() {
        let cols = columns(&["id"]);
        let global = global("[global]\nuse_common_fields = true\nforce_shared_fields = true\n");
        let plan = SharedFieldPlan::classify(&cols, &global);

        assert_eq!(render(&plan), vec!["id"]);
        assert!(!plan.is_active(SharedGroup::Common));
    }
}
