//! Field constraint registry, the single source of truth for field constraints.
//!
//! Constraints are grouped by [`Entity`]. The built-in table is embedded at
//! compile time and parsed once per process; alternative tables can be
//! loaded from YAML but, once built, a registry is never mutated.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::{ConstraintDescriptor, Entity};

/// Embedded default constraint table.
const BUILTIN_CONSTRAINTS_YAML: &str = include_str!("builtin/constraints.yaml");

static BUILTIN_REGISTRY: OnceLock<ConstraintRegistry> = OnceLock::new();

/// Immutable mapping from `(entity, field name)` to a [`ConstraintDescriptor`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintRegistry {
    groups: HashMap<Entity, HashMap<String, ConstraintDescriptor>>,
}

impl ConstraintRegistry {
    /// The built-in registry, parsed on first use.
    pub fn builtin() -> &'static ConstraintRegistry {
        BUILTIN_REGISTRY.get_or_init(|| {
            Self::from_yaml(BUILTIN_CONSTRAINTS_YAML)
                .expect("embedded constraint table must parse")
        })
    }

    /// Build a registry from a YAML document of the form
    /// `entity -> field name -> descriptor`.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let groups: HashMap<Entity, HashMap<String, ConstraintDescriptor>> =
            serde_yaml::from_str(yaml)?;
        let registry = Self { groups };
        debug!(
            entities = registry.groups.len(),
            fields = registry.len(),
            "constraint registry loaded"
        );
        Ok(registry)
    }

    /// Build a registry from a YAML file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FieldsError::ReadTable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Resolve the descriptor for a field.
    ///
    /// With an entity, only that group is consulted: a field the entity does
    /// not declare is unconstrained even if another group declares a field of
    /// the same name. Without one, groups are scanned in [`Entity::ALL`] order
    /// and the first declaration wins.
    pub fn lookup(&self, field: &str, entity: Option<Entity>) -> Option<&ConstraintDescriptor> {
        match entity {
            Some(entity) => self.groups.get(&entity)?.get(field),
            None => Entity::ALL
                .iter()
                .filter_map(|entity| self.groups.get(entity))
                .find_map(|group| group.get(field)),
        }
    }

    /// Field names declared by an entity, sorted.
    pub fn entity_fields(&self, entity: Entity) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .groups
            .get(&entity)
            .map(|group| group.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Total number of descriptors across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;
    use std::io::Write;

    #[test]
    fn builtin_table_parses_and_covers_every_entity() {
        let registry = ConstraintRegistry::builtin();
        assert!(!registry.is_empty());
        for entity in Entity::ALL {
            assert!(
                !registry.entity_fields(entity).is_empty(),
                "no constraints declared for {entity}"
            );
        }
    }

    #[test]
    fn builtin_is_shared() {
        let a = ConstraintRegistry::builtin() as *const _;
        let b = ConstraintRegistry::builtin() as *const _;
        assert_eq!(a, b);
    }

    #[test]
    fn lookup_with_entity_is_contained() {
        let registry = ConstraintRegistry::builtin();
        assert!(registry
            .lookup("labTestName", Some(Entity::LabMaster))
            .is_some());
        assert!(registry.lookup("labTestName", Some(Entity::Patient)).is_none());
        // entity-less fallback still finds it
        assert!(registry.lookup("labTestName", None).is_some());
    }

    #[test]
    fn fallback_scan_follows_priority_order() {
        let registry = ConstraintRegistry::builtin();
        // complaint precedes labMaster in the scan
        let priority = registry.lookup("priority", None).unwrap();
        assert_eq!(priority.label, "Priority");
        let lab_priority = registry
            .lookup("priority", Some(Entity::LabMaster))
            .unwrap();
        assert_eq!(lab_priority.label, "Test Priority");
    }

    #[test]
    fn unknown_field_is_none() {
        let registry = ConstraintRegistry::builtin();
        assert!(registry.lookup("favouriteColour", None).is_none());
        assert!(registry
            .lookup("favouriteColour", Some(Entity::Patient))
            .is_none());
    }

    #[test]
    fn mobile_fields_are_ten_digit_numbers() {
        let registry = ConstraintRegistry::builtin();
        for field in ["mobile1", "mobile2"] {
            let descriptor = registry.lookup(field, Some(Entity::Patient)).unwrap();
            assert_eq!(descriptor.max_length, Some(10));
            assert!(matches!(descriptor.kind, FieldKind::Number { .. }));
        }
    }

    #[test]
    fn from_yaml_builds_custom_registry() {
        let yaml = r#"
billing:
  discount:
    label: Discount
    maxLength: 5
    kind: number
    min: 10
    max: 100
"#;
        let registry = ConstraintRegistry::from_yaml(yaml).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.entity_fields(Entity::Billing), vec!["discount"]);
        assert!(registry.entity_fields(Entity::Patient).is_empty());
        let discount = registry.lookup("discount", None).unwrap();
        assert_eq!(discount.range(), Some((10.0, 100.0)));
    }

    #[test]
    fn from_yaml_rejects_unknown_entity() {
        let yaml = "invoice:\n  total:\n    label: Total\n    kind: number\n";
        assert!(matches!(
            ConstraintRegistry::from_yaml(yaml),
            Err(FieldsError::Yaml(_))
        ));
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "visit:\n  pulse:\n    label: Pulse\n    maxLength: 3\n    kind: number"
        )
        .unwrap();
        let registry = ConstraintRegistry::from_path(file.path()).unwrap();
        assert_eq!(registry.lookup("pulse", Some(Entity::Visit)).unwrap().label, "Pulse");
    }

    #[test]
    fn from_path_missing_file() {
        let err = ConstraintRegistry::from_path(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, FieldsError::ReadTable { .. }));
    }
}
