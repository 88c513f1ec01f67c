//! Field commands: `validate`, `describe`, `fields` and `numeric`.

use clinic_fields::{
    filter_numeric_input, ConstraintDescriptor, ConstraintRegistry, Entity, FieldKind,
    FieldValidator, ValidateOptions, ValidationOutcome,
};
use comfy_table::Table;
use tracing::debug;

use crate::error::CliError;
use crate::table;

/// Exit code for a value the validator refused.
pub const EXIT_BLOCKED: i32 = 2;

/// Validate one value and print the outcome. Returns the process exit code.
pub fn run_validate(
    registry: &ConstraintRegistry,
    field: &str,
    value: &str,
    options: &ValidateOptions,
    json: bool,
) -> Result<i32, CliError> {
    let outcome = FieldValidator::new(registry).validate(field, value, options);
    debug!(field, allowed = outcome.allowed, "Validated");

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render_outcome(&outcome));
    }

    Ok(if outcome.allowed { 0 } else { EXIT_BLOCKED })
}

/// One-line human rendering of an outcome.
pub fn render_outcome(outcome: &ValidationOutcome) -> String {
    match (outcome.allowed, outcome.has_message()) {
        (true, false) => "allowed".to_string(),
        (true, true) => format!("allowed (warning: {})", outcome.message),
        (false, _) => format!("blocked: {}", outcome.message),
    }
}

/// Print the descriptor resolved for a field, as YAML.
pub fn run_describe(
    registry: &ConstraintRegistry,
    field: &str,
    entity: Option<Entity>,
) -> Result<(), CliError> {
    print!("{}", describe(registry, field, entity)?);
    Ok(())
}

pub fn describe(
    registry: &ConstraintRegistry,
    field: &str,
    entity: Option<Entity>,
) -> Result<String, CliError> {
    match registry.lookup(field, entity) {
        Some(descriptor) => Ok(serde_yaml::to_string(descriptor)?),
        None => Ok(format!("{field}: unconstrained\n")),
    }
}

/// Print the fields declared for an entity group.
pub fn run_fields(registry: &ConstraintRegistry, entity: Entity) -> Result<(), CliError> {
    let names = registry.entity_fields(entity);
    if names.is_empty() {
        println!("No fields declared for {entity}.");
        return Ok(());
    }

    println!("{} field(s) in {entity}:\n", names.len());
    println!("{}", fields_table(registry, entity));
    Ok(())
}

pub fn fields_table(registry: &ConstraintRegistry, entity: Entity) -> Table {
    let mut tbl = table::new_table();
    tbl.set_header(vec!["Field", "Label", "Kind", "Max length", "Pattern", "Range"]);

    for name in registry.entity_fields(entity) {
        let Some(descriptor) = registry.lookup(name, Some(entity)) else {
            continue;
        };
        tbl.add_row(vec![
            name.to_string(),
            descriptor.label.clone(),
            kind_name(&descriptor.kind).to_string(),
            table::or_dash(descriptor.max_length),
            table::or_dash(descriptor.pattern().map(|p| table::truncate_str(p.as_str(), 40))),
            range_cell(descriptor),
        ]);
    }
    tbl
}

fn kind_name(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Text { .. } => "text",
        FieldKind::Email { .. } => "email",
        FieldKind::TextArea { .. } => "textarea",
        FieldKind::Number { .. } => "number",
    }
}

fn range_cell(descriptor: &ConstraintDescriptor) -> String {
    table::or_dash(descriptor.range().map(|(min, max)| format!("{min}..{max}")))
}

pub fn run_numeric(value: &str, decimal: bool) {
    println!("{}", filter_numeric_input(value, decimal));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_outcome() {
        assert_eq!(render_outcome(&ValidationOutcome::accept()), "allowed");
        assert_eq!(
            render_outcome(&ValidationOutcome::warn("Invalid email format")),
            "allowed (warning: Invalid email format)"
        );
        assert_eq!(
            render_outcome(&ValidationOutcome::block("Invalid format")),
            "blocked: Invalid format"
        );
    }

    #[test]
    fn test_validate_exit_codes() {
        let registry = ConstraintRegistry::builtin();
        let options = ValidateOptions::new().entity(Entity::LabMaster);
        assert_eq!(
            run_validate(registry, "labTestName", "Lipid Profile", &options, false).unwrap(),
            0
        );
        assert_eq!(
            run_validate(registry, "labTestName", "CBC@Test", &options, true).unwrap(),
            EXIT_BLOCKED
        );
    }

    #[test]
    fn test_describe_known_field() {
        let yaml = describe(
            ConstraintRegistry::builtin(),
            "labTestName",
            Some(Entity::LabMaster),
        )
        .unwrap();
        assert!(yaml.contains("label: Lab Test Name"));
        assert!(yaml.contains("maxLength: 80"));
        assert!(yaml.contains("kind: text"));
    }

    #[test]
    fn test_describe_unknown_field() {
        let text = describe(ConstraintRegistry::builtin(), "favouriteColour", None).unwrap();
        assert_eq!(text, "favouriteColour: unconstrained\n");
    }

    #[test]
    fn test_fields_table_lists_every_field() {
        let registry = ConstraintRegistry::builtin();
        let rendered = fields_table(registry, Entity::Patient).to_string();
        for name in registry.entity_fields(Entity::Patient) {
            assert!(rendered.contains(name), "missing {name}");
        }
        assert!(rendered.contains("0..150"));
    }
}
