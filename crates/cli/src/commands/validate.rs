use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;

use rescata_infra::MarketplaceConfig;
use rescata_validation::{FormInput, ValidationErrors, validate_all};

use super::{CommandResult, reference_time};

#[derive(Debug, Serialize)]
struct Report {
    valid: bool,
    errors: ValidationErrors,
}

/// Raw form values from a JSON object. Numbers and booleans are taken as
/// typed text; `null` is an empty field.
pub fn form_from_json(value: Value) -> Result<FormInput> {
    let Value::Object(map) = value else {
        bail!("form must be a JSON object of field values");
    };
    let mut input = FormInput::new();
    for (field, raw) in map {
        let text = match raw {
            Value::String(s) => s,
            Value::Null => String::new(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => bail!("field `{field}` must be a scalar, got {other}"),
        };
        input.insert(field, text);
    }
    Ok(input)
}

pub fn run(config: &MarketplaceConfig, file: &Path, now: Option<&str>) -> Result<CommandResult> {
    let today = reference_time(now)?.date_naive();
    let raw = fs::read_to_string(file).with_context(|| format!("could not read `{}`", file.display()))?;
    let value: Value = serde_json::from_str(&raw).with_context(|| format!("`{}` is not JSON", file.display()))?;
    let input = form_from_json(value)?;

    let errors = validate_all(&config.rules.rule_set(), &input, today);
    let report = Report {
        valid: errors.is_empty(),
        errors,
    };
    Ok(CommandResult {
        exit_code: if report.valid { 0 } else { 1 },
        output: serde_json::to_string_pretty(&report)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn scalars_become_text() {
        let input = form_from_json(json!({"quantity": 3, "price": 12.5, "expires_on": null})).unwrap();
        assert_eq!(input.get("quantity"), Some("3"));
        assert_eq!(input.get("price"), Some("12.5"));
        assert_eq!(input.get("expires_on"), Some(""));
    }

    #[test]
    fn nested_values_are_rejected() {
        assert!(form_from_json(json!({"name": ["a"]})).is_err());
        assert!(form_from_json(json!(["name"])).is_err());
    }

    #[test]
    fn invalid_form_exits_with_one() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "ab", "description": "Leche entera en caja", "quantity": "3", "price": "0"}}"#).unwrap();

        let result = run(&MarketplaceConfig::default(), file.path(), Some("2026-10-19T10:30:00Z")).unwrap();
        assert_eq!(result.exit_code, 1);
        let report: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(report["valid"], false);
        assert_eq!(report["errors"]["name"], "name must be between 3 and 50 characters");
        assert!(report["errors"].get("price").is_none());
    }
}
