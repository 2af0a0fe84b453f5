//! Serializable schema-plus-state reports.
//!
//! A settings surface that edits configuration generically needs the schema
//! (kinds, choice sets, slot names) next to the current values. Reports carry
//! both and derive `Serialize`, so a frontend can consume them as JSON.

use serde::Serialize;
use serde_json::Value;

use crate::schema::field::{Field, FieldKind};

/// Schema and current state of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    /// Field name.
    pub name: String,
    /// Kind tag: `int`, `string`, `bool`, `choice`, `list`, `tuple_list`,
    /// or `dict`.
    pub kind: &'static str,
    /// Declared default value.
    pub default: Value,
    /// Current value from the document.
    pub value: Value,
    /// Allowed values; present only for choice fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,
    /// Row slot names; present only for tuple-list fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<String>>,
}

impl FieldReport {
    /// Builds the report for `field` currently holding `value`.
    pub(crate) fn new(field: &Field, value: Value) -> Self {
        let (choices, slots) = match field.kind() {
            FieldKind::Choice { choices } => (Some(choices.clone()), None),
            FieldKind::TupleList { slots } => (None, Some(slots.clone())),
            _ => (None, None),
        };
        Self {
            name: field.name().to_string(),
            kind: field.kind().tag(),
            default: field.default_value().clone(),
            value,
            choices,
            slots,
        }
    }
}

/// Schema and current state of one module, fields in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleReport {
    /// Module name.
    pub module: String,
    /// Field reports in declaration order.
    pub fields: Vec<FieldReport>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_choice_report_carries_choices_but_no_slots() {
        let field = Field::choice("mode", vec![json!("fast"), json!("safe")], json!("safe"))
            .expect("valid choice field");
        let report = FieldReport::new(&field, json!("fast"));

        assert_eq!(report.kind, "choice");
        assert_eq!(report.choices, Some(vec![json!("fast"), json!("safe")]));
        assert_eq!(report.slots, None);
        assert_eq!(report.default, json!("safe"));
        assert_eq!(report.value, json!("fast"));
    }

    #[test]
    fn test_tuple_list_report_carries_slots_but_no_choices() {
        let field = Field::tuple_list("endpoints", &["host", "port"], Vec::new())
            .expect("valid tuple-list field");
        let report = FieldReport::new(&field, json!([["localhost", 80]]));

        assert_eq!(report.kind, "tuple_list");
        assert_eq!(report.choices, None);
        assert_eq!(
            report.slots,
            Some(vec!["host".to_string(), "port".to_string()])
        );
    }

    #[test]
    fn test_serialized_report_omits_absent_extras() {
        let field = Field::bool("enabled", true);
        let report = FieldReport::new(&field, json!(false));

        let rendered = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(
            rendered,
            json!({
                "name": "enabled",
                "kind": "bool",
                "default": true,
                "value": false,
            })
        );
    }
}
