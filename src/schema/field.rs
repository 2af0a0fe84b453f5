//! Typed configuration field descriptors.
//!
//! A [`Field`] pairs a name and a default value with a [`FieldKind`] that
//! decides which dynamic values the field accepts. Validation is a pure
//! predicate over [`serde_json::Value`]; nothing is ever coerced.

use serde_json::Value;
use thiserror::Error;

/// Errors raised when constructing a field whose schema data can be invalid.
///
/// Only [`Field::choice`] and [`Field::tuple_list`] can fail; the other
/// constructors guarantee a valid default through their signatures.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    /// The declared default is not a member of the choice set.
    #[error("default for field {field} is not one of its declared choices")]
    DefaultNotInChoices { field: String },

    /// The choice set mixes values of different kinds.
    #[error("choice set for field {field} mixes value kinds {first} and {second}")]
    MixedChoices {
        field: String,
        first: &'static str,
        second: &'static str,
    },

    /// A default row does not match the declared tuple arity.
    #[error("default row {index} for field {field} must be a list of {expected} elements")]
    TupleRowArity {
        field: String,
        index: usize,
        expected: usize,
    },
}

/// The kind of value a [`Field`] accepts.
///
/// Kinds carrying extra schema data (the choice set, the tuple slot names)
/// keep it inside the variant, so a field is one self-describing unit.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Integer numbers (JSON numbers with no fractional part).
    Int,
    /// Text.
    String,
    /// `true` or `false`.
    Bool,
    /// Exactly one value out of a fixed, homogeneous set.
    Choice {
        /// The allowed values. All share one value kind.
        choices: Vec<Value>,
    },
    /// Arbitrary ordered sequence; elements are unconstrained.
    List,
    /// Sequence of fixed-length rows. Each slot is named for display; the
    /// slot count is the arity every row must match.
    TupleList {
        /// One name per row position.
        slots: Vec<String>,
    },
    /// Arbitrary mapping; keys and values are unconstrained.
    Dict,
}

impl FieldKind {
    /// Returns the stable lowercase tag naming this kind, as used in reports
    /// and error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Int => "int",
            FieldKind::String => "string",
            FieldKind::Bool => "bool",
            FieldKind::Choice { .. } => "choice",
            FieldKind::List => "list",
            FieldKind::TupleList { .. } => "tuple_list",
            FieldKind::Dict => "dict",
        }
    }
}

/// Names the kind of an arbitrary dynamic value, for diagnostics.
///
/// Numbers split into `int` and `float` because integer fields reject
/// fractional values and error messages must say which kind was offered.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// A named, typed configuration slot with a default value.
///
/// Invariant: the default always satisfies [`Field::accepts`]. The infallible
/// constructors guarantee this through their parameter types; [`Field::choice`]
/// and [`Field::tuple_list`] check it and fail instead of constructing.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    default: Value,
    kind: FieldKind,
}

impl Field {
    /// Creates an integer field.
    pub fn int(name: impl Into<String>, default: i64) -> Self {
        Self {
            name: name.into(),
            default: Value::from(default),
            kind: FieldKind::Int,
        }
    }

    /// Creates a text field.
    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Value::from(default.into()),
            kind: FieldKind::String,
        }
    }

    /// Creates a boolean field.
    pub fn bool(name: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            default: Value::from(default),
            kind: FieldKind::Bool,
        }
    }

    /// Creates a list field. Elements are unconstrained, including mixed
    /// kinds within one list.
    pub fn list(name: impl Into<String>, default: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            default: Value::Array(default),
            kind: FieldKind::List,
        }
    }

    /// Creates a dictionary field. Keys and values are unconstrained.
    pub fn dict(name: impl Into<String>, default: serde_json::Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            default: Value::Object(default),
            kind: FieldKind::Dict,
        }
    }

    /// Creates a choice field restricted to a fixed, homogeneous value set.
    ///
    /// Membership is exact equality, never coercive: the integer `1` does not
    /// match the float `1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::MixedChoices`] when the choices do not all share
    /// one value kind, and [`FieldError::DefaultNotInChoices`] when `default`
    /// is not a member of the set (an empty set therefore always fails).
    pub fn choice(
        name: impl Into<String>,
        choices: Vec<Value>,
        default: Value,
    ) -> Result<Self, FieldError> {
        let name = name.into();

        if let Some(first) = choices.first() {
            let first_kind = value_kind(first);
            for candidate in &choices[1..] {
                let candidate_kind = value_kind(candidate);
                if candidate_kind != first_kind {
                    return Err(FieldError::MixedChoices {
                        field: name,
                        first: first_kind,
                        second: candidate_kind,
                    });
                }
            }
        }
        if !choices.contains(&default) {
            return Err(FieldError::DefaultNotInChoices { field: name });
        }

        Ok(Self {
            name,
            default,
            kind: FieldKind::Choice { choices },
        })
    }

    /// Creates a tuple-list field whose rows must have one element per slot.
    ///
    /// `slots` names each row position for display purposes; only the slot
    /// count is enforced. Row elements themselves are unconstrained.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::TupleRowArity`] if any default row is not a list
    /// of exactly `slots.len()` elements.
    pub fn tuple_list(
        name: impl Into<String>,
        slots: &[&str],
        default: Vec<Value>,
    ) -> Result<Self, FieldError> {
        let name = name.into();

        for (index, row) in default.iter().enumerate() {
            match row {
                Value::Array(elements) if elements.len() == slots.len() => {}
                _ => {
                    return Err(FieldError::TupleRowArity {
                        field: name,
                        index,
                        expected: slots.len(),
                    });
                }
            }
        }

        Ok(Self {
            name,
            default: Value::Array(default),
            kind: FieldKind::TupleList {
                slots: slots.iter().map(|slot| slot.to_string()).collect(),
            },
        })
    }

    /// The field name, unique within its module.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of value this field accepts.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The declared default value.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Returns `true` if `value` satisfies this field's kind contract.
    ///
    /// Purely functional: no coercion, no side effects. `null` satisfies no
    /// kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.kind {
            FieldKind::Int => matches!(value, Value::Number(n) if n.is_i64() || n.is_u64()),
            FieldKind::String => value.is_string(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Choice { choices } => choices.contains(value),
            FieldKind::List => value.is_array(),
            FieldKind::TupleList { slots } => match value {
                Value::Array(rows) => rows
                    .iter()
                    .all(|row| matches!(row, Value::Array(elements) if elements.len() == slots.len())),
                _ => false,
            },
            FieldKind::Dict => value.is_object(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn one_field_per_kind() -> Vec<Field> {
        vec![
            Field::int("retries", 3),
            Field::string("label", "untitled"),
            Field::bool("enabled", true),
            Field::choice("mode", vec![json!("fast"), json!("safe")], json!("safe"))
                .expect("valid choice field"),
            Field::list("tags", vec![json!("a"), json!(1)]),
            Field::tuple_list("endpoints", &["host", "port"], vec![json!(["localhost", 80])])
                .expect("valid tuple-list field"),
            Field::dict("extras", serde_json::Map::new()),
        ]
    }

    // ── Construction invariant ────────────────────────────────────────────────

    #[test]
    fn test_every_kind_default_satisfies_its_own_predicate() {
        for field in one_field_per_kind() {
            assert!(
                field.accepts(field.default_value()),
                "default of {} field {:?} must pass its own validation",
                field.kind().tag(),
                field.name(),
            );
        }
    }

    #[test]
    fn test_no_kind_accepts_null() {
        for field in one_field_per_kind() {
            assert!(
                !field.accepts(&Value::Null),
                "{} field must reject null",
                field.kind().tag(),
            );
        }
    }

    // ── Int ───────────────────────────────────────────────────────────────────

    #[test]
    fn test_int_field_accepts_integers_of_either_sign() {
        let field = Field::int("offset", 0);
        assert!(field.accepts(&json!(42)));
        assert!(field.accepts(&json!(-42)));
    }

    #[test]
    fn test_int_field_rejects_floats_strings_and_bools() {
        let field = Field::int("offset", 0);
        assert!(!field.accepts(&json!(1.5)));
        assert!(!field.accepts(&json!("42")));
        assert!(!field.accepts(&json!(true)));
    }

    // ── String / Bool ─────────────────────────────────────────────────────────

    #[test]
    fn test_string_field_rejects_non_text_values() {
        let field = Field::string("label", "x");
        assert!(field.accepts(&json!("hello")));
        assert!(!field.accepts(&json!(5)));
        assert!(!field.accepts(&json!(false)));
    }

    #[test]
    fn test_bool_field_rejects_truthy_lookalikes() {
        let field = Field::bool("enabled", false);
        assert!(field.accepts(&json!(true)));
        assert!(field.accepts(&json!(false)));
        assert!(!field.accepts(&json!(0)));
        assert!(!field.accepts(&json!("true")));
    }

    // ── Choice ────────────────────────────────────────────────────────────────

    #[test]
    fn test_choice_field_accepts_members_and_rejects_outsiders() {
        let field = Field::choice("mode", vec![json!("fast"), json!("safe")], json!("fast"))
            .expect("valid choice field");
        assert!(field.accepts(&json!("safe")));
        assert!(!field.accepts(&json!("medium")));
    }

    #[test]
    fn test_choice_field_membership_is_exact_not_coercive() {
        let field = Field::choice("level", vec![json!(1), json!(2), json!(3)], json!(2))
            .expect("valid choice field");
        assert!(field.accepts(&json!(2)));
        // 2.0 is a float, not the integer 2
        assert!(!field.accepts(&json!(2.0)));
    }

    #[test]
    fn test_choice_field_rejects_mixed_kind_choice_set() {
        let err = Field::choice("mode", vec![json!("fast"), json!(2)], json!("fast"))
            .expect_err("mixed choice set must be rejected");
        assert_eq!(
            err,
            FieldError::MixedChoices {
                field: "mode".to_string(),
                first: "string",
                second: "int",
            }
        );
    }

    #[test]
    fn test_choice_field_rejects_default_outside_choice_set() {
        let err = Field::choice("mode", vec![json!("fast"), json!("safe")], json!("medium"))
            .expect_err("default outside set must be rejected");
        assert_eq!(
            err,
            FieldError::DefaultNotInChoices {
                field: "mode".to_string(),
            }
        );
    }

    #[test]
    fn test_choice_field_rejects_empty_choice_set() {
        let err = Field::choice("mode", Vec::new(), json!("anything"))
            .expect_err("empty set can contain no default");
        assert!(matches!(err, FieldError::DefaultNotInChoices { .. }));
    }

    // ── List / Dict ───────────────────────────────────────────────────────────

    #[test]
    fn test_list_field_accepts_mixed_element_kinds() {
        let field = Field::list("tags", Vec::new());
        assert!(field.accepts(&json!(["a", 1, true, null])));
        assert!(!field.accepts(&json!({"not": "a list"})));
    }

    #[test]
    fn test_dict_field_accepts_nested_mappings() {
        let field = Field::dict("extras", serde_json::Map::new());
        assert!(field.accepts(&json!({"a": {"b": [1, 2]}})));
        assert!(!field.accepts(&json!([1, 2])));
    }

    // ── TupleList ─────────────────────────────────────────────────────────────

    #[test]
    fn test_tuple_list_field_accepts_rows_matching_slot_count() {
        let field = Field::tuple_list("endpoints", &["host", "port"], Vec::new())
            .expect("valid tuple-list field");
        assert!(field.accepts(&json!([["localhost", 80], ["example.org", 443]])));
        assert!(field.accepts(&json!([])));
    }

    #[test]
    fn test_tuple_list_field_rejects_rows_with_wrong_arity() {
        let field = Field::tuple_list("endpoints", &["host", "port"], Vec::new())
            .expect("valid tuple-list field");
        assert!(!field.accepts(&json!([["localhost"]])));
        assert!(!field.accepts(&json!([["localhost", 80, "extra"]])));
    }

    #[test]
    fn test_tuple_list_field_rejects_non_list_rows_and_non_list_values() {
        let field = Field::tuple_list("endpoints", &["host", "port"], Vec::new())
            .expect("valid tuple-list field");
        assert!(!field.accepts(&json!(["not a row"])));
        assert!(!field.accepts(&json!("not even a list")));
    }

    #[test]
    fn test_tuple_list_field_leaves_row_element_kinds_unconstrained() {
        let field = Field::tuple_list("endpoints", &["host", "port"], Vec::new())
            .expect("valid tuple-list field");
        // Mixed element kinds per row; only the arity is checked.
        assert!(field.accepts(&json!([["localhost", 80], [1, "eighty"]])));
    }

    #[test]
    fn test_tuple_list_constructor_rejects_default_row_with_wrong_arity() {
        let err = Field::tuple_list(
            "endpoints",
            &["host", "port"],
            vec![json!(["localhost", 80]), json!(["lonely"])],
        )
        .expect_err("short row must be rejected");
        assert_eq!(
            err,
            FieldError::TupleRowArity {
                field: "endpoints".to_string(),
                index: 1,
                expected: 2,
            }
        );
    }

    #[test]
    fn test_tuple_list_constructor_rejects_non_list_default_row() {
        let err = Field::tuple_list("endpoints", &["host", "port"], vec![json!("oops")])
            .expect_err("non-list row must be rejected");
        assert!(matches!(err, FieldError::TupleRowArity { index: 0, .. }));
    }

    // ── Kind tags ─────────────────────────────────────────────────────────────

    #[test]
    fn test_kind_tags_are_stable() {
        let tags: Vec<&str> = one_field_per_kind()
            .iter()
            .map(|field| field.kind().tag())
            .collect();
        assert_eq!(
            tags,
            vec!["int", "string", "bool", "choice", "list", "tuple_list", "dict"]
        );
    }

    #[test]
    fn test_value_kind_distinguishes_int_from_float() {
        assert_eq!(value_kind(&json!(1)), "int");
        assert_eq!(value_kind(&json!(1.0)), "float");
        assert_eq!(value_kind(&json!(null)), "null");
        assert_eq!(value_kind(&json!({"k": "v"})), "dict");
    }
}
