//! Request validation for the product routes.
//!
//! Every field owns an ordered chain of rules. All chains run, and within a chain every
//! rule is evaluated against the raw value, so one field can contribute several errors.
//! Errors are reported in declaration order: path id first, then body fields.

use crate::domain::product::{NewProduct, ProductChanges};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use utoipa::ToSchema;

pub const MSG_NAME_EMPTY: &str = "name must not be empty";
pub const MSG_PRICE_NOT_NUMBER: &str = "value must be a number";
pub const MSG_PRICE_EMPTY: &str = "price must not be empty";
pub const MSG_PRICE_INVALID: &str = "invalid price, must be greater than 0";
pub const MSG_INVALID_ID: &str = "invalid ID";
pub const MSG_INVALID_AVAILABILITY: &str = "invalid availability value";

/// Where the offending value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Body,
    Params,
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    /// Always `"field"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The raw value that failed, omitted when the field was missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub value: Option<JsonValue>,
    pub msg: String,
    /// Name of the field or path parameter.
    pub path: String,
    pub location: Location,
}

/// The accumulated failures of one request. Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} validation error(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.msg.as_str()).collect()
    }
}

/// A path id that passed the integer check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathId {
    Key(i64),
    /// Well-formed digits that do not fit an `i64`. No stored product can have such an id.
    OutOfRange,
}

impl PathId {
    pub fn key(self) -> Option<i64> {
        match self {
            PathId::Key(id) => Some(id),
            PathId::OutOfRange => None,
        }
    }
}

struct Rule {
    check: fn(Option<&JsonValue>) -> bool,
    msg: &'static str,
}

struct FieldChain {
    field: &'static str,
    rules: &'static [Rule],
}

const NAME: FieldChain = FieldChain {
    field: "name",
    rules: &[Rule {
        check: is_not_empty,
        msg: MSG_NAME_EMPTY,
    }],
};

const PRICE: FieldChain = FieldChain {
    field: "price",
    rules: &[
        Rule {
            check: is_numeric,
            msg: MSG_PRICE_NOT_NUMBER,
        },
        Rule {
            check: is_not_empty,
            msg: MSG_PRICE_EMPTY,
        },
        Rule {
            check: is_positive,
            msg: MSG_PRICE_INVALID,
        },
    ],
};

const AVAILABILITY: FieldChain = FieldChain {
    field: "availability",
    rules: &[Rule {
        check: is_boolean,
        msg: MSG_INVALID_AVAILABILITY,
    }],
};

const CREATE_BODY: &[FieldChain] = &[NAME, PRICE];
const REPLACE_BODY: &[FieldChain] = &[NAME, PRICE, AVAILABILITY];

/// Validates `POST /api/products`.
pub fn validate_create(body: &JsonValue) -> Result<NewProduct, ValidationErrors> {
    let mut errors = Vec::new();
    run_body(CREATE_BODY, body, &mut errors);
    finish(errors)?;

    Ok(NewProduct {
        name: coerce_text(field(body, "name")),
        price: loose_number(field(body, "price")),
    })
}

/// Validates `PUT /api/products/:id`: the path id, then the full replacement body.
pub fn validate_replace(
    raw_id: &str,
    body: &JsonValue,
) -> Result<(PathId, ProductChanges), ValidationErrors> {
    let mut errors = Vec::new();
    let id = check_id(raw_id, &mut errors);
    run_body(REPLACE_BODY, body, &mut errors);
    finish(errors)?;

    let changes = ProductChanges {
        name: coerce_text(field(body, "name")),
        price: loose_number(field(body, "price")),
        availability: coerce_bool(field(body, "availability")),
    };
    // `check_id` only yields `None` after pushing an error, so `finish` already returned.
    Ok((id.unwrap_or(PathId::OutOfRange), changes))
}

/// Validates the `:id` path parameter of the read, toggle and delete routes.
pub fn validate_id(raw_id: &str) -> Result<PathId, ValidationErrors> {
    let mut errors = Vec::new();
    let id = check_id(raw_id, &mut errors);
    finish(errors)?;
    Ok(id.unwrap_or(PathId::OutOfRange))
}

fn finish(errors: Vec<FieldError>) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn field<'a>(body: &'a JsonValue, name: &str) -> Option<&'a JsonValue> {
    body.as_object().and_then(|obj| obj.get(name))
}

fn run_body(chains: &[FieldChain], body: &JsonValue, errors: &mut Vec<FieldError>) {
    for chain in chains {
        let value = field(body, chain.field);
        for rule in chain.rules {
            if !(rule.check)(value) {
                errors.push(FieldError {
                    kind: "field".to_string(),
                    value: value.cloned(),
                    msg: rule.msg.to_string(),
                    path: chain.field.to_string(),
                    location: Location::Body,
                });
            }
        }
    }
}

fn check_id(raw: &str, errors: &mut Vec<FieldError>) -> Option<PathId> {
    if !is_int_literal(raw) {
        errors.push(FieldError {
            kind: "field".to_string(),
            value: Some(JsonValue::from(raw)),
            msg: MSG_INVALID_ID.to_string(),
            path: "id".to_string(),
            location: Location::Params,
        });
        return None;
    }
    Some(match raw.parse::<i64>() {
        Ok(id) => PathId::Key(id),
        Err(_) => PathId::OutOfRange,
    })
}

/// String form used by the emptiness and syntax checks. Missing and `null` read as `""`.
fn string_form(value: Option<&JsonValue>) -> Cow<'_, str> {
    match value {
        None | Some(JsonValue::Null) => Cow::Borrowed(""),
        Some(JsonValue::String(s)) => Cow::Borrowed(s.as_str()),
        Some(JsonValue::Bool(b)) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Some(JsonValue::Number(n)) => Cow::Owned(n.to_string()),
        Some(JsonValue::Array(items)) => Cow::Owned(
            items
                .iter()
                .map(|item| string_form(Some(item)).into_owned())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(JsonValue::Object(_)) => Cow::Borrowed("[object Object]"),
    }
}

fn is_not_empty(value: Option<&JsonValue>) -> bool {
    !string_form(value).is_empty()
}

fn is_numeric(value: Option<&JsonValue>) -> bool {
    match value {
        Some(JsonValue::Number(_)) => true,
        Some(JsonValue::String(s)) => is_decimal_literal(s),
        _ => false,
    }
}

// Overflowing literals read as infinity, which has no JSON form.
fn is_positive(value: Option<&JsonValue>) -> bool {
    let n = loose_number(value);
    n.is_finite() && n > 0.0
}

fn is_boolean(value: Option<&JsonValue>) -> bool {
    matches!(&*string_form(value), "true" | "false" | "1" | "0")
}

/// `[+-]?([0-9]*\.)?[0-9]+`
fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => ("", unsigned),
    };
    int_part.chars().all(|c| c.is_ascii_digit())
        && !frac_part.is_empty()
        && frac_part.chars().all(|c| c.is_ascii_digit())
}

/// `[+-]?[0-9]+`
fn is_int_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Loose numeric coercion: blank strings, `null` and `false` are 0, `true` is 1,
/// anything that does not read as a number is NaN.
fn loose_number(value: Option<&JsonValue>) -> f64 {
    match value {
        None => f64::NAN,
        Some(JsonValue::Null) => 0.0,
        Some(JsonValue::Bool(b)) => f64::from(u8::from(*b)),
        Some(JsonValue::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(JsonValue::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else if s
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
            {
                s.parse::<f64>().unwrap_or(f64::NAN)
            } else {
                f64::NAN
            }
        }
        Some(JsonValue::Array(_)) | Some(JsonValue::Object(_)) => f64::NAN,
    }
}

fn coerce_text(value: Option<&JsonValue>) -> String {
    match value {
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn coerce_bool(value: Option<&JsonValue>) -> bool {
    matches!(&*string_form(value), "true" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_errors(body: JsonValue) -> Vec<String> {
        match validate_create(&body) {
            Ok(_) => Vec::new(),
            Err(e) => e.messages().into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn create_with_empty_body_reports_four_errors_in_order() {
        assert_eq!(
            create_errors(json!({})),
            vec![
                MSG_NAME_EMPTY,
                MSG_PRICE_NOT_NUMBER,
                MSG_PRICE_EMPTY,
                MSG_PRICE_INVALID
            ]
        );
    }

    #[test]
    fn negative_price_only_fails_the_range_rule() {
        assert_eq!(
            create_errors(json!({ "name": "Monitor", "price": -200 })),
            vec![MSG_PRICE_INVALID]
        );
    }

    #[test]
    fn non_numeric_price_string_fails_number_and_range_rules() {
        assert_eq!(
            create_errors(json!({ "name": "Monitor", "price": "asd" })),
            vec![MSG_PRICE_NOT_NUMBER, MSG_PRICE_INVALID]
        );
    }

    #[test]
    fn zero_price_is_rejected() {
        assert_eq!(
            create_errors(json!({ "name": "Monitor", "price": 0 })),
            vec![MSG_PRICE_INVALID]
        );
    }

    #[test]
    fn price_beyond_f64_range_is_rejected() {
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(
            create_errors(json!({ "name": "Monitor", "price": &huge })),
            vec![MSG_PRICE_INVALID]
        );
        let body = json!({ "name": "Monitor", "price": format!("{huge}.5"), "availability": true });
        assert_eq!(
            validate_replace("1", &body).unwrap_err().messages(),
            vec![MSG_PRICE_INVALID]
        );
    }

    #[test]
    fn empty_name_string_is_rejected() {
        assert_eq!(
            create_errors(json!({ "name": "", "price": 10 })),
            vec![MSG_NAME_EMPTY]
        );
    }

    #[test]
    fn null_price_is_empty_and_not_numeric() {
        assert_eq!(
            create_errors(json!({ "name": "Monitor", "price": null })),
            vec![MSG_PRICE_NOT_NUMBER, MSG_PRICE_EMPTY, MSG_PRICE_INVALID]
        );
    }

    #[test]
    fn valid_create_is_coerced() {
        let product = validate_create(&json!({ "name": "Mouse-testing", "price": "50.5" })).unwrap();
        assert_eq!(product.name, "Mouse-testing");
        assert_eq!(product.price, 50.5);
    }

    #[test]
    fn create_ignores_availability() {
        let product =
            validate_create(&json!({ "name": "Mouse", "price": 10, "availability": "nope" }))
                .unwrap();
        assert_eq!(product.price, 10.0);
    }

    #[test]
    fn non_object_body_reads_as_no_fields() {
        assert_eq!(create_errors(json!([1, 2, 3])).len(), 4);
    }

    #[test]
    fn errors_carry_field_and_location() {
        let errors = validate_create(&json!({ "name": "Monitor", "price": "asd" }))
            .unwrap_err()
            .into_inner();
        assert_eq!(errors[0].path, "price");
        assert_eq!(errors[0].location, Location::Body);
        assert_eq!(errors[0].value, Some(json!("asd")));
        assert_eq!(errors[0].kind, "field");
    }

    #[test]
    fn missing_value_is_omitted_from_serialized_error() {
        let errors = validate_create(&json!({ "price": 10 })).unwrap_err().into_inner();
        let json = serde_json::to_value(&errors[0]).unwrap();
        assert!(json.get("value").is_none());
        assert_eq!(json["location"], "body");
    }

    #[test]
    fn replace_with_empty_body_reports_five_errors() {
        let errors = validate_replace("1", &json!({})).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                MSG_NAME_EMPTY,
                MSG_PRICE_NOT_NUMBER,
                MSG_PRICE_EMPTY,
                MSG_PRICE_INVALID,
                MSG_INVALID_AVAILABILITY
            ]
        );
    }

    #[test]
    fn replace_with_bad_id_and_valid_body_reports_only_the_id() {
        let body = json!({ "name": "Tablet Samsung S9", "price": 900, "availability": true });
        let errors = validate_replace("not_valid_id", &body).unwrap_err().into_inner();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, MSG_INVALID_ID);
        assert_eq!(errors[0].location, Location::Params);
    }

    #[test]
    fn replace_reports_id_before_body_fields() {
        let errors = validate_replace("abc", &json!({})).unwrap_err();
        assert_eq!(errors.0.len(), 6);
        assert_eq!(errors.0[0].msg, MSG_INVALID_ID);
    }

    #[test]
    fn replace_accepts_loose_booleans() {
        for (raw, expected) in [
            (json!(true), true),
            (json!("false"), false),
            (json!("1"), true),
            (json!(0), false),
        ] {
            let body = json!({ "name": "Tablet", "price": 900, "availability": raw });
            let (_, changes) = validate_replace("3", &body).unwrap();
            assert_eq!(changes.availability, expected);
        }
    }

    #[test]
    fn replace_rejects_non_boolean_availability() {
        let body = json!({ "name": "Tablet", "price": 900, "availability": "yes" });
        let errors = validate_replace("3", &body).unwrap_err();
        assert_eq!(errors.messages(), vec![MSG_INVALID_AVAILABILITY]);
    }

    #[test]
    fn id_accepts_signed_integers() {
        assert_eq!(validate_id("42").unwrap(), PathId::Key(42));
        assert_eq!(validate_id("+7").unwrap(), PathId::Key(7));
        assert_eq!(validate_id("-3").unwrap(), PathId::Key(-3));
    }

    #[test]
    fn id_rejects_non_integers() {
        for raw in ["not_valid_id", "", "1.5", "-", "12a"] {
            let errors = validate_id(raw).unwrap_err();
            assert_eq!(errors.messages(), vec![MSG_INVALID_ID], "input {raw:?}");
        }
    }

    #[test]
    fn oversized_id_is_valid_but_unaddressable() {
        assert_eq!(
            validate_id("99999999999999999999999").unwrap(),
            PathId::OutOfRange
        );
        assert_eq!(PathId::OutOfRange.key(), None);
    }

    #[test]
    fn decimal_literal_matches_numeric_syntax() {
        assert!(is_decimal_literal("50"));
        assert!(is_decimal_literal("-3.25"));
        assert!(is_decimal_literal(".5"));
        assert!(!is_decimal_literal("5."));
        assert!(!is_decimal_literal("inf"));
        assert!(!is_decimal_literal(""));
    }
}
