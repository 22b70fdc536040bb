//! Parameter validation
//!
//! Checks a caller's argument map against an operation's declared parameters
//! and splits it into path segments, query pairs and JSON body. Every
//! violation is collected so a single [`ValidationError`] names all of them.

use super::registry::{Location, OperationDef, ParamKind};
use crate::error::{FieldViolation, ValidationError};
use serde_json::{Map, Value};

/// Arguments after validation, ready for the request engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedArgs {
    /// Path placeholder values, percent-encoded
    pub path: Vec<(String, String)>,
    /// Query pairs with wire-format string values
    pub query: Vec<(String, String)>,
    /// JSON body, present when the operation declares body parameters
    pub body: Option<Value>,
}

impl NormalizedArgs {
    /// Fill a path template with the validated path values
    pub fn render_path(&self, template: &str) -> String {
        self.path
            .iter()
            .fold(template.to_string(), |path, (name, value)| {
                path.replace(&format!("{{{}}}", name), value)
            })
    }

    /// Value of a query pair, if present
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Validate `args` for `operation` and normalize them
pub fn validate(
    operation: &str,
    def: &OperationDef,
    args: &Map<String, Value>,
) -> Result<NormalizedArgs, ValidationError> {
    let mut violations = Vec::new();
    let mut normalized = NormalizedArgs::default();
    let mut body = Map::new();

    // Unknown keys are rejected rather than dropped
    for key in args.keys() {
        if def.param(key).is_none() {
            violations.push(FieldViolation::new(key, "unknown parameter"));
        }
    }

    for spec in &def.params {
        let value = match args.get(&spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    violations.push(FieldViolation::new(&spec.name, "missing required parameter"));
                }
                continue;
            }
            Some(value) => value,
        };

        if let Err(reason) = check_kind(&spec.kind, value) {
            violations.push(FieldViolation::new(&spec.name, reason));
            continue;
        }

        match spec.location {
            Location::Path => {
                let segment = scalar_to_string(value);
                normalized
                    .path
                    .push((spec.name.clone(), urlencoding::encode(&segment).into_owned()));
            }
            Location::Query => push_query(&mut normalized.query, &spec.name, value),
            Location::Body => {
                body.insert(spec.name.clone(), value.clone());
            }
        }
    }

    check_group(args, &def.exactly_one_of, 1..=1, "exactly one of", &mut violations);
    check_group(args, &def.at_most_one_of, 0..=1, "at most one of", &mut violations);

    if !violations.is_empty() {
        return Err(ValidationError {
            operation: operation.to_string(),
            violations,
        });
    }

    if def.has_body() {
        normalized.body = Some(Value::Object(body));
    }

    Ok(normalized)
}

fn check_group(
    args: &Map<String, Value>,
    group: &[String],
    allowed: std::ops::RangeInclusive<usize>,
    label: &str,
    violations: &mut Vec<FieldViolation>,
) {
    if group.is_empty() {
        return;
    }
    let supplied = group
        .iter()
        .filter(|name| args.get(name.as_str()).is_some_and(|v| !v.is_null()))
        .count();
    if !allowed.contains(&supplied) {
        violations.push(FieldViolation::new(
            group.join("|"),
            format!("{} {} must be supplied, got {}", label, group.join(", "), supplied),
        ));
    }
}

/// Check a value against a declared kind
pub fn check_kind(kind: &ParamKind, value: &Value) -> Result<(), String> {
    match kind {
        ParamKind::Integer => {
            if value.is_i64() || value.is_u64() {
                Ok(())
            } else {
                Err(expected("integer", value))
            }
        }
        ParamKind::Number => {
            if value.is_number() {
                Ok(())
            } else {
                Err(expected("number", value))
            }
        }
        ParamKind::String => value
            .as_str()
            .map(|_| ())
            .ok_or_else(|| expected("string", value)),
        ParamKind::Boolean => value
            .as_bool()
            .map(|_| ())
            .ok_or_else(|| expected("boolean", value)),
        ParamKind::Email => {
            let s = value.as_str().ok_or_else(|| expected("email string", value))?;
            if is_valid_email(s) {
                Ok(())
            } else {
                Err(format!("not a valid email address: {:?}", s))
            }
        }
        ParamKind::DateTime => {
            let s = value
                .as_str()
                .ok_or_else(|| expected("RFC 3339 datetime string", value))?;
            chrono::DateTime::parse_from_rfc3339(s)
                .map(|_| ())
                .map_err(|e| format!("not an RFC 3339 datetime ({}): {:?}", e, s))
        }
        ParamKind::Url => {
            let s = value.as_str().ok_or_else(|| expected("URL string", value))?;
            match url::Url::parse(s) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
                Ok(url) => Err(format!("unsupported URL scheme: {}", url.scheme())),
                Err(e) => Err(format!("not a valid URL ({}): {:?}", e, s)),
            }
        }
        ParamKind::Any => Ok(()),
        ParamKind::Enum { values } => {
            if values.contains(value) {
                Ok(())
            } else {
                let allowed: Vec<String> = values.iter().map(Value::to_string).collect();
                Err(format!("{} is not one of [{}]", value, allowed.join(", ")))
            }
        }
        ParamKind::Array { items } => {
            let elements = value.as_array().ok_or_else(|| expected("array", value))?;
            for (i, element) in elements.iter().enumerate() {
                check_kind(items, element).map_err(|reason| format!("element {}: {}", i, reason))?;
            }
            Ok(())
        }
    }
}

fn expected(kind: &str, value: &Value) -> String {
    format!("expected {}, got {}", kind, type_name(value))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Wire string for a scalar: booleans lowercase, strings unquoted
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        other => other.to_string(),
    }
}

/// Arrays become repeated keys
fn push_query(query: &mut Vec<(String, String)>, name: &str, value: &Value) {
    match value {
        Value::Array(elements) => {
            for element in elements {
                query.push((name.to_string(), scalar_to_string(element)));
            }
        }
        other => query.push((name.to_string(), scalar_to_string(other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::registry::get_operation;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn run(op: &str, value: Value) -> Result<NormalizedArgs, ValidationError> {
        validate(op, get_operation(op).unwrap(), &args(value))
    }

    #[test]
    fn test_booleans_become_lowercase_query_strings() {
        let normalized = run(
            "get_organization",
            json!({"organization_id": 456, "with_opportunities": true, "with_notes": false}),
        )
        .unwrap();

        assert_eq!(normalized.query_value("with_opportunities"), Some("true"));
        assert_eq!(normalized.query_value("with_notes"), Some("false"));
        assert_eq!(normalized.query_value("with_persons"), None);
        assert_eq!(normalized.render_path("/organizations/{organization_id}"), "/organizations/456");
        assert!(normalized.body.is_none());
    }

    #[test]
    fn test_body_keeps_native_booleans_and_omits_absent() {
        let normalized = run(
            "create_field",
            json!({"name": "Stage", "entity_type": 8, "value_type": 2, "is_required": false}),
        )
        .unwrap();

        assert_eq!(
            normalized.body,
            Some(json!({"name": "Stage", "entity_type": 8, "value_type": 2, "is_required": false}))
        );
        assert!(normalized.query.is_empty());
    }

    #[test]
    fn test_null_counts_as_absent() {
        let normalized = run(
            "create_opportunity",
            json!({"name": "Deal", "list_id": 1, "organization_ids": null}),
        )
        .unwrap();
        assert_eq!(normalized.body, Some(json!({"name": "Deal", "list_id": 1})));
    }

    #[test]
    fn test_every_violation_is_reported() {
        let err = run(
            "create_person",
            json!({"last_name": 7, "emails": ["ok@example.com", "nope"], "nickname": "x"}),
        )
        .unwrap_err();

        assert_eq!(err.operation, "create_person");
        assert!(err.has_field("nickname"));
        assert!(err.has_field("first_name"));
        assert!(err.has_field("last_name"));
        assert!(err.has_field("emails"));
        assert_eq!(err.violations.len(), 4);
    }

    #[test]
    fn test_integer_rejects_strings_and_floats() {
        let err = run("get_person", json!({"person_id": "123"})).unwrap_err();
        assert_eq!(err.violations[0].reason, "expected integer, got string");

        let err = run("get_person", json!({"person_id": 1.5})).unwrap_err();
        assert_eq!(err.violations[0].reason, "expected integer, got float");
    }

    #[test]
    fn test_exactly_one_entity_selector() {
        let err = run("list_field_values", json!({"field_id": 3})).unwrap_err();
        assert!(err.violations[0].reason.starts_with("exactly one of"));

        let err = run(
            "list_field_values",
            json!({"person_id": 1, "organization_id": 2}),
        )
        .unwrap_err();
        assert!(err.violations[0].reason.ends_with("got 2"));

        let ok = run("list_field_values", json!({"organization_id": 2, "field_id": 3})).unwrap();
        assert_eq!(ok.query_value("organization_id"), Some("2"));
    }

    #[test]
    fn test_at_most_one_entity_selector() {
        assert!(run("list_field_value_changes", json!({"field_id": 1})).is_ok());
        let err = run(
            "list_field_value_changes",
            json!({"field_id": 1, "person_id": 1, "opportunity_id": 2}),
        )
        .unwrap_err();
        assert!(err.violations[0].reason.starts_with("at most one of"));
    }

    #[test]
    fn test_enum_membership() {
        assert!(run("get_interaction", json!({"interaction_id": 1, "type": 3})).is_ok());
        let err = run("get_interaction", json!({"interaction_id": 1, "type": 9})).unwrap_err();
        assert!(err.has_field("type"));

        let err = run(
            "list_notes",
            json!({"entity_id": 1, "entity_type": "list_entry"}),
        )
        .unwrap_err();
        assert!(err.has_field("entity_type"));
    }

    #[test]
    fn test_datetime_and_url_kinds() {
        assert!(check_kind(&ParamKind::DateTime, &json!("2024-07-01T10:00:00Z")).is_ok());
        assert!(check_kind(&ParamKind::DateTime, &json!("yesterday")).is_err());
        assert!(check_kind(&ParamKind::Url, &json!("https://example.com/hook")).is_ok());
        assert!(check_kind(&ParamKind::Url, &json!("ftp://example.com")).is_err());
        assert!(check_kind(&ParamKind::Url, &json!("not a url")).is_err());
    }

    #[test]
    fn test_any_accepts_every_non_null_shape() {
        for value in [json!("x"), json!(1), json!(1.5), json!(true), json!([1]), json!({"a": 1})] {
            assert!(check_kind(&ParamKind::Any, &value).is_ok());
        }
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("guillaume@serena.vc"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@example..com"));
    }

    #[test]
    fn test_path_segments_are_percent_encoded() {
        let normalized = run(
            "get_webhook",
            json!({"webhook_subscription_id": "abc/123 x"}),
        )
        .unwrap();
        assert_eq!(
            normalized.render_path("/webhook/{webhook_subscription_id}"),
            "/webhook/abc%2F123%20x"
        );
    }
}
