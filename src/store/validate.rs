//! Structural validation of the root document.
//!
//! Parsed JSON is checked against the current schema before it is allowed
//! into the active document. The outcome is a tagged result, never an
//! exception: callers decide whether to degrade, abort an import, or
//! surface the findings.

use serde_json::Value;

use crate::model::CURRENT_SCHEMA_VERSION;

/// One field-level validation finding.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FieldError {
    /// JSON-path-ish location, e.g. `inventorySets[0].items[2].quantity`
    pub field: String,
    /// What is wrong with it
    pub message: String,
    /// The offending value, when small enough to be useful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Outcome of validating one document.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ValidationReport {
    /// Whether the document may enter the active state
    pub is_valid: bool,
    /// Field-level findings; empty when valid
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    /// A report with no findings.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// A report carrying a single finding, for failures outside field
    /// checks (unparseable JSON, serde rejection).
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
                value: None,
            }],
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid {
            return write!(f, "valid");
        }
        let findings: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", findings.join("; "))
    }
}

struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>, value: Option<&Value>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
            value: value.cloned(),
        });
    }

    fn require_string(&mut self, value: &Value, field: &str) {
        if value.as_str().is_none() {
            self.push(field, "expected a string", Some(value));
        }
    }

    fn require_non_negative_number(&mut self, value: &Value, field: &str) {
        match value.as_f64() {
            Some(n) if n >= 0.0 => {}
            Some(_) => self.push(field, "must not be negative", Some(value)),
            None => self.push(field, "expected a number", Some(value)),
        }
    }
}

/// Validates a document already migrated to the current schema version.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn validate_document(value: &Value) -> ValidationReport {
    let mut checker = Checker { errors: Vec::new() };

    let Some(root) = value.as_object() else {
        checker.push("$", "document root must be an object", None);
        return finish(checker);
    };

    match root.get("version").and_then(Value::as_u64) {
        Some(version) if version == u64::from(CURRENT_SCHEMA_VERSION) => {}
        Some(version) => checker.push(
            "version",
            format!("expected version {CURRENT_SCHEMA_VERSION}, found {version}"),
            root.get("version"),
        ),
        None => checker.push("version", "missing or not a number", root.get("version")),
    }

    if root.get("lastModified").and_then(Value::as_str).is_none() {
        checker.push("lastModified", "missing or not a timestamp string", None);
    }

    match root.get("activeInventorySetId").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => {}
        _ => checker.push(
            "activeInventorySetId",
            "missing or not a non-empty string",
            root.get("activeInventorySetId"),
        ),
    }

    let Some(sets) = root.get("inventorySets").and_then(Value::as_array) else {
        checker.push(
            "inventorySets",
            "missing or not an array",
            root.get("inventorySets"),
        );
        return finish(checker);
    };

    let mut seen_set_ids: Vec<&str> = Vec::new();
    for (set_index, set) in sets.iter().enumerate() {
        let prefix = format!("inventorySets[{set_index}]");
        let Some(set_obj) = set.as_object() else {
            checker.push(&prefix, "expected an object", Some(set));
            continue;
        };

        match set_obj.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => {
                if seen_set_ids.contains(&id) {
                    checker.push(
                        format!("{prefix}.id"),
                        "duplicate inventory set id",
                        set_obj.get("id"),
                    );
                } else {
                    seen_set_ids.push(id);
                }
            }
            _ => checker.push(
                format!("{prefix}.id"),
                "missing or not a non-empty string",
                set_obj.get("id"),
            ),
        }

        if set_obj.get("name").and_then(Value::as_str).is_none() {
            checker.push(
                format!("{prefix}.name"),
                "missing or not a string",
                set_obj.get("name"),
            );
        }

        if let Some(household) = set_obj.get("household") {
            if let Some(household_obj) = household.as_object() {
                for field in ["adults", "children", "supplyDurationDays"] {
                    match household_obj.get(field).and_then(Value::as_u64) {
                        Some(_) => {}
                        None => checker.push(
                            format!("{prefix}.household.{field}"),
                            "missing or not a non-negative integer",
                            household_obj.get(field),
                        ),
                    }
                }
            } else {
                checker.push(
                    format!("{prefix}.household"),
                    "expected an object",
                    Some(household),
                );
            }
        } else {
            checker.push(format!("{prefix}.household"), "missing", None);
        }

        match set_obj.get("items") {
            Some(Value::Array(items)) => {
                for (item_index, item) in items.iter().enumerate() {
                    let item_prefix = format!("{prefix}.items[{item_index}]");
                    let Some(item_obj) = item.as_object() else {
                        checker.push(&item_prefix, "expected an object", Some(item));
                        continue;
                    };
                    for field in ["id", "name", "categoryId"] {
                        if let Some(v) = item_obj.get(field) {
                            checker.require_string(v, &format!("{item_prefix}.{field}"));
                        } else {
                            checker.push(format!("{item_prefix}.{field}"), "missing", None);
                        }
                    }
                    if let Some(quantity) = item_obj.get("quantity") {
                        checker.require_non_negative_number(
                            quantity,
                            &format!("{item_prefix}.quantity"),
                        );
                    } else {
                        checker.push(format!("{item_prefix}.quantity"), "missing", None);
                    }
                }
            }
            Some(other) => checker.push(format!("{prefix}.items"), "expected an array", Some(other)),
            None => {}
        }

        match set_obj.get("categories") {
            Some(Value::Array(categories)) => {
                for (cat_index, category) in categories.iter().enumerate() {
                    let cat_prefix = format!("{prefix}.categories[{cat_index}]");
                    match category.get("id").and_then(Value::as_str) {
                        Some(id) if !id.is_empty() => {}
                        _ => checker.push(
                            format!("{cat_prefix}.id"),
                            "missing or not a non-empty string",
                            category.get("id"),
                        ),
                    }
                }
            }
            Some(other) => checker.push(
                format!("{prefix}.categories"),
                "expected an array",
                Some(other),
            ),
            None => {}
        }
    }

    finish(checker)
}

fn finish(checker: Checker) -> ValidationReport {
    ValidationReport {
        is_valid: checker.errors.is_empty(),
        errors: checker.errors,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::model::AppData;
    use chrono::Utc;

    #[test]
    fn current_default_document_validates() {
        let data = AppData::default_document(Utc::now());
        let value = serde_json::to_value(&data).unwrap();
        let report = validate_document(&value);
        assert!(report.is_valid, "unexpected findings: {report}");
    }

    #[test]
    fn non_object_root_is_invalid() {
        let report = validate_document(&serde_json::json!([1, 2, 3]));
        assert!(!report.is_valid);
        assert_eq!(report.errors[0].field, "$");
    }

    #[test]
    fn negative_quantity_is_located_precisely() {
        let data = AppData::default_document(Utc::now());
        let mut value = serde_json::to_value(&data).unwrap();
        value["inventorySets"][0]["items"] = serde_json::json!([{
            "id": "x",
            "name": "Beans",
            "categoryId": "food",
            "quantity": -2.0
        }]);

        let report = validate_document(&value);
        assert!(!report.is_valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.field == "inventorySets[0].items[0].quantity"
                    && e.message.contains("negative"))
        );
    }

    #[test]
    fn duplicate_set_ids_are_flagged() {
        let data = AppData::default_document(Utc::now());
        let mut value = serde_json::to_value(&data).unwrap();
        let set = value["inventorySets"][0].clone();
        value["inventorySets"].as_array_mut().unwrap().push(set);

        let report = validate_document(&value);
        assert!(!report.is_valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.field == "inventorySets[1].id" && e.message.contains("duplicate"))
        );
    }

    #[test]
    fn wrong_version_is_flagged() {
        let data = AppData::default_document(Utc::now());
        let mut value = serde_json::to_value(&data).unwrap();
        value["version"] = serde_json::json!(1);

        let report = validate_document(&value);
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.field == "version"));
    }

    #[test]
    fn display_joins_findings() {
        let report = ValidationReport::single("version", "missing or not a number");
        assert_eq!(format!("{report}"), "version: missing or not a number");
    }
}
