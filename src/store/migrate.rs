//! Schema migration.
//!
//! Old documents are upgraded step by step, each step transforming only
//! the fields its version introduced or changed, in strict ascending
//! order. Version history:
//!
//! - v1: flat document; items, categories, household, and settings at the
//!   root, one implicit partition.
//! - v2: partitions arrive as `workspaces` with `activeWorkspaceId`.
//! - v3 (current): `workspaces` becomes `inventorySets`, the active
//!   pointer becomes `activeInventorySetId`, per-set kit fields and
//!   backup bookkeeping are filled in.
//!
//! Documents newer than this build are refused, never downgraded.

use chrono::Utc;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::errors::{Error, Result};
use crate::model::{CURRENT_SCHEMA_VERSION, DEFAULT_SET_ID, SetSettings};

/// Migrates a parsed document to [`CURRENT_SCHEMA_VERSION`].
///
/// A document already at the current version passes through untouched.
/// Non-object documents pass through for validation to reject.
///
/// # Errors
/// Returns [`Error::UnsupportedVersion`] when the document was written by
/// a newer build.
pub fn migrate_document(mut value: Value) -> Result<Value> {
    let Some(version) = document_version(&value) else {
        return Ok(value);
    };

    if version > u64::from(CURRENT_SCHEMA_VERSION) {
        return Err(Error::UnsupportedVersion {
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    let mut version = version;
    while version < u64::from(CURRENT_SCHEMA_VERSION) {
        value = match version {
            1 => migrate_v1_to_v2(value),
            2 => migrate_v2_to_v3(value),
            // document_version never yields 0 and the loop stops at current
            _ => value,
        };
        version += 1;
        info!("Migrated document to schema version {}", version);
    }

    Ok(value)
}

/// The document's version. Missing or malformed version fields on an
/// object are treated as version 1, the era before the field was
/// reliably written. Non-objects yield `None`.
fn document_version(value: &Value) -> Option<u64> {
    let root = value.as_object()?;
    Some(
        root.get("version")
            .and_then(Value::as_u64)
            .map_or(1, |v| v.max(1)),
    )
}

/// v1 -> v2: wrap the flat root document into a single workspace.
fn migrate_v1_to_v2(value: Value) -> Value {
    let Value::Object(mut root) = value else {
        return value;
    };

    let mut workspace = Map::new();
    workspace.insert("id".to_string(), json!(DEFAULT_SET_ID));
    workspace.insert("name".to_string(), json!("My supplies"));
    for field in [
        "household",
        "settings",
        "items",
        "categories",
        "customTemplates",
        "disabledCategories",
        "disabledRecommendedItems",
        "dismissedAlertIds",
    ] {
        if let Some(moved) = root.remove(field) {
            workspace.insert(field.to_string(), moved);
        }
    }

    root.insert("version".to_string(), json!(2));
    root.insert("workspaces".to_string(), json!([Value::Object(workspace)]));
    root.insert("activeWorkspaceId".to_string(), json!(DEFAULT_SET_ID));
    root.entry("lastModified".to_string())
        .or_insert_with(|| json!(Utc::now()));

    Value::Object(root)
}

/// v2 -> v3: retire the workspace naming and fill in the fields this
/// version introduced.
fn migrate_v2_to_v3(value: Value) -> Value {
    let Value::Object(mut root) = value else {
        return value;
    };

    let sets = root
        .remove("workspaces")
        .or_else(|| root.remove("inventorySets"))
        .unwrap_or_else(|| json!([]));
    let active = root
        .remove("activeWorkspaceId")
        .or_else(|| root.remove("activeInventorySetId"))
        .unwrap_or_else(|| json!(DEFAULT_SET_ID));

    let default_settings =
        serde_json::to_value(SetSettings::default()).unwrap_or_else(|_| json!({}));

    let sets = match sets {
        Value::Array(list) => Value::Array(
            list.into_iter()
                .map(|set| upgrade_set_to_v3(set, &default_settings))
                .collect(),
        ),
        other => other,
    };

    root.insert("version".to_string(), json!(3));
    root.insert("inventorySets".to_string(), sets);
    root.insert("activeInventorySetId".to_string(), active);
    root.entry("lastModified".to_string())
        .or_insert_with(|| json!(Utc::now()));

    Value::Object(root)
}

fn upgrade_set_to_v3(set: Value, default_settings: &Value) -> Value {
    let Value::Object(mut set) = set else {
        return set;
    };

    for field in [
        "items",
        "categories",
        "customTemplates",
        "disabledCategories",
        "disabledRecommendedItems",
        "dismissedAlertIds",
    ] {
        set.entry(field.to_string()).or_insert_with(|| json!([]));
    }

    match set.get_mut("settings") {
        Some(Value::Object(settings)) => {
            if !settings.contains_key("selectedKitId") {
                if let Some(kit_id) = default_settings.get("selectedKitId") {
                    settings.insert("selectedKitId".to_string(), kit_id.clone());
                }
            }
            if !settings.contains_key("language") {
                settings.insert("language".to_string(), json!("en"));
            }
        }
        _ => {
            set.insert("settings".to_string(), default_settings.clone());
        }
    }

    Value::Object(set)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::model::{AppData, BUILTIN_KIT_ID};
    use crate::store::validate::validate_document;
    use chrono::Utc;

    #[test]
    fn current_version_documents_pass_through_unchanged() {
        let data = AppData::default_document(Utc::now());
        let value = serde_json::to_value(&data).unwrap();

        let migrated = migrate_document(value.clone()).unwrap();
        assert_eq!(migrated, value);
    }

    #[test]
    fn newer_version_is_refused() {
        let value = serde_json::json!({"version": 99, "inventorySets": []});
        let err = migrate_document(value).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedVersion {
                found: 99,
                supported: CURRENT_SCHEMA_VERSION
            }
        ));
    }

    #[test]
    fn v1_flat_document_migrates_to_current_and_validates() {
        let value = serde_json::json!({
            "version": 1,
            "household": {"adults": 2, "children": 1, "supplyDurationDays": 14},
            "items": [{
                "id": "a",
                "name": "Beans",
                "categoryId": "food",
                "quantity": 3.0,
                "unit": "cans",
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }],
            "categories": [],
            "dismissedAlertIds": ["water"]
        });

        let migrated = migrate_document(value).unwrap();
        assert_eq!(migrated["version"], 3);
        assert_eq!(migrated["activeInventorySetId"], DEFAULT_SET_ID);
        assert_eq!(migrated["inventorySets"][0]["id"], DEFAULT_SET_ID);
        assert_eq!(
            migrated["inventorySets"][0]["household"]["adults"],
            serde_json::json!(2)
        );
        assert_eq!(
            migrated["inventorySets"][0]["dismissedAlertIds"],
            serde_json::json!(["water"])
        );
        assert_eq!(
            migrated["inventorySets"][0]["settings"]["selectedKitId"],
            serde_json::json!(BUILTIN_KIT_ID)
        );

        let report = validate_document(&migrated);
        assert!(report.is_valid, "migrated document invalid: {report}");

        let parsed: AppData = serde_json::from_value(migrated).unwrap();
        assert_eq!(parsed.inventory_sets[0].items.len(), 1);
    }

    #[test]
    fn v2_workspaces_document_is_renamed_and_filled_in() {
        let value = serde_json::json!({
            "version": 2,
            "workspaces": [{
                "id": "default",
                "name": "Home",
                "household": {"adults": 1, "children": 0, "supplyDurationDays": 10},
                "settings": {"language": "de", "theme": "dark"},
                "items": [],
                "categories": []
            }],
            "activeWorkspaceId": "default",
            "lastModified": "2024-06-01T12:00:00Z"
        });

        let migrated = migrate_document(value).unwrap();
        assert_eq!(migrated["version"], 3);
        assert!(migrated.get("workspaces").is_none());
        assert!(migrated.get("activeWorkspaceId").is_none());
        assert_eq!(migrated["lastModified"], "2024-06-01T12:00:00Z");

        let set = &migrated["inventorySets"][0];
        assert_eq!(set["settings"]["language"], "de");
        assert_eq!(set["settings"]["selectedKitId"], BUILTIN_KIT_ID);
        assert_eq!(set["customTemplates"], serde_json::json!([]));
        assert_eq!(set["disabledRecommendedItems"], serde_json::json!([]));

        let report = validate_document(&migrated);
        assert!(report.is_valid, "migrated document invalid: {report}");
    }

    #[test]
    fn missing_version_field_is_treated_as_v1() {
        let value = serde_json::json!({
            "items": [],
            "household": {"adults": 1, "children": 0, "supplyDurationDays": 10}
        });

        let migrated = migrate_document(value).unwrap();
        assert_eq!(migrated["version"], 3);
        assert_eq!(migrated["inventorySets"][0]["id"], DEFAULT_SET_ID);
    }
}
