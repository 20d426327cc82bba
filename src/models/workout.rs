// SPDX-License-Identifier: MIT

//! Workout hierarchy models.
//!
//! Documents carry arbitrary stored fields, so each record is its
//! document name plus an open field map rather than a fixed schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document as fetched from Firestore: document name plus stored fields.
///
/// The flattened map also absorbs the other `_firestore_*` metadata keys
/// the deserializer injects (full document path, server timestamps);
/// `from_doc` removes those before the fields reach a record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDoc {
    /// Document name, injected by the Firestore deserializer.
    #[serde(rename = "_firestore_id")]
    pub doc_id: String,
    /// Stored fields, as-is.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A single repetition record. Leaf of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rep {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Rep {
    pub fn from_doc(doc: RawDoc) -> Self {
        let RawDoc { doc_id, fields } = doc;
        Self {
            id: doc_id,
            fields: strip_reserved(fields, &["id"], "rep"),
        }
    }
}

/// A set record with its ordered repetitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub reps: Vec<Rep>,
}

impl WorkoutSet {
    pub fn from_doc(doc: RawDoc, reps: Vec<Rep>) -> Self {
        let RawDoc { doc_id, fields } = doc;
        Self {
            id: doc_id,
            fields: strip_reserved(fields, &["id", "reps"], "set"),
            reps,
        }
    }
}

/// A workout record with its ordered sets.
///
/// Serializes to `{"id": ..., ...fields, "sets": [...]}`, the shape the
/// JSON export writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub sets: Vec<WorkoutSet>,
}

impl Workout {
    pub fn from_doc(doc: RawDoc, sets: Vec<WorkoutSet>) -> Self {
        let RawDoc { doc_id, fields } = doc;
        Self {
            id: doc_id,
            fields: strip_reserved(fields, &["id", "sets"], "workout"),
            sets,
        }
    }
}

/// Prefix of the metadata keys the Firestore deserializer injects
/// alongside stored fields (`_firestore_full_id`, `_firestore_created`,
/// `_firestore_updated`).
const METADATA_PREFIX: &str = "_firestore_";

/// Drop stored fields that would collide with the injected structural keys.
///
/// The document name always wins over a stored field literally named `id`;
/// clobbering either silently would corrupt the export. The `_firestore_*`
/// metadata keys are SDK injections, not stored fields, so they go without
/// a warning.
fn strip_reserved(
    mut fields: Map<String, Value>,
    reserved: &[&str],
    kind: &'static str,
) -> Map<String, Value> {
    fields.retain(|key, _| !key.starts_with(METADATA_PREFIX));
    for key in reserved {
        if fields.remove(*key).is_some() {
            tracing::warn!(
                field = *key,
                kind,
                "Stored field collides with an injected key; dropping stored value"
            );
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_rep_from_doc_injects_document_id() {
        let doc = RawDoc {
            doc_id: "R1".to_string(),
            fields: fields(json!({"peakForce": 412.5})),
        };

        let rep = Rep::from_doc(doc);
        assert_eq!(rep.id, "R1");
        assert_eq!(rep.fields["peakForce"], json!(412.5));
    }

    #[test]
    fn test_stored_id_field_does_not_clobber_document_id() {
        let doc = RawDoc {
            doc_id: "R1".to_string(),
            fields: fields(json!({"id": "bogus", "peakPower": 900.0})),
        };

        let rep = Rep::from_doc(doc);
        assert_eq!(rep.id, "R1");
        assert!(!rep.fields.contains_key("id"));
    }

    #[test]
    fn test_deserializer_metadata_keys_are_dropped() {
        let doc = RawDoc {
            doc_id: "R1".to_string(),
            fields: fields(json!({
                "_firestore_full_id":
                    "projects/p/databases/(default)/documents/users/U1/workouts/W1/sets/S1/reps/R1",
                "_firestore_created": "2024-04-25T00:00:00Z",
                "_firestore_updated": "2024-04-25T00:00:00Z",
                "peakForce": 412.5,
            })),
        };

        let rep = Rep::from_doc(doc);
        assert_eq!(rep.id, "R1");
        assert!(
            rep.fields.keys().all(|k| !k.starts_with("_firestore_")),
            "SDK metadata must not leak into record fields"
        );
        assert_eq!(rep.fields["peakForce"], json!(412.5));
    }

    #[test]
    fn test_set_strips_stored_reps_field() {
        let doc = RawDoc {
            doc_id: "S1".to_string(),
            fields: fields(json!({"reps": 12, "weight": 80.0})),
        };

        let set = WorkoutSet::from_doc(doc, vec![]);
        assert_eq!(set.id, "S1");
        assert!(set.reps.is_empty());
        assert_eq!(set.fields["weight"], json!(80.0));
    }

    #[test]
    fn test_workout_serializes_with_flattened_fields() {
        let workout = Workout {
            id: "W1".to_string(),
            fields: fields(json!({"notes": "morning session"})),
            sets: vec![WorkoutSet {
                id: "S1".to_string(),
                fields: fields(json!({"exerciseType": "squat"})),
                reps: vec![Rep {
                    id: "R1".to_string(),
                    fields: fields(json!({"peakVelocity": [0.1, 0.2, 0.9]})),
                }],
            }],
        };

        let value = serde_json::to_value(&workout).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "W1",
                "notes": "morning session",
                "sets": [{
                    "id": "S1",
                    "exerciseType": "squat",
                    "reps": [{
                        "id": "R1",
                        "peakVelocity": [0.1, 0.2, 0.9],
                    }],
                }],
            })
        );
    }

    #[test]
    fn test_workout_json_round_trip() {
        let workout = Workout {
            id: "W1".to_string(),
            fields: fields(json!({"startTime": 1714000000})),
            sets: vec![WorkoutSet {
                id: "S1".to_string(),
                fields: fields(json!({"timestamps": [1, 2, 3], "velocityZ": [0.0, 0.5, 0.1]})),
                reps: vec![],
            }],
        };

        let encoded = serde_json::to_string_pretty(&workout).unwrap();
        let decoded: Workout = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, workout);
    }
}
