//! Workout catalog
//!
//! The catalog file is hand-edited, so parsing is lenient: numbers may be
//! written as strings, unknown keys are ignored, and a lone object is
//! accepted where a list is expected. Anything that cannot be understood is
//! treated as absent rather than rejected.

use cadence_core::config::MAX_STEP_S;
use cadence_core::plan::ExerciseSpec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CatalogError, CatalogResult};

/// A named workout plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub name: String,
    pub exercises: Vec<ExerciseSpec>,
}

/// All workouts available for selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub workouts: Vec<Workout>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// Get workout by index
    pub fn get(&self, index: usize) -> Option<&Workout> {
        self.workouts.get(index)
    }

    /// Workout names, in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.workouts.iter().map(|w| w.name.as_str())
    }
}

/// Parse catalog JSON
///
/// Accepts `{ "workouts": [...] }` or a bare array of workouts.
pub fn parse_catalog(text: &str) -> CatalogResult<Catalog> {
    let value: Value = serde_json::from_str(text)?;

    let items = match &value {
        Value::Object(map) => match map.get("workouts") {
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => return Err(CatalogError::Shape("`workouts` is not a list".into())),
            None => return Err(CatalogError::Shape("missing `workouts` list".into())),
        },
        Value::Array(items) => items.as_slice(),
        _ => return Err(CatalogError::Shape("expected an object or a list".into())),
    };

    let workouts = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| item.as_object().map(|w| parse_workout(i, w)))
        .collect();

    Ok(Catalog { workouts })
}

fn parse_workout(index: usize, record: &Map<String, Value>) -> Workout {
    let name = text_field(record, "name").unwrap_or_else(|| format!("Workout {}", index + 1));
    let exercises = as_list(record.get("exercises"))
        .filter_map(Value::as_object)
        .map(parse_exercise)
        .collect();

    Workout { name, exercises }
}

fn parse_exercise(record: &Map<String, Value>) -> ExerciseSpec {
    let title = text_field(record, "exercise_name")
        .or_else(|| text_field(record, "name"))
        .unwrap_or_default();
    let sets = positive_number(record.get("sets")).map_or(1, |n| n.floor().max(1.0) as u32);

    let group = ["superset", "super_set"]
        .iter()
        .find_map(|key| record.get(*key).filter(|v| !v.is_null()))
        .map(|members| {
            as_list(Some(members))
                .filter_map(Value::as_object)
                .map(parse_exercise)
                .collect()
        });

    ExerciseSpec {
        title,
        duration_s: positive_number(record.get("duration")).map(|n| round_u32(n, MAX_STEP_S)),
        reps: positive_number(record.get("reps")).map(|n| round_u32(n, u32::MAX)),
        sets,
        bilateral: record.get("bilaterally").is_some_and(truthy),
        group,
    }
}

/// Trimmed non-empty string field
fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match record.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// A lone value where a list is expected counts as a one-element list
fn as_list(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    let items: &[Value] = match value {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => &[],
        Some(single) => std::slice::from_ref(single),
    };
    items.iter()
}

/// Finite number above zero, from a JSON number or numeric string
fn positive_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n > 0.0).then_some(n)
}

fn round_u32(n: f64, max: u32) -> u32 {
    n.round().clamp(0.0, f64::from(max)) as u32
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
