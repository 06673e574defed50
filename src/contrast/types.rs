//! Wire shapes for experiment-contrast results
//!
//! Mirrors the evaluation API's nested result structure: item groups contain
//! turn results, turns contain per-experiment results, each carrying a
//! payload with the evaluation-set row, evaluator outputs, annotations, and
//! target-run output. Every field is optional; partially-missing structures
//! deserialize and degrade to empty rather than failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ordinal that arrives as either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Index {
    Num(i64),
    Text(String),
}

impl Index {
    /// Coerce to a number. Unparseable text is 0, never an error.
    pub fn as_ordinal(&self) -> i64 {
        match self {
            Index::Num(n) => *n,
            Index::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

impl Default for Index {
    fn default() -> Self {
        Index::Num(0)
    }
}

/// One field of an evaluation-set row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

/// One result group, keyed by evaluation-set item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemResult {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub item_index: Option<Index>,
    #[serde(default)]
    pub turn_results: Option<Vec<TurnResult>>,
    #[serde(default)]
    pub system_info: Option<ItemSystemInfo>,
}

/// One turn within a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    #[serde(default)]
    pub turn_id: Option<String>,
    #[serde(default)]
    pub turn_index: Option<Index>,
    #[serde(default)]
    pub experiment_results: Option<Vec<ExperimentResult>>,
}

/// One experiment's result for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    #[serde(default)]
    pub experiment_id: Option<String>,
    #[serde(default)]
    pub payload: Option<ExperimentTurnPayload>,
}

/// The per-experiment result bundle for one turn: evaluation-set row,
/// evaluator outputs, annotations, target output, and run status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentTurnPayload {
    #[serde(default)]
    pub eval_set: Option<EvalSet>,
    #[serde(default)]
    pub evaluator_output: Option<EvaluatorOutput>,
    #[serde(default)]
    pub annotate_result: Option<AnnotateResult>,
    #[serde(default)]
    pub target_output: Option<TargetOutput>,
    #[serde(default)]
    pub system_info: Option<TurnSystemInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalSet {
    #[serde(default)]
    pub turn: Option<EvalSetTurn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalSetTurn {
    #[serde(default)]
    pub field_data_list: Option<Vec<FieldData>>,
}

/// Evaluator outputs keyed by evaluator version id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorOutput {
    #[serde(default)]
    pub evaluator_records: Option<HashMap<String, EvaluatorRecord>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorRecord {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Manual annotations keyed by tag key id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotateResult {
    #[serde(default)]
    pub annotate_records: Option<HashMap<String, AnnotateRecord>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotateRecord {
    #[serde(default)]
    pub tag_key_id: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

/// The target model's output for the turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetOutput {
    #[serde(default)]
    pub actual_output: Option<FieldData>,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Run status for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnSystemInfo {
    #[serde(default)]
    pub turn_run_state: Option<i64>,
    #[serde(default)]
    pub log_id: Option<String>,
    #[serde(default)]
    pub error: Option<RunError>,
}

/// Run status for a whole group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSystemInfo {
    #[serde(default)]
    pub run_state: Option<i64>,
    #[serde(default)]
    pub error: Option<RunError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_coercion() {
        assert_eq!(Index::Num(7).as_ordinal(), 7);
        assert_eq!(Index::Text("12".to_string()).as_ordinal(), 12);
        assert_eq!(Index::Text(" 3 ".to_string()).as_ordinal(), 3);
        assert_eq!(Index::Text("not-a-number".to_string()).as_ordinal(), 0);
        assert_eq!(Index::Text(String::new()).as_ordinal(), 0);
        assert_eq!(Index::default().as_ordinal(), 0);
    }

    #[test]
    fn test_index_deserializes_both_shapes() {
        let num: Index = serde_json::from_value(json!(4)).unwrap();
        let text: Index = serde_json::from_value(json!("4")).unwrap();
        assert_eq!(num.as_ordinal(), 4);
        assert_eq!(text.as_ordinal(), 4);
    }

    #[test]
    fn test_partial_payload_deserializes() {
        let payload: ExperimentTurnPayload = serde_json::from_value(json!({
            "eval_set": { "turn": {} }
        }))
        .unwrap();
        assert!(payload.evaluator_output.is_none());
        assert!(payload
            .eval_set
            .unwrap()
            .turn
            .unwrap()
            .field_data_list
            .is_none());
    }

    #[test]
    fn test_item_result_tolerates_unknown_and_missing_fields() {
        let item: ItemResult = serde_json::from_value(json!({
            "item_id": "g1",
            "item_index": "2",
            "future_field": true
        }))
        .unwrap();
        assert_eq!(item.item_id.as_deref(), Some("g1"));
        assert_eq!(item.item_index.unwrap().as_ordinal(), 2);
        assert!(item.turn_results.is_none());
    }
}
