//! Column projection over a turn payload
//!
//! Tables describe their evaluator and annotation columns with
//! [`ColumnInfo`] descriptors; [`get_column_records`] looks each one up in a
//! turn payload. Missing keys, missing sub-structures, or a missing payload
//! all yield records with empty data (rendered as a dash downstream), never
//! an error. Output order follows the input column order; any
//! evaluators-before-annotations policy belongs to the caller.

use serde::{Deserialize, Serialize};

use super::types::{AnnotateRecord, EvaluatorRecord, ExperimentTurnPayload};

/// What a column projects out of a turn payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Evaluator,
    Annotation,
}

/// A displayable column: its kind plus the stable lookup key
/// (evaluator version id or tag key id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub kind: ColumnKind,
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// The looked-up cell data for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnData<'a> {
    Evaluator(Option<&'a EvaluatorRecord>),
    Annotation(Option<&'a AnnotateRecord>),
}

impl ColumnData<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            ColumnData::Evaluator(None) | ColumnData::Annotation(None)
        )
    }
}

/// One projected cell: the column it came from plus its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRecord<'a> {
    pub column: &'a ColumnInfo,
    pub data: ColumnData<'a>,
}

impl ColumnRecord<'_> {
    pub fn kind(&self) -> ColumnKind {
        self.column.kind
    }
}

/// Project a turn payload into cells, one per column, in column order.
pub fn get_column_records<'a>(
    columns: &'a [ColumnInfo],
    result: Option<&'a ExperimentTurnPayload>,
) -> Vec<ColumnRecord<'a>> {
    columns
        .iter()
        .map(|column| {
            let data = match column.kind {
                ColumnKind::Evaluator => ColumnData::Evaluator(
                    result
                        .and_then(|payload| payload.evaluator_output.as_ref())
                        .and_then(|output| output.evaluator_records.as_ref())
                        .and_then(|records| records.get(&column.key)),
                ),
                ColumnKind::Annotation => ColumnData::Annotation(
                    result
                        .and_then(|payload| payload.annotate_result.as_ref())
                        .and_then(|annotate| annotate.annotate_records.as_ref())
                        .and_then(|records| records.get(&column.key)),
                ),
            };
            ColumnRecord { column, data }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> ExperimentTurnPayload {
        serde_json::from_value(json!({
            "evaluator_output": { "evaluator_records": {
                "ev1": { "score": 0.9, "reasoning": "good" }
            }},
            "annotate_result": { "annotate_records": {
                "tag1": { "tag_key_id": "tag1", "value": "positive" }
            }}
        }))
        .unwrap()
    }

    fn column(kind: ColumnKind, key: &str) -> ColumnInfo {
        ColumnInfo {
            kind,
            key: key.to_string(),
            name: None,
        }
    }

    #[test]
    fn test_evaluator_lookup() {
        let payload = payload();
        let columns = vec![column(ColumnKind::Evaluator, "ev1")];
        let records = get_column_records(&columns, Some(&payload));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), ColumnKind::Evaluator);
        match records[0].data {
            ColumnData::Evaluator(Some(record)) => assert_eq!(record.score, Some(0.9)),
            ref other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_annotation_lookup() {
        let payload = payload();
        let columns = vec![column(ColumnKind::Annotation, "tag1")];
        let records = get_column_records(&columns, Some(&payload));
        match records[0].data {
            ColumnData::Annotation(Some(record)) => {
                assert_eq!(record.value, Some(json!("positive")));
            }
            ref other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_yields_empty_data() {
        let payload = payload();
        let columns = vec![column(ColumnKind::Evaluator, "absent")];
        let records = get_column_records(&columns, Some(&payload));
        assert!(records[0].data.is_missing());
    }

    #[test]
    fn test_missing_payload_yields_one_record_per_column() {
        let columns = vec![
            column(ColumnKind::Evaluator, "ev1"),
            column(ColumnKind::Annotation, "tag1"),
        ];
        let records = get_column_records(&columns, None);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.data.is_missing()));
    }

    #[test]
    fn test_output_follows_column_order() {
        let payload = payload();
        let columns = vec![
            column(ColumnKind::Annotation, "tag1"),
            column(ColumnKind::Evaluator, "ev1"),
        ];
        let records = get_column_records(&columns, Some(&payload));
        assert_eq!(records[0].kind(), ColumnKind::Annotation);
        assert_eq!(records[1].kind(), ColumnKind::Evaluator);
    }
}
