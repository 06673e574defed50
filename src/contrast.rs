//! Experiment-contrast record reconciliation
//!
//! A contrast view compares several experiments over the same evaluation
//! set. The API returns results nested three deep (item groups, turns,
//! per-experiment payloads); tables want one flat row per (group, turn)
//! with per-experiment lookups. [`experiment_contrast_to_record_items`]
//! does that flattening; [`get_column_records`] projects one experiment's
//! turn payload into display columns.

pub mod columns;
pub mod records;
pub mod types;

pub use columns::{get_column_records, ColumnData, ColumnInfo, ColumnKind, ColumnRecord};
pub use records::{
    experiment_contrast_to_record_items, field_data_to_map, ExperimentContrastItem,
};
pub use types::{
    AnnotateRecord, AnnotateResult, EvalSet, EvalSetTurn, EvaluatorOutput, EvaluatorRecord,
    ExperimentResult, ExperimentTurnPayload, FieldData, Index, ItemResult, ItemSystemInfo,
    RunError, TargetOutput, TurnResult, TurnSystemInfo,
};
