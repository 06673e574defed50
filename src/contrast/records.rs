//! Flattening contrast results into row records
//!
//! One [`ExperimentContrastItem`] per (group, turn) pair, in input traversal
//! order: groups outer, turns inner, no resorting and no deduplication
//! across groups. The API contract makes (item_id, turn_id) globally unique
//! per page.

use std::collections::HashMap;

use serde::Serialize;

use super::types::{ExperimentResult, ExperimentTurnPayload, FieldData, Index, ItemResult};

/// One comparable row: a (group, turn) pair across all compared experiments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperimentContrastItem {
    /// Composite `"<group_id>_<turn_id>"` key, unique per reconciliation.
    pub id: String,
    pub group_id: String,
    pub turn_id: String,
    pub group_index: i64,
    pub turn_index: i64,
    /// Canonical input row, taken from the first experiment's evaluation-set
    /// turn. Empty when the turn has no experiment results.
    pub dataset_row: HashMap<String, FieldData>,
    /// Each experiment's own input row, keyed by experiment id. Usually
    /// identical to `dataset_row`, kept separate in case inputs diverge.
    pub experiments_dataset_row: HashMap<String, HashMap<String, FieldData>>,
    /// Each experiment's turn payload, keyed by experiment id.
    pub experiment_results: HashMap<String, ExperimentTurnPayload>,
}

/// Key a field list by each field's `key` attribute. Fields without a key
/// collapse onto the empty string; duplicates are last-write-wins.
pub fn field_data_to_map(fields: &[FieldData]) -> HashMap<String, FieldData> {
    fields
        .iter()
        .map(|field| (field.key.clone().unwrap_or_default(), field.clone()))
        .collect()
}

fn experiment_dataset_row(experiment: &ExperimentResult) -> HashMap<String, FieldData> {
    experiment
        .payload
        .as_ref()
        .and_then(|payload| payload.eval_set.as_ref())
        .and_then(|eval_set| eval_set.turn.as_ref())
        .and_then(|turn| turn.field_data_list.as_deref())
        .map(field_data_to_map)
        .unwrap_or_default()
}

/// Flatten nested contrast results into row records.
///
/// Duplicate `experiment_id` within one turn is last-write-wins; the API is
/// expected never to produce one, so debug builds assert on it.
pub fn experiment_contrast_to_record_items(data: &[ItemResult]) -> Vec<ExperimentContrastItem> {
    let mut records = Vec::new();
    for group in data {
        let group_id = group.item_id.clone().unwrap_or_default();
        let group_index = group.item_index.as_ref().map_or(0, Index::as_ordinal);
        for turn in group.turn_results.as_deref().unwrap_or(&[]) {
            let turn_id = turn.turn_id.clone().unwrap_or_default();
            let turn_index = turn.turn_index.as_ref().map_or(0, Index::as_ordinal);
            let experiments = turn.experiment_results.as_deref().unwrap_or(&[]);

            let dataset_row = experiments
                .first()
                .map(experiment_dataset_row)
                .unwrap_or_default();

            let mut experiment_results = HashMap::new();
            let mut experiments_dataset_row = HashMap::new();
            for experiment in experiments {
                let experiment_id = experiment.experiment_id.clone().unwrap_or_default();
                experiments_dataset_row
                    .insert(experiment_id.clone(), experiment_dataset_row(experiment));
                let previous = experiment_results.insert(
                    experiment_id.clone(),
                    experiment.payload.clone().unwrap_or_default(),
                );
                debug_assert!(
                    previous.is_none(),
                    "duplicate experiment_id {experiment_id:?} within one turn"
                );
            }

            records.push(ExperimentContrastItem {
                id: format!("{group_id}_{turn_id}"),
                group_id: group_id.clone(),
                turn_id,
                group_index,
                turn_index,
                dataset_row,
                experiments_dataset_row,
                experiment_results,
            });
        }
    }
    records
}
