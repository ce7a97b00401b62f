pub mod builder;
mod config;
pub mod grid;
mod label;
pub mod manual;

use indexmap::IndexMap;
use log::{debug, info};
use snafu::prelude::*;

pub use crate::config::*;
pub use crate::label::{classify_column, parse_label, ColumnKind, PerformerCategory};

/// The scores of each performer in each category.
///
/// Performers are kept in the order in which they were first seen, and so are
/// the categories of each performer.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct AggregationTable {
    performers: IndexMap<String, IndexMap<String, Score>>,
}

impl AggregationTable {
    pub fn new() -> AggregationTable {
        AggregationTable::default()
    }

    /// Adds a score, creating the performer and the category if needed.
    pub fn add(&mut self, performer: &str, category: &str, score: Score) {
        let scores = self
            .performers
            .entry(performer.to_string())
            .or_insert_with(IndexMap::new);
        *scores.entry(category.to_string()).or_insert(Score::ZERO) += score;
    }

    pub fn get(&self, performer: &str, category: &str) -> Option<Score> {
        self.performers
            .get(performer)
            .and_then(|scores| scores.get(category))
            .cloned()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, IndexMap<String, Score>> {
        self.performers.iter()
    }

    pub fn performers(&self) -> Vec<&str> {
        self.performers.keys().map(|s| s.as_str()).collect()
    }

    pub fn categories(&self, performer: &str) -> Option<Vec<&str>> {
        self.performers
            .get(performer)
            .map(|scores| scores.keys().map(|s| s.as_str()).collect())
    }

    /// The categories of the first performer, which are used for the header.
    pub fn first_categories(&self) -> Vec<&str> {
        self.performers
            .values()
            .next()
            .map(|scores| scores.keys().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.performers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.performers.is_empty()
    }

    /// Checks that every performer has the same categories, in the same order,
    /// as the first performer.
    pub fn check_consistent_categories(&self) -> Result<(), AggregationError> {
        let expected = self.first_categories();
        for (performer, scores) in self.performers.iter() {
            let found: Vec<&str> = scores.keys().map(|s| s.as_str()).collect();
            ensure!(
                found == expected,
                InconsistentCategoriesSnafu {
                    performer,
                    expected: to_strings(&expected),
                    found: to_strings(&found),
                }
            );
        }
        Ok(())
    }
}

fn to_strings(l: &[&str]) -> Vec<String> {
    l.iter().map(|s| s.to_string()).collect()
}

/// Sums the scores of all the responses.
///
/// Arguments:
/// * `rows` the responses, one per judge, in the order of the sheet
/// * `metadata` the labels of the columns that do not carry scores
pub fn aggregate(
    rows: &[ResponseRow],
    metadata: &MetadataLabels,
) -> Result<AggregationTable, AggregationError> {
    info!(
        "Processing {:?} responses, metadata columns: {:?}",
        rows.len(),
        metadata
    );
    let mut b = builder::Builder::new(metadata);
    for row in rows.iter() {
        b.add_row(row)?;
    }
    debug!("aggregate: {} rows added", b.rows_seen());
    let table = b.build();
    {
        info!("Processed {:?} performers", table.len());
        for (performer, scores) in table.iter() {
            info!("Performer: {}: {:?}", performer, scores);
        }
    }
    Ok(table)
}
