use log::debug;
use snafu::prelude::*;

use crate::config::*;
use crate::label::*;
use crate::AggregationTable;

/// Accumulates the responses one row at a time.
///
/// ```
/// use score_tally::builder::Builder;
/// use score_tally::{CellValue, MetadataLabels, ResponseRow, Score};
/// # use score_tally::AggregationError;
///
/// let mut builder = Builder::new(&MetadataLabels::new("Judge:", "Timestamp"));
///
/// let row: ResponseRow = [
///     ("Judge:".to_string(), CellValue::from("Ana")),
///     ("1) Alice [Song]".to_string(), CellValue::Int(8)),
/// ]
/// .into_iter()
/// .collect();
/// builder.add_row(&row)?;
/// builder.add_row(&row)?;
///
/// let table = builder.build();
/// assert_eq!(table.get("Alice", "Song"), Some(Score::Int(16)));
/// # Ok::<(), AggregationError>(())
/// ```
pub struct Builder {
    metadata: MetadataLabels,
    table: AggregationTable,
    rows_seen: usize,
}

impl Builder {
    pub fn new(metadata: &MetadataLabels) -> Builder {
        Builder {
            metadata: metadata.clone(),
            table: AggregationTable::new(),
            rows_seen: 0,
        }
    }

    /// Adds all the scores of one response to the table.
    ///
    /// Fails on the first column that is neither metadata nor a valid scoring
    /// label, or on the first scoring cell that is not a number. The table is
    /// left partially updated in that case and should be discarded.
    pub fn add_row(&mut self, row: &ResponseRow) -> Result<(), AggregationError> {
        self.rows_seen += 1;
        let row_no = self.rows_seen;
        for (label, value) in row.iter() {
            let pc = match classify_column(label, &self.metadata) {
                ColumnKind::Metadata => continue,
                ColumnKind::Scoring(pc) => pc,
                ColumnKind::Unrecognized => {
                    return MalformedLabelSnafu { label }.fail();
                }
            };
            let score = value.as_score().with_context(|| TypeMismatchSnafu {
                row: row_no,
                column: label,
                content: value.to_string(),
            })?;
            debug!(
                "add_row: row {}: {:?} / {:?} += {}",
                row_no, pc.performer, pc.category, score
            );
            self.table.add(&pc.performer, &pc.category, score);
        }
        Ok(())
    }

    /// The number of rows added so far.
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    pub fn build(self) -> AggregationTable {
        self.table
    }
}
