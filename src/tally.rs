use log::{debug, info, warn};

use score_tally::grid::serialize_table;
use score_tally::*;
use snafu::prelude::*;

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Reader, Xlsx};

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
pub mod emit;
mod io_common;
pub mod io_xlsx;
pub mod locale;
pub mod sheets;

use crate::tally::config_reader::*;
use crate::tally::emit::{emit_grid, Capacity};
use crate::tally::locale::*;
use crate::tally::sheets::{RowSource, SheetWriter, WorksheetCreator};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TallyError {
    #[snafu(display("Unsupported language {code:?} (supported: {supported})"))]
    UnsupportedLocale { code: String, supported: String },
    #[snafu(display("No spreadsheet given: pass --spreadsheet or set it in the config file"))]
    MissingSpreadsheet {},
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },

    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Error saving workbook {path}"))]
    SavingExcel {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name:?} not found"))]
    MissingWorksheet { name: String },
    #[snafu(display("Worksheet {name:?} is empty"))]
    EmptyWorksheet { name: String },
    #[snafu(display("Worksheet {name:?} has several columns labeled {label:?}"))]
    DuplicateHeader { name: String, label: String },
    #[snafu(display(
        "Range {range} does not fit in worksheet {worksheet:?} ({rows} rows, {cols} columns)"
    ))]
    RangeOutOfBounds {
        worksheet: String,
        range: String,
        rows: u32,
        cols: u32,
    },
    #[snafu(display("The values written to {range} in worksheet {worksheet:?} do not have the shape of the range"))]
    RegionShape { worksheet: String, range: String },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingSummary { source: serde_json::Error },

    #[snafu(display("A worksheet titled {title:?} already exists"))]
    DuplicateWorksheet { title: String },

    #[snafu(display("Error aggregating the responses"))]
    Aggregation { source: AggregationError },

    #[snafu(display("The results differ from the reference summary {path}"))]
    ReferenceMismatch { path: String },
}

pub type TallyResult<T> = Result<T, TallyError>;

/// The families of errors, as reported to the user.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ErrorKind {
    Configuration,
    MalformedLabel,
    TypeMismatch,
    InconsistentCategories,
    ExternalService,
    DuplicateWorksheet,
    ReferenceMismatch,
}

impl ErrorKind {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::MalformedLabel => 3,
            ErrorKind::TypeMismatch => 4,
            ErrorKind::InconsistentCategories => 5,
            ErrorKind::ExternalService => 6,
            ErrorKind::DuplicateWorksheet => 7,
            ErrorKind::ReferenceMismatch => 8,
        }
    }
}

impl TallyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TallyError::UnsupportedLocale { .. }
            | TallyError::MissingSpreadsheet {}
            | TallyError::OpeningJson { .. }
            | TallyError::ParsingJson { .. } => ErrorKind::Configuration,
            TallyError::OpeningExcel { .. }
            | TallyError::SavingExcel { .. }
            | TallyError::MissingWorksheet { .. }
            | TallyError::EmptyWorksheet { .. }
            | TallyError::DuplicateHeader { .. }
            | TallyError::RangeOutOfBounds { .. }
            | TallyError::RegionShape { .. }
            | TallyError::WritingSummary { .. }
            | TallyError::SerializingSummary { .. } => ErrorKind::ExternalService,
            TallyError::DuplicateWorksheet { .. } => ErrorKind::DuplicateWorksheet,
            TallyError::Aggregation { source } => match source {
                AggregationError::MalformedLabel { .. } => ErrorKind::MalformedLabel,
                AggregationError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
                AggregationError::InconsistentCategories { .. } => {
                    ErrorKind::InconsistentCategories
                }
            },
            TallyError::ReferenceMismatch { .. } => ErrorKind::ReferenceMismatch,
        }
    }
}

fn score_to_json(score: &Score) -> JSValue {
    match score {
        Score::Int(i) => json!(i),
        Score::Real(f) => json!(f),
    }
}

fn table_to_json(table: &AggregationTable) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for (idx, (performer, scores)) in table.iter().enumerate() {
        let mut js_scores: JSMap<String, JSValue> = JSMap::new();
        for (category, score) in scores.iter() {
            js_scores.insert(category.clone(), score_to_json(score));
        }
        l.push(json!({"no": idx + 1, "performer": performer, "scores": js_scores}));
    }
    l
}

fn build_summary_js(
    settings: &RunSettings,
    labels: &LocaleLabels,
    table: &AggregationTable,
) -> JSValue {
    json!({
        "config": {
            "spreadsheet": settings.spreadsheet,
            "responsesWorksheet": settings.responses_worksheet,
            "resultsWorksheet": labels.results_title,
            "language": labels.code,
        },
        "results": table_to_json(table)
    })
}

/// Reads the responses, sums the scores and writes them to the results worksheet.
///
/// This is the whole run, minus loading and saving the spreadsheet.
pub fn tabulate<B: RowSource + SheetWriter + WorksheetCreator>(
    book: &mut B,
    settings: &RunSettings,
    labels: &LocaleLabels,
) -> TallyResult<AggregationTable> {
    let rows = book.get_all_records(&settings.responses_worksheet)?;
    let table = aggregate(&rows, &labels.metadata()).context(AggregationSnafu {})?;
    if settings.check_categories {
        table
            .check_consistent_categories()
            .context(AggregationSnafu {})?;
    }
    let grid = serialize_table(&table, labels.index_header, labels.performer_header);
    emit_grid(
        book,
        &grid,
        labels.results_title,
        Capacity {
            rows: settings.output_rows,
            cols: settings.output_columns,
        },
    )?;
    Ok(table)
}

fn write_summary(out: &str, summary: &str) -> TallyResult<()> {
    if out == "stdout" {
        println!("{}", summary);
    } else {
        fs::write(out, summary).context(WritingSummarySnafu { path: out })?;
        info!("Summary written to {:?}", out);
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> TallyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(SerializingSummarySnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("The results match the reference summary");
    Ok(())
}

pub fn run_tally(settings: &RunSettings) -> TallyResult<()> {
    let labels = lookup_locale(&settings.language)?;
    info!("settings: {:?}", settings);
    info!("labels: {:?}", labels);

    let mut book = io_xlsx::load_workbook(&settings.workbook_path)?;
    let table = tabulate(&mut book, settings, labels)?;

    io_xlsx::save_workbook(&book, &settings.output_path())?;

    let summary_js = build_summary_js(settings, labels, &table);
    let pretty_js_stats =
        serde_json::to_string_pretty(&summary_js).context(SerializingSummarySnafu {})?;
    if let Some(out) = &settings.out {
        write_summary(out, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }

    Ok(())
}
