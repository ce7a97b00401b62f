use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use snafu::OptionExt;

use crate::config::*;

// The performer capture is greedy: with several bracketed groups, the category
// is the content of the last one.
static LABEL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\) (.+) \[(.+)\]").expect("the label pattern is valid"));

/// A scoring column, decoded from its label.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct PerformerCategory {
    pub performer: String,
    pub category: String,
}

/// What a column of the responses contains.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ColumnKind {
    /// Judge identity or timestamp.
    Metadata,
    /// A score given to a performer in a category.
    Scoring(PerformerCategory),
    /// Neither metadata nor a valid scoring label.
    Unrecognized,
}

/// Decodes a label of the form `N) Performer [Category]`.
///
/// The pattern may appear anywhere in the label; the first match is used.
pub fn parse_label(label: &str) -> Result<PerformerCategory, AggregationError> {
    let caps = LABEL_PATTERN
        .captures(label)
        .context(MalformedLabelSnafu { label })?;
    // Both groups are mandatory in the pattern.
    let performer = caps.get(1).context(MalformedLabelSnafu { label })?;
    let category = caps.get(2).context(MalformedLabelSnafu { label })?;
    Ok(PerformerCategory {
        performer: performer.as_str().to_string(),
        category: category.as_str().to_string(),
    })
}

/// Classifies a column before any parsing takes place.
///
/// Metadata labels are recognized first and never reach the label parser.
pub fn classify_column(label: &str, metadata: &MetadataLabels) -> ColumnKind {
    if metadata.is_metadata(label) {
        return ColumnKind::Metadata;
    }
    match parse_label(label) {
        Ok(pc) => ColumnKind::Scoring(pc),
        Err(e) => {
            debug!("classify_column: {}", e);
            ColumnKind::Unrecognized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(performer: &str, category: &str) -> PerformerCategory {
        PerformerCategory {
            performer: performer.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn parses_simple_label() {
        assert_eq!(parse_label("1) Alice [Song]").unwrap(), pc("Alice", "Song"));
        assert_eq!(
            parse_label("12) Loreen - Tattoo [Staging]").unwrap(),
            pc("Loreen - Tattoo", "Staging")
        );
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(
            parse_label("3)  Käärijä  [ Cha Cha Cha ]").unwrap(),
            pc(" Käärijä ", " Cha Cha Cha ")
        );
    }

    #[test]
    fn category_is_the_last_bracket() {
        assert_eq!(
            parse_label("4) Duo [feat. X] [Vocals]").unwrap(),
            pc("Duo [feat. X]", "Vocals")
        );
    }

    #[test]
    fn pattern_may_be_preceded_by_text() {
        assert_eq!(
            parse_label("Vote: 7) Bob [Outfit]").unwrap(),
            pc("Bob", "Outfit")
        );
    }

    #[test]
    fn rejects_garbage() {
        match parse_label("garbage") {
            Err(AggregationError::MalformedLabel { label }) => assert_eq!(label, "garbage"),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn rejects_missing_parts() {
        assert!(parse_label("Alice [Song]").is_err());
        assert!(parse_label("1) Alice").is_err());
        assert!(parse_label("1) [Song]").is_err());
        assert!(parse_label("x) Alice [Song]").is_err());
    }

    #[test]
    fn metadata_is_never_parsed() {
        let md = MetadataLabels::new("1) Judge [Name]", "Timestamp");
        // Would parse as a scoring label if it reached the parser.
        assert_eq!(classify_column("1) Judge [Name]", &md), ColumnKind::Metadata);
        assert_eq!(classify_column("Timestamp", &md), ColumnKind::Metadata);
        assert_eq!(classify_column("timestamp", &md), ColumnKind::Unrecognized);
        assert_eq!(
            classify_column("2) Bob [Song]", &md),
            ColumnKind::Scoring(pc("Bob", "Song"))
        );
    }
}
