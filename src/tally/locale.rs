// The user-facing labels of each supported language.

use score_tally::MetadataLabels;

use crate::tally::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct LocaleLabels {
    pub code: &'static str,
    /// Label of the column with the name of the judge.
    pub judge: &'static str,
    /// Label of the column with the submission time of the response.
    pub timestamp: &'static str,
    /// Title of the worksheet that receives the results.
    pub results_title: &'static str,
    pub index_header: &'static str,
    pub performer_header: &'static str,
}

impl LocaleLabels {
    pub fn metadata(&self) -> MetadataLabels {
        MetadataLabels::new(self.judge, self.timestamp)
    }
}

pub const DEFAULT_LANGUAGE: &str = "sl";

pub const LOCALES: &[LocaleLabels] = &[
    LocaleLabels {
        code: "sl",
        judge: "Ocenjevalec:",
        timestamp: "Timestamp",
        results_title: "Results",
        index_header: "No.",
        performer_header: "Izvajalec",
    },
    LocaleLabels {
        code: "en",
        judge: "Judge:",
        timestamp: "Timestamp",
        results_title: "Results",
        index_header: "No.",
        performer_header: "Performer",
    },
];

pub fn lookup_locale(code: &str) -> TallyResult<&'static LocaleLabels> {
    LOCALES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code))
        .context(UnsupportedLocaleSnafu {
            code,
            supported: supported_codes(),
        })
}

fn supported_codes() -> String {
    LOCALES
        .iter()
        .map(|l| l.code)
        .collect::<Vec<&str>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_language_exists() {
        assert_eq!(lookup_locale(DEFAULT_LANGUAGE).unwrap().judge, "Ocenjevalec:");
    }

    #[test]
    fn slovenian_form_labels() {
        let sl = lookup_locale("sl").unwrap();
        assert_eq!(sl.results_title, "Results");
        assert_eq!(sl.index_header, "No.");
        assert_eq!(sl.performer_header, "Izvajalec");
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup_locale("EN").unwrap().results_title, "Results");
    }

    #[test]
    fn unknown_language() {
        let e = lookup_locale("fr").unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Configuration);
        assert_eq!(
            e.to_string(),
            "Unsupported language \"fr\" (supported: sl, en)"
        );
    }
}
