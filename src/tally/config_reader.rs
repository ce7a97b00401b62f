use crate::args::Args;
use crate::tally::locale::{lookup_locale, DEFAULT_LANGUAGE};
use crate::tally::*;

pub const DEFAULT_RESPONSES_WORKSHEET: &str = "Form Responses";
pub const DEFAULT_OUTPUT_ROWS: u32 = 100;
pub const DEFAULT_OUTPUT_COLUMNS: u32 = 20;

/// The optional JSON configuration file. Every field may also be given on the
/// command line, which takes precedence.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TallyConfig {
    pub spreadsheet: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "responsesWorksheet")]
    pub responses_worksheet: Option<String>,
    #[serde(rename = "outputRows")]
    pub output_rows: Option<u32>,
    #[serde(rename = "outputColumns")]
    pub output_columns: Option<u32>,
    #[serde(rename = "saveAs")]
    pub save_as: Option<String>,
    #[serde(rename = "checkCategories")]
    pub check_categories: Option<bool>,
}

/// Everything a run needs, resolved once at startup and passed along.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub spreadsheet: String,
    pub workbook_path: PathBuf,
    pub language: String,
    pub responses_worksheet: String,
    pub output_rows: u32,
    pub output_columns: u32,
    pub save_as: Option<PathBuf>,
    pub check_categories: bool,
    pub out: Option<String>,
    pub reference: Option<String>,
}

impl RunSettings {
    /// Reads the configuration file, if any, and merges it with the arguments.
    pub fn from_args(args: &Args) -> TallyResult<RunSettings> {
        match &args.config {
            Some(config_path) => {
                let config = read_config(config_path)?;
                let config_dir = Path::new(config_path.as_str()).parent();
                RunSettings::resolve(args, &config, config_dir)
            }
            None => RunSettings::resolve(args, &TallyConfig::default(), None),
        }
    }

    /// Merges the arguments and the configuration. The paths that come from the
    /// configuration file are relative to `config_dir`.
    pub fn resolve(
        args: &Args,
        config: &TallyConfig,
        config_dir: Option<&Path>,
    ) -> TallyResult<RunSettings> {
        let (spreadsheet, workbook_path) = match (&args.spreadsheet, &config.spreadsheet) {
            (Some(s), _) => (s.clone(), workbook_path(s, None)),
            (None, Some(s)) => (s.clone(), workbook_path(s, config_dir)),
            (None, None) => return MissingSpreadsheetSnafu {}.fail(),
        };

        let language = args
            .language
            .clone()
            .or_else(|| config.language.clone())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        // Fail early, before touching the spreadsheet.
        lookup_locale(&language)?;

        let save_as = match (&args.save_as, &config.save_as) {
            (Some(p), _) => Some(PathBuf::from(p)),
            (None, Some(p)) => Some(relative_to(p, config_dir)),
            (None, None) => None,
        };

        Ok(RunSettings {
            spreadsheet,
            workbook_path,
            language,
            responses_worksheet: args
                .worksheet
                .clone()
                .or_else(|| config.responses_worksheet.clone())
                .unwrap_or_else(|| DEFAULT_RESPONSES_WORKSHEET.to_string()),
            output_rows: config.output_rows.unwrap_or(DEFAULT_OUTPUT_ROWS),
            output_columns: config.output_columns.unwrap_or(DEFAULT_OUTPUT_COLUMNS),
            save_as,
            check_categories: args.check_categories || config.check_categories.unwrap_or(false),
            out: args.out.clone(),
            reference: args.reference.clone(),
        })
    }
}

impl RunSettings {
    /// Where the workbook with the results is saved: `--save-as` if given,
    /// otherwise a new file next to the spreadsheet, which is left untouched.
    pub fn output_path(&self) -> PathBuf {
        match &self.save_as {
            Some(p) => p.clone(),
            None => results_workbook_path(&self.workbook_path),
        }
    }
}

/// `ESC 2023.xlsx` gives `ESC 2023 (results).xlsx`, in the same directory.
pub fn results_workbook_path(workbook: &Path) -> PathBuf {
    let stem = workbook
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    workbook.with_file_name(format!("{} (results).xlsx", stem))
}

/// The workbook file behind a spreadsheet name: `ESC 2023` is `ESC 2023.xlsx`.
pub fn workbook_path(spreadsheet: &str, root: Option<&Path>) -> PathBuf {
    let has_extension = Path::new(spreadsheet)
        .extension()
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    let file_name = if has_extension {
        spreadsheet.to_string()
    } else {
        format!("{}.xlsx", spreadsheet)
    };
    relative_to(&file_name, root)
}

fn relative_to(p: &str, root: Option<&Path>) -> PathBuf {
    match root {
        Some(r) => r.join(p),
        None => PathBuf::from(p),
    }
}

pub fn read_config(path: &str) -> TallyResult<TallyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    let config: TallyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    info!("config: {:?}", config);
    Ok(config)
}

/// Reads a summary previously written with `--out`.
pub fn read_summary(path: &str) -> TallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(l: &[&str]) -> Args {
        let mut all = vec!["esc_tally"];
        all.extend_from_slice(l);
        Args::parse_from(all)
    }

    #[test]
    fn defaults() {
        let s = RunSettings::resolve(&args(&["-s", "ESC 2023"]), &TallyConfig::default(), None)
            .unwrap();
        assert_eq!(s.spreadsheet, "ESC 2023");
        assert_eq!(s.workbook_path, PathBuf::from("ESC 2023.xlsx"));
        assert_eq!(s.language, "sl");
        assert_eq!(s.responses_worksheet, "Form Responses");
        assert_eq!((s.output_rows, s.output_columns), (100, 20));
        assert_eq!(s.save_as, None);
        assert_eq!(s.output_path(), PathBuf::from("ESC 2023 (results).xlsx"));
        assert!(!s.check_categories);
    }

    #[test]
    fn results_next_to_the_spreadsheet() {
        assert_eq!(
            results_workbook_path(&Path::new("contest").join("ESC 2023.xlsx")),
            Path::new("contest").join("ESC 2023 (results).xlsx")
        );
        let s = RunSettings::resolve(
            &args(&["-s", "ESC 2023", "--save-as", "ESC 2023.xlsx"]),
            &TallyConfig::default(),
            None,
        )
        .unwrap();
        // Saving in place is still possible, but only when asked for.
        assert_eq!(s.output_path(), s.workbook_path);
    }

    #[test]
    fn explicit_extension_is_kept() {
        assert_eq!(
            workbook_path("votes.XLSX", Some(Path::new("data"))),
            Path::new("data").join("votes.XLSX")
        );
    }

    #[test]
    fn arguments_override_config() {
        let config: TallyConfig = serde_json::from_str(
            r#"{
                "spreadsheet": "ESC 2023",
                "language": "en",
                "responsesWorksheet": "Odgovori",
                "outputRows": 300,
                "saveAs": "out.xlsx",
                "checkCategories": true
            }"#,
        )
        .unwrap();
        let dir = Path::new("contest");

        let s = RunSettings::resolve(&args(&[]), &config, Some(dir)).unwrap();
        assert_eq!(s.workbook_path, dir.join("ESC 2023.xlsx"));
        assert_eq!(s.language, "en");
        assert_eq!(s.responses_worksheet, "Odgovori");
        assert_eq!((s.output_rows, s.output_columns), (300, 20));
        assert_eq!(s.save_as, Some(dir.join("out.xlsx")));
        assert!(s.check_categories);

        let s = RunSettings::resolve(
            &args(&["-s", "other", "-l", "sl", "-w", "Sheet1", "--save-as", "x.xlsx"]),
            &config,
            Some(dir),
        )
        .unwrap();
        assert_eq!(s.workbook_path, PathBuf::from("other.xlsx"));
        assert_eq!(s.language, "sl");
        assert_eq!(s.responses_worksheet, "Sheet1");
        assert_eq!(s.save_as, Some(PathBuf::from("x.xlsx")));
    }

    #[test]
    fn missing_spreadsheet() {
        let e = RunSettings::resolve(&args(&[]), &TallyConfig::default(), None).unwrap_err();
        assert!(matches!(e, TallyError::MissingSpreadsheet {}));
        assert_eq!(e.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn unsupported_language_is_caught_early() {
        let e = RunSettings::resolve(
            &args(&["-s", "does not exist", "-l", "xx"]),
            &TallyConfig::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(e, TallyError::UnsupportedLocale { .. }));
    }

    #[test]
    fn missing_config_file() {
        let e = read_config("/nonexistent/esc_tally.json").unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Configuration);
    }
}
