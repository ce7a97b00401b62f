use clap::Parser;

/// Sums the scores of a song contest judging form and writes them to a results worksheet.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (name or file path) The spreadsheet holding the form responses. The .xlsx extension is added if missing.
    /// Setting this option overrides the spreadsheet that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub spreadsheet: Option<String>,

    /// (default sl) The language of the form, which sets the labels of the judge column and of the results.
    /// Supported languages: sl, en.
    #[clap(short, long, value_parser)]
    pub language: Option<String>,

    /// (default 'Form Responses') The worksheet containing the responses.
    #[clap(short, long, value_parser)]
    pub worksheet: Option<String>,

    /// (file path, optional) A JSON file with the settings of the run. For more information about the
    /// file format, read the documentation of the score_tally::manual module.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) Where to write the workbook with the results. By default it is written next to
    /// the spreadsheet as '<name> (results).xlsx', and the spreadsheet itself is not modified.
    #[clap(long, value_parser)]
    pub save_as: Option<String>,

    /// (file path, 'stdout' or empty) If specified, a summary of the results will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a summary of the results in JSON format. If provided, esc_tally will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, every performer must be scored in the same categories as the first one.
    #[clap(long, takes_value = false)]
    pub check_categories: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
