use clap::Parser;

/// This program aggregates 360-degree feedback survey exports.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON job description with the survey name, the file sources and
    /// the output path. Command line flags override the corresponding fields.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, repeatable) A survey export to aggregate. When passed several times, the rows
    /// of all files are concatenated into one batch.
    #[clap(short, long, value_parser)]
    pub input: Vec<String>,

    /// (default csv) The type of the input files. See documentation for all the input types.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the survey will be written in
    /// JSON format to the given location. Setting this option overrides the path that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided,
    /// fbradar will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path) If specified, the serialized context document for a downstream insights model
    /// will be written to the given location. A failure to write it does not fail the run.
    #[clap(long, value_parser)]
    pub insights_context: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
