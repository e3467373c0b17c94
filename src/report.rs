use log::{debug, info, warn};

use feedback_engine::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::report::config_reader::*;

pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening survey export {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading record at line {lineno}"))]
    CsvRecord { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook contains no usable worksheet"))]
    EmptyExcel {},
    #[snafu(display(
        "The workbook has several worksheets, the worksheet name must be provided"
    ))]
    MissingWorksheetName {},
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing output {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No input files: pass --input or a configuration with fileSources"))]
    MissingInput {},
    #[snafu(display(""))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

pub mod config_reader {
    use crate::report::*;

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct FileSource {
        pub provider: String,
        #[serde(rename = "filePath")]
        pub file_path: String,
        #[serde(rename = "excelWorksheetName")]
        pub excel_worksheet_name: Option<String>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct ReportConfig {
        #[serde(rename = "surveyName")]
        pub survey_name: Option<String>,
        #[serde(rename = "fileSources")]
        pub file_sources: Vec<FileSource>,
        #[serde(rename = "outputPath")]
        pub output_path: Option<String>,
    }

    pub fn read_config(path: &str) -> ReportResult<ReportConfig> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
        let config: ReportConfig =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        debug!("read_config: {:?}", config);
        Ok(config)
    }
}

/// Assembles the JSON document consumed by the charting layer.
fn summary_to_json(summary: &FeedbackSummary, survey_name: Option<&str>) -> JSValue {
    let mut radar_points: Vec<JSValue> = Vec::new();
    for point in summary.radar.points.iter() {
        let mut collaborators: JSMap<String, JSValue> = JSMap::new();
        for (name, score) in point.collaborator_scores.iter() {
            collaborators.insert(name.clone(), json!(score));
        }
        radar_points.push(json!({
            "competency": point.competency.label(),
            "collaborators": collaborators
        }));
    }

    let strengths: Vec<JSValue> = summary
        .strengths
        .iter()
        .map(|p| {
            json!({
                "name": p.category.label(),
                "needsImprovement": p.needs_improvement,
                "asExpected": p.as_expected,
                "exceeds": p.exceeds
            })
        })
        .collect();

    let ratings: Vec<JSValue> = summary
        .ratings
        .iter()
        .map(|p| {
            json!({
                "name": p.label,
                "value": p.percentage,
                "color": p.color
            })
        })
        .collect();

    let mut top: JSMap<String, JSValue> = JSMap::new();
    if let Some(name) = survey_name {
        top.insert("surveyName".to_string(), json!(name));
    }
    top.insert(
        "radar".to_string(),
        json!({
            "data": radar_points,
            "membersWithNoRatings": summary.radar.members_with_no_ratings
        }),
    );
    top.insert("strengths".to_string(), JSValue::Array(strengths));
    top.insert("ratings".to_string(), JSValue::Array(ratings));
    JSValue::Object(top)
}

/// Builds the context document handed to the (external) insights model.
/// Producing the document is pure; calling a model with it is not this
/// program's job.
pub fn build_insights_context(summary_js: &JSValue) -> String {
    format!(
        "Analyze this 360-degree feedback data and provide key insights:\n\
         \n\
         Radar Chart Data (Team competencies by member): {}\n\
         Bar Chart Data (Strength categories): {}\n\
         Pie Chart Data (Overall performance distribution): {}\n\
         \n\
         Please provide:\n\
         1. Top performing areas and team members\n\
         2. Areas that need improvement\n\
         3. Notable patterns and trends\n\
         4. Specific recommendations for team development\n\
         5. Overall team performance summary\n",
        summary_js["radar"], summary_js["strengths"], summary_js["ratings"]
    )
}

fn read_summary(path: &str) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn gather_sources(args: &Args, config: Option<&(ReportConfig, String)>) -> ReportResult<Vec<(FileSource, PathBuf)>> {
    let mut sources: Vec<(FileSource, PathBuf)> = Vec::new();
    if !args.input.is_empty() {
        let provider = args.input_type.clone().unwrap_or_else(|| "csv".to_string());
        for path in args.input.iter() {
            sources.push((
                FileSource {
                    provider: provider.clone(),
                    file_path: path.clone(),
                    excel_worksheet_name: args.excel_worksheet_name.clone(),
                },
                PathBuf::new(),
            ));
        }
    } else if let Some((config, config_path)) = config {
        // Paths in the configuration are relative to the configuration file.
        let root = Path::new(config_path.as_str())
            .parent()
            .context(MissingParentDirSnafu {})?;
        for source in config.file_sources.iter() {
            sources.push((source.clone(), root.to_path_buf()));
        }
    }
    ensure!(!sources.is_empty(), MissingInputSnafu);
    Ok(sources)
}

pub fn run_report(args: &Args) -> ReportResult<()> {
    let config: Option<(ReportConfig, String)> = match &args.config {
        Some(path) => Some((read_config(path)?, path.clone())),
        None => None,
    };

    let sources = gather_sources(args, config.as_ref())?;

    let mut rows: Vec<FeedbackRow> = Vec::new();
    for (source, root) in sources.iter() {
        let p: PathBuf = root.join(&source.file_path);
        let p2 = p.as_path().display().to_string();
        info!("Attempting to read survey export {:?}", p2);
        let mut file_rows = match source.provider.as_str() {
            "csv" => io_csv::read_rows(&p2)?,
            "xlsx" => io_xlsx::read_rows(&p2, source.excel_worksheet_name.as_deref())?,
            x => {
                whatever!("Provider not implemented {:?}", x)
            }
        };
        rows.append(&mut file_rows);
    }

    info!("Read {:?} rows from {:?} sources", rows.len(), sources.len());

    let summary = run_feedback_stats(&rows, &FeedbackRules::DEFAULT_RULES);

    let survey_name = config.as_ref().and_then(|(c, _)| c.survey_name.clone());
    let result_js = summary_to_json(&summary, survey_name.as_deref());
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let out_target = args
        .out
        .clone()
        .or_else(|| config.as_ref().and_then(|(c, _)| c.output_path.clone()));
    match out_target.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, &pretty_js_stats).context(WritingOutputSnafu { path })?;
            info!("Summary written to {:?}", path);
        }
    }

    if let Some(path) = &args.insights_context {
        let context = build_insights_context(&result_js);
        // The insights model is a decoupled collaborator: failing to hand it
        // its context must not fail the aggregation run.
        if let Err(e) = fs::write(path, context) {
            warn!("Could not write insights context to {:?}: {}", path, e);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        let summary_ref = read_summary(reference_path)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::io_common::transform_cell;

    #[test]
    fn cell_transform_recognizes_boolean_markers() {
        assert_eq!(transform_cell("true"), CellValue::Bool(true));
        assert_eq!(transform_cell("Yes"), CellValue::Bool(true));
        assert_eq!(transform_cell("1"), CellValue::Bool(true));
        assert_eq!(transform_cell("FALSE"), CellValue::Bool(false));
        assert_eq!(transform_cell("no"), CellValue::Bool(false));
        assert_eq!(transform_cell("0"), CellValue::Bool(false));
        assert_eq!(transform_cell(""), CellValue::Empty);
        assert_eq!(transform_cell("   "), CellValue::Empty);
        assert_eq!(
            transform_cell(" Supera as expectativas "),
            CellValue::Text("Supera as expectativas".to_string())
        );
    }

    #[test]
    fn csv_rows_keep_header_order_and_typing() {
        let data = "\
Comunicação clara >> Ana,Pontos fortes >> Excelente domínio técnico da área,Submission Date
Supera as expectativas,1,2024-06-01
";
        let rows = io_csv::read_rows_from_reader(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[0].0, "Comunicação clara >> Ana");
        assert_eq!(
            rows[0].cells[0].1,
            CellValue::Text("Supera as expectativas".to_string())
        );
        assert_eq!(rows[0].cells[1].1, CellValue::Bool(true));
        assert_eq!(
            rows[0].cells[2].1,
            CellValue::Text("2024-06-01".to_string())
        );
    }

    #[test]
    fn csv_headers_are_trimmed() {
        let data = "  Cooperação >> Ana  \nAtende às expectativas\n";
        let rows = io_csv::read_rows_from_reader(data.as_bytes()).unwrap();
        assert_eq!(rows[0].cells[0].0, "Cooperação >> Ana");
    }

    #[test]
    fn short_csv_records_pad_with_empty_cells() {
        let data = "a >> x,b >> y,c >> z\nfoo,bar\n";
        let rows = io_csv::read_rows_from_reader(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[2].1, CellValue::Empty);
    }

    #[test]
    fn blank_csv_lines_are_skipped() {
        let data = "a >> x\nfoo\n\nbar\n";
        let rows = io_csv::read_rows_from_reader(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn empty_csv_input_yields_no_rows() {
        let rows = io_csv::read_rows_from_reader("".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn config_parses_camel_case_fields() {
        let js = r#"{
            "surveyName": "Retro Q2",
            "fileSources": [
                {"provider": "csv", "filePath": "retro.csv"},
                {"provider": "xlsx", "filePath": "retro.xlsx", "excelWorksheetName": "Form1"}
            ],
            "outputPath": "out.json"
        }"#;
        let config: ReportConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.survey_name.as_deref(), Some("Retro Q2"));
        assert_eq!(config.file_sources.len(), 2);
        assert_eq!(config.file_sources[0].provider, "csv");
        assert_eq!(
            config.file_sources[1].excel_worksheet_name.as_deref(),
            Some("Form1")
        );
        assert_eq!(config.output_path.as_deref(), Some("out.json"));
    }

    #[test]
    fn summary_json_follows_the_chart_contract() {
        let data = "\
Comunicação clara >> Ana,Comunicação clara >> Bruno
Supera as expectativas,Não se aplica
Atende às expectativas,N/A
";
        let rows = io_csv::read_rows_from_reader(data.as_bytes()).unwrap();
        let summary = run_feedback_stats(&rows, &FeedbackRules::DEFAULT_RULES);
        let js = summary_to_json(&summary, Some("Retro Q2"));

        assert_eq!(js["surveyName"], json!("Retro Q2"));
        let radar = js["radar"]["data"].as_array().unwrap();
        assert_eq!(radar.len(), 5);
        let comm = radar
            .iter()
            .find(|p| p["competency"] == json!("Comunicação"))
            .unwrap();
        assert_eq!(comm["collaborators"]["Ana"], json!(2.5));
        assert_eq!(
            js["radar"]["membersWithNoRatings"],
            json!(["Bruno"])
        );
        assert_eq!(js["strengths"].as_array().unwrap().len(), 5);
        assert_eq!(js["ratings"].as_array().unwrap().len(), 3);
        let total: f64 = js["ratings"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["value"].as_f64().unwrap())
            .sum();
        assert!((total - 100.0).abs() < 0.05);
    }

    #[test]
    fn insights_context_embeds_the_three_aggregates() {
        let summary = run_feedback_stats(&[], &FeedbackRules::DEFAULT_RULES);
        let js = summary_to_json(&summary, None);
        let context = build_insights_context(&js);
        assert!(context.contains("Radar Chart Data"));
        assert!(context.contains("Strength categories"));
        assert!(context.contains("membersWithNoRatings"));
        assert!(context.contains("Specific recommendations"));
    }
}
