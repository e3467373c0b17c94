// Primitives for reading CSV survey exports.

use std::io::Read;

use log::debug;
use snafu::prelude::*;

use feedback_engine::FeedbackRow;

use crate::report::{io_common::transform_cell, *};

pub fn read_rows(path: &str) -> ReportResult<Vec<FeedbackRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    rows_from_reader(rdr)
}

pub fn read_rows_from_reader<R: Read>(input: R) -> ReportResult<Vec<FeedbackRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    rows_from_reader(rdr)
}

fn rows_from_reader<R: Read>(rdr: csv::Reader<R>) -> ReportResult<Vec<FeedbackRow>> {
    let mut records = rdr.into_records();

    // The first record carries the column headers.
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .context(CsvRecordSnafu { lineno: 1usize })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect(),
        None => return Ok(Vec::new()),
    };
    debug!("rows_from_reader: headers: {:?}", headers);

    let mut res: Vec<FeedbackRow> = Vec::new();
    for (idx, record_r) in records.enumerate() {
        let lineno = idx + 2;
        let record = record_r.context(CsvRecordSnafu { lineno })?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let mut row = FeedbackRow::new();
        for (col, header) in headers.iter().enumerate() {
            // Records may be shorter than the header row; missing trailing
            // cells are blanks.
            let raw = record.get(col).unwrap_or("");
            row.push(header, transform_cell(raw));
        }
        debug!("rows_from_reader: lineno: {:?} row: {:?}", lineno, &row);
        res.push(row);
    }
    Ok(res)
}
