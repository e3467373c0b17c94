// Primitives for reading Excel survey exports.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use feedback_engine::{CellValue, FeedbackRow};

use crate::report::{io_common::transform_cell, *};

pub fn read_rows(path: &str, worksheet_name: Option<&str>) -> ReportResult<Vec<FeedbackRow>> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header = match iter.next() {
        Some(h) => h,
        None => return Ok(Vec::new()),
    };
    debug!("read_rows: header: {:?}", header);
    let headers: Vec<String> = header.iter().map(header_text).collect();

    let mut res: Vec<FeedbackRow> = Vec::new();
    for row in iter {
        let mut out = FeedbackRow::new();
        for (col, header) in headers.iter().enumerate() {
            let cell = row.get(col).map(read_cell).unwrap_or(CellValue::Empty);
            out.push(header, cell);
        }
        if out.cells.iter().all(|(_, c)| *c == CellValue::Empty) {
            continue;
        }
        res.push(out);
    }
    Ok(res)
}

fn header_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        _ => String::new(),
    }
}

fn read_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(s) => transform_cell(s),
        DataType::Bool(b) => CellValue::Bool(*b),
        // Checkbox columns export as numeric 1/0.
        DataType::Float(f) if *f == 1.0 => CellValue::Bool(true),
        DataType::Float(f) if *f == 0.0 => CellValue::Bool(false),
        DataType::Float(f) => CellValue::Text(f.to_string()),
        DataType::Int(1) => CellValue::Bool(true),
        DataType::Int(0) => CellValue::Bool(false),
        DataType::Int(i) => CellValue::Text(i.to_string()),
        DataType::Empty => CellValue::Empty,
        other => CellValue::Text(format!("{:?}", other)),
    }
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> ReportResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(name) = worksheet_name {
        let wrange = workbook
            .worksheet_range(name)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?;
        return Ok(wrange);
    }
    let all_worksheets = workbook.worksheets();
    match all_worksheets.as_slice() {
        [] => EmptyExcelSnafu {}.fail(),
        [(name, wrange)] => {
            debug!("get_range: using single worksheet {:?}", name);
            Ok(wrange.clone())
        }
        _ => MissingWorksheetNameSnafu {}.fail(),
    }
}
