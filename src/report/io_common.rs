use feedback_engine::CellValue;

/// Types one raw cell the way the survey pipeline expects it: explicit
/// boolean markers become booleans, blanks become empty cells, everything
/// else stays text.
pub fn transform_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match trimmed.to_lowercase().as_str() {
        "true" | "yes" | "1" => CellValue::Bool(true),
        "false" | "no" | "0" => CellValue::Bool(false),
        _ => CellValue::Text(trimmed.to_string()),
    }
}
