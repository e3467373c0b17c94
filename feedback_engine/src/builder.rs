pub use crate::config::*;
use crate::run_feedback_stats;

/// A builder for assembling survey rows programmatically.
///
/// Most callers read rows from a file and call
/// [`run_feedback_stats`](crate::run_feedback_stats) directly; the builder is
/// for code that produces rows itself.
///
/// ```
/// pub use feedback_engine::builder::Builder;
/// pub use feedback_engine::FeedbackRules;
///
/// let mut builder = Builder::new(&FeedbackRules::DEFAULT_RULES);
///
/// builder.add_row_text(&[
///     ("Comunicação clara >> Ana", "Supera as expectativas"),
///     ("Comunicação clara >> Bruno", "Atende às expectativas"),
/// ]);
/// builder.add_row_text(&[("Comunicação clara >> Ana", "Atende às expectativas")]);
///
/// let summary = builder.finish();
/// assert_eq!(summary.radar.points.len(), 5);
/// ```
pub struct Builder {
    pub(crate) _rules: FeedbackRules,
    pub(crate) _rows: Vec<FeedbackRow>,
}

impl Builder {
    pub fn new(rules: &FeedbackRules) -> Builder {
        Builder {
            _rules: rules.clone(),
            _rows: Vec::new(),
        }
    }

    /// Adds one already-assembled row.
    pub fn add_row(&mut self, row: FeedbackRow) {
        self._rows.push(row);
    }

    /// Adds a row made only of text cells.
    ///
    /// It is the simplest use case for most cases.
    pub fn add_row_text(&mut self, cells: &[(&str, &str)]) {
        self._rows.push(FeedbackRow::from_text_pairs(cells));
    }

    /// Runs the aggregation over everything added so far.
    pub fn finish(&self) -> FeedbackSummary {
        run_feedback_stats(&self._rows, &self._rules)
    }
}
