mod config;
pub mod builder;
pub mod manual;
pub mod quick_start;

use log::{debug, info, warn};

use std::collections::{BTreeMap, HashMap, HashSet};

use unicode_normalization::UnicodeNormalization;

pub use crate::config::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct CollabId(u32);

/// The grouping registry for collaborator names.
///
/// Survey tools disambiguate repeated questions for the same person with a
/// trailing `_<digits>` suffix, and respondents' keyboards disagree about
/// accents. All spellings of one person collapse onto a single id; the first
/// spelling seen is the one used for display.
#[derive(Default, Debug)]
struct CollaboratorRegistry {
    ids: HashMap<String, CollabId>,
    display: Vec<String>,
}

impl CollaboratorRegistry {
    fn resolve(&mut self, raw: &str) -> CollabId {
        let trimmed = strip_index_suffix(raw.trim()).trim_end();
        let key = fold(trimmed);
        if let Some(id) = self.ids.get(&key) {
            return *id;
        }
        let id = CollabId(self.display.len() as u32);
        self.display.push(trimmed.to_string());
        self.ids.insert(key, id);
        id
    }

    fn display_name(&self, id: CollabId) -> &str {
        &self.display[id.0 as usize]
    }

    fn all_ids(&self) -> impl Iterator<Item = CollabId> {
        (0..self.display.len() as u32).map(CollabId)
    }
}

/// A header that parsed as an evaluation column.
#[derive(Eq, PartialEq, Debug, Clone)]
struct ParsedHeader<'a> {
    question: &'a str,
    collaborator: &'a str,
    inline_answer: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Default)]
struct ScoreAcc {
    sum: f64,
    valid_count: u32,
}

// **** Text folding ****

/// Lowercase, NFD, strip combining marks. Used for every pattern comparison;
/// display strings are never folded.
fn fold(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect()
}

fn is_pictograph(c: char) -> bool {
    matches!(c,
        '\u{1F000}'..='\u{1FAFF}'
        | '\u{2600}'..='\u{27BF}'
        | '\u{2B00}'..='\u{2BFF}'
        | '\u{FE0F}'
        | '\u{200D}')
}

fn strip_pictographs(s: &str) -> String {
    s.chars().filter(|c| !is_pictograph(*c)).collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Removes the trailing `_<digits>` suffix appended by the survey tool when
/// the same question is asked about the same person more than once.
fn strip_index_suffix(name: &str) -> &str {
    if let Some(pos) = name.rfind('_') {
        let tail = &name[pos + 1..];
        if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
            return &name[..pos];
        }
    }
    name
}

fn matches_any(folded: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| folded.contains(p))
}

// **** Header parsing ****

/// Splits a raw column name into question, collaborator and optional inline
/// answer. Returns `None` for anything that is not an evaluation field.
fn parse_header(raw: &str) -> Option<ParsedHeader<'_>> {
    let mut parts = raw.split(">>").map(str::trim);
    let question = parts.next()?;
    let collaborator = parts.next()?;
    if collaborator.is_empty() {
        return None;
    }
    if SENTINEL_COLLABORATORS.contains(&fold(collaborator).as_str()) {
        return None;
    }
    let inline_answer = parts.next().filter(|s| !s.is_empty());
    Some(ParsedHeader {
        question,
        collaborator,
        inline_answer,
    })
}

// **** Answer normalization ****

/// Canonicalizes a free-text evaluation into a [`Tier`].
///
/// Precedence: "not applicable" phrases, then the domain overrides that force
/// `Exceeds`, then the ordered tier keyword lists.
fn normalize_text(raw: &str) -> Tier {
    let cleaned = collapse_whitespace(&strip_pictographs(raw));
    if cleaned.is_empty() {
        return Tier::NotApplicable;
    }
    let folded = fold(&cleaned);
    if NOT_APPLICABLE_EXACT.contains(&folded.as_str())
        || matches_any(&folded, NOT_APPLICABLE_SUBSTRINGS)
    {
        return Tier::NotApplicable;
    }
    if matches_any(&folded, EXCEEDS_OVERRIDES) {
        return Tier::Exceeds;
    }
    for (tier, patterns) in TIER_PATTERNS.iter() {
        if matches_any(&folded, patterns) {
            return *tier;
        }
    }
    debug!("normalize_text: unrecognized answer: {:?}", cleaned);
    Tier::Unrecognized
}

fn is_truthy_marker(text: &str) -> bool {
    TRUTHY_MARKERS.contains(&fold(text.trim()).as_str())
}

/// Extracts and normalizes the answer for one evaluation cell.
///
/// The answer usually is the cell text. When the header carries a third
/// `>>`-delimited segment and the cell is only a truthy marker, the answer
/// text comes from that header segment instead.
fn evaluation_answer(cell: &CellValue, inline_answer: Option<&str>) -> Tier {
    match cell {
        CellValue::Text(s) => {
            let t = s.trim();
            if t.is_empty() {
                return Tier::NotApplicable;
            }
            if let Some(answer) = inline_answer {
                if is_truthy_marker(t) {
                    return normalize_text(answer);
                }
            }
            normalize_text(t)
        }
        CellValue::Bool(true) => match inline_answer {
            Some(answer) => normalize_text(answer),
            None => Tier::NotApplicable,
        },
        CellValue::Bool(false) | CellValue::Empty => Tier::NotApplicable,
    }
}

// **** Category classification ****

/// Maps a question to a competency by folded substring membership, in the
/// fixed classification order of [`COMPETENCY_PATTERNS`].
fn classify_competency(question: &str) -> Option<Competency> {
    let folded = fold(question);
    for (competency, patterns) in COMPETENCY_PATTERNS.iter() {
        if matches_any(&folded, patterns) {
            return Some(*competency);
        }
    }
    None
}

/// Maps a full header to a strength category. The header must carry the
/// strength question marker and the category's canonical phrase.
fn classify_strength(header: &str) -> Option<StrengthCategory> {
    let folded = fold(header);
    if !folded.contains(STRENGTH_QUESTION_MARKER) {
        return None;
    }
    StrengthCategory::ALL
        .iter()
        .find(|c| folded.contains(c.pattern()))
        .copied()
}

// **** Aggregators ****

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// One pass over all rows, accumulating `(collaborator, competency)` score
/// sums and valid counts, then averaging.
fn radar_stats(rows: &[FeedbackRow], rules: &FeedbackRules) -> RadarResult {
    let mut registry = CollaboratorRegistry::default();
    let mut acc: HashMap<(CollabId, Competency), ScoreAcc> = HashMap::new();

    for row in rows.iter() {
        for (header, cell) in row.cells.iter() {
            let parsed = match parse_header(header) {
                Some(p) => p,
                None => continue,
            };
            let competency = match classify_competency(parsed.question) {
                Some(c) => c,
                None => continue,
            };
            let id = registry.resolve(parsed.collaborator);
            let tier = evaluation_answer(cell, parsed.inline_answer);
            if let Some(score) = rules.tier_scale.score(tier) {
                let e = acc.entry((id, competency)).or_default();
                e.sum += score;
                e.valid_count += 1;
            } else if tier == Tier::Unrecognized {
                warn!(
                    "radar_stats: excluding unrecognized answer for {:?} / {:?}",
                    parsed.collaborator, competency
                );
            }
        }
    }

    let mut rated: HashSet<CollabId> = HashSet::new();
    let mut points: Vec<RadarPoint> = Vec::new();
    for competency in Competency::ALL.iter() {
        let mut collaborator_scores: BTreeMap<String, f64> = BTreeMap::new();
        for id in registry.all_ids() {
            let a = match acc.get(&(id, *competency)) {
                Some(a) if a.valid_count > 0 => a,
                _ => continue,
            };
            let average = round2(a.sum / a.valid_count as f64);
            if average > 0.0 || rules.emit_zero_scores {
                collaborator_scores.insert(registry.display_name(id).to_string(), average);
                rated.insert(id);
            }
        }
        points.push(RadarPoint {
            competency: *competency,
            collaborator_scores,
        });
    }

    let mut members_with_no_ratings: Vec<String> = registry
        .all_ids()
        .filter(|id| !rated.contains(id))
        .map(|id| registry.display_name(id).to_string())
        .collect();
    members_with_no_ratings.sort();

    debug!(
        "radar_stats: {} collaborators, {} without ratings",
        registry.display.len(),
        members_with_no_ratings.len()
    );

    RadarResult {
        points,
        members_with_no_ratings,
    }
}

/// Counts tiered answers per strength category. A truthy checkbox marker is
/// a selected strength and counts as `Exceeds`; text answers go through the
/// normalizer and land on their own tier.
fn strength_stats(rows: &[FeedbackRow]) -> Vec<BarPoint> {
    let mut points: Vec<BarPoint> = StrengthCategory::ALL
        .iter()
        .map(|c| BarPoint {
            category: *c,
            needs_improvement: 0,
            as_expected: 0,
            exceeds: 0,
        })
        .collect();

    for row in rows.iter() {
        for (header, cell) in row.cells.iter() {
            let category = match classify_strength(header) {
                Some(c) => c,
                None => continue,
            };
            let idx = StrengthCategory::ALL
                .iter()
                .position(|c| *c == category)
                .unwrap_or(0);
            let point = &mut points[idx];
            match cell {
                CellValue::Bool(true) => point.exceeds += 1,
                CellValue::Bool(false) | CellValue::Empty => {}
                CellValue::Text(s) => {
                    let t = s.trim();
                    if t.is_empty() {
                        continue;
                    }
                    if is_truthy_marker(t) || fold(t) == category.pattern() {
                        point.exceeds += 1;
                        continue;
                    }
                    match normalize_text(t) {
                        Tier::NeedsImprovement => point.needs_improvement += 1,
                        Tier::AsExpected => point.as_expected += 1,
                        Tier::Exceeds => point.exceeds += 1,
                        Tier::NotApplicable | Tier::Unrecognized => {}
                    }
                }
            }
        }
    }
    points
}

/// Scans every string-valued cell, regardless of column, and converts the
/// three global tier counts into percentages of the valid total.
fn rating_distribution(rows: &[FeedbackRow]) -> Vec<PiePoint> {
    let mut counts: [u64; 3] = [0, 0, 0];
    for row in rows.iter() {
        for (_, cell) in row.cells.iter() {
            if let CellValue::Text(s) = cell {
                match normalize_text(s) {
                    Tier::NeedsImprovement => counts[0] += 1,
                    Tier::AsExpected => counts[1] += 1,
                    Tier::Exceeds => counts[2] += 1,
                    Tier::NotApplicable | Tier::Unrecognized => {}
                }
            }
        }
    }

    let total: u64 = counts.iter().sum();
    let tiers = [Tier::NeedsImprovement, Tier::AsExpected, Tier::Exceeds];
    tiers
        .iter()
        .zip(counts.iter())
        .map(|(tier, count)| PiePoint {
            label: tier.label().unwrap_or(""),
            percentage: if total > 0 {
                round2(*count as f64 * 100.0 / total as f64)
            } else {
                0.0
            },
            color: tier.color().unwrap_or(""),
        })
        .collect()
}

/// Runs the three aggregators over one batch of survey rows.
///
/// The engine is a pure function of its input: identical rows always produce
/// the identical summary, and an empty batch produces well-formed empty
/// aggregates.
pub fn run_feedback_stats(rows: &[FeedbackRow], rules: &FeedbackRules) -> FeedbackSummary {
    info!(
        "run_feedback_stats: processing {:?} rows, rules: {:?}",
        rows.len(),
        rules
    );

    let radar = radar_stats(rows, rules);
    let strengths = strength_stats(rows);
    let ratings = rating_distribution(rows);

    info!(
        "run_feedback_stats: {} scored strength answers, rating split {:?}",
        strengths.iter().map(|p| p.total()).sum::<u64>(),
        ratings
            .iter()
            .map(|p| (p.label, p.percentage))
            .collect::<Vec<_>>()
    );

    FeedbackSummary {
        radar,
        strengths,
        ratings,
    }
}
