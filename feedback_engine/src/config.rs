// ********* Input data structures ***********

/// A single cell of a survey export, as handed over by the ingestion layer.
///
/// Survey tools export a mix of free text, checkbox markers (booleans) and
/// blanks. The ingestion layer is responsible for decoding/typing; the engine
/// only sees these three shapes.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum CellValue {
    Text(String),
    Bool(bool),
    Empty,
}

/// One survey submission: an ordered mapping from column header to cell value.
///
/// The order of the cells is the column order of the export. Headers are
/// expected to be trimmed by the ingestion layer.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FeedbackRow {
    pub cells: Vec<(String, CellValue)>,
}

impl FeedbackRow {
    pub fn new() -> FeedbackRow {
        FeedbackRow { cells: Vec::new() }
    }

    pub fn push(&mut self, header: &str, value: CellValue) {
        self.cells.push((header.to_string(), value));
    }

    /// Convenience constructor for rows made only of text cells.
    pub fn from_text_pairs(pairs: &[(&str, &str)]) -> FeedbackRow {
        FeedbackRow {
            cells: pairs
                .iter()
                .map(|(h, v)| (h.to_string(), CellValue::Text(v.to_string())))
                .collect(),
        }
    }
}

/// The ordinal outcome of one evaluation answer.
///
/// `NotApplicable` and `Unrecognized` are both excluded from every average
/// and count: they are absent, not zero-valued. They stay distinct because
/// `Unrecognized` is worth surfacing in diagnostics while `NotApplicable` is
/// a deliberate answer.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Tier {
    NotApplicable,
    NeedsImprovement,
    AsExpected,
    Exceeds,
    Unrecognized,
}

impl Tier {
    /// Whether this answer participates in averages and counts.
    pub fn is_scored(&self) -> bool {
        matches!(
            self,
            Tier::NeedsImprovement | Tier::AsExpected | Tier::Exceeds
        )
    }

    /// Display label, with correct Portuguese spelling. Only the three scored
    /// tiers are ever displayed.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Tier::NeedsImprovement => Some("Precisa melhorar"),
            Tier::AsExpected => Some("Atende expectativas"),
            Tier::Exceeds => Some("Supera expectativas"),
            _ => None,
        }
    }

    /// Fixed display color for the rating-distribution view.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Tier::NeedsImprovement => Some("#FFC107"),
            Tier::AsExpected => Some("#2196F3"),
            Tier::Exceeds => Some("#4CAF50"),
            _ => None,
        }
    }
}

/// The five competencies scored per collaborator in the radar view.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Competency {
    Cooperation,
    Communication,
    Commitment,
    TechnicalMastery,
    ProblemSolving,
}

impl Competency {
    /// Display order of the radar axes.
    pub const ALL: [Competency; 5] = [
        Competency::Cooperation,
        Competency::Communication,
        Competency::Commitment,
        Competency::TechnicalMastery,
        Competency::ProblemSolving,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Competency::Cooperation => "Cooperação",
            Competency::Communication => "Comunicação",
            Competency::Commitment => "Comprometimento",
            Competency::TechnicalMastery => "Domínio Técnico",
            Competency::ProblemSolving => "Resolução Problemas",
        }
    }
}

/// The team-strength labels counted (not averaged) in the bar view.
/// A separate taxonomy from [`Competency`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum StrengthCategory {
    TechnicalMastery,
    Adaptability,
    Commitment,
    ProblemSolving,
    Communication,
}

impl StrengthCategory {
    pub const ALL: [StrengthCategory; 5] = [
        StrengthCategory::TechnicalMastery,
        StrengthCategory::Adaptability,
        StrengthCategory::Commitment,
        StrengthCategory::ProblemSolving,
        StrengthCategory::Communication,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StrengthCategory::TechnicalMastery => "Domínio técnico",
            StrengthCategory::Adaptability => "Adaptabilidade",
            StrengthCategory::Commitment => "Comprometimento",
            StrengthCategory::ProblemSolving => "Resolução problemas",
            StrengthCategory::Communication => "Comunicação",
        }
    }

    /// The canonical matching phrase for this category, in folded form
    /// (lowercase, diacritics removed). Unlike competencies, the mapping from
    /// header to strength category is 1:1 on this single phrase.
    pub fn pattern(&self) -> &'static str {
        match self {
            StrengthCategory::TechnicalMastery => "excelente dominio tecnico da area",
            StrengthCategory::Adaptability => {
                "facilidade de adaptacao a mudancas e novas demandas"
            }
            StrengthCategory::Commitment => "dedicacao, comprometimento e foco em resultados",
            StrengthCategory::ProblemSolving => {
                "criatividade e inovacao na resolucao de problemas"
            }
            StrengthCategory::Communication => {
                "excelente comunicacao e habilidade de apresentacao"
            }
        }
    }
}

// ********* Pattern tables **********

// All patterns below are written in folded form: lowercase with diacritics
// removed. The matcher folds the candidate text the same way before
// comparing, so accented, upper-case and emoji-prefixed variants of the same
// phrase all hit the same entry.

/// Headers are only strength columns when they carry this question marker.
pub const STRENGTH_QUESTION_MARKER: &str = "pontos fortes";

/// Collaborator segments equal to one of these are metadata, not people.
pub const SENTINEL_COLLABORATORS: &[&str] = &["data", "submission date"];

/// "Not applicable" answers, matched before anything else so that phrases
/// like "não se aplica aqui" never fall through to a tier keyword.
pub const NOT_APPLICABLE_SUBSTRINGS: &[&str] = &["nao se aplica"];
pub const NOT_APPLICABLE_EXACT: &[&str] = &["n/a", "na"];

/// Free-text phrases that force `Exceeds` regardless of tier wording.
/// Respondents describing these behaviors routinely skip the standard tier
/// phrasing, so they are checked before the generic tier lists.
pub const EXCEEDS_OVERRIDES: &[&str] = &[
    "problemas complexos",
    "criatividade e inovacao",
    "dedicacao extra",
    "horas extras",
    "alem do escopo",
    "alem de suas atribuicoes",
];

/// Ordered tier keyword lists. The first list with a matching pattern wins.
pub const TIER_PATTERNS: [(Tier, &[&str]); 3] = [
    (Tier::NeedsImprovement, &["pode melhorar", "precisa"]),
    (Tier::AsExpected, &["atende", "como esperado"]),
    (Tier::Exceeds, &["supera", "parabens"]),
];

/// Ordered competency keyword lists, in classification order (which differs
/// from the display order of [`Competency::ALL`]). The keyword sets must stay
/// disjoint: that is what makes the categories mutually exclusive.
pub const COMPETENCY_PATTERNS: [(Competency, &[&str]); 5] = [
    (Competency::ProblemSolving, &["problema"]),
    (Competency::Communication, &["comunica"]),
    (Competency::Cooperation, &["coopera"]),
    (Competency::Commitment, &["compromisso", "comprometimento"]),
    (Competency::TechnicalMastery, &["dominio tecnico"]),
];

/// Cell contents treated as a positive checkbox marker.
pub const TRUTHY_MARKERS: &[&str] = &["1", "true", "yes", "sim"];

// ********* Configuration **********

/// The numeric value assigned to each scored tier.
///
/// The survey history carries two scales for the same three phrases; which
/// one is in force is a product decision, not a constant.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TierScale {
    /// 1 / 2 / 3 — the current scale.
    Linear,
    /// 1 / 3 / 5 — the scale used by earlier exports.
    Wide,
}

impl TierScale {
    /// The score contributed by one answer, or `None` when the answer is
    /// excluded from aggregation.
    pub fn score(&self, tier: Tier) -> Option<f64> {
        match (self, tier) {
            (TierScale::Linear, Tier::NeedsImprovement) => Some(1.0),
            (TierScale::Linear, Tier::AsExpected) => Some(2.0),
            (TierScale::Linear, Tier::Exceeds) => Some(3.0),
            (TierScale::Wide, Tier::NeedsImprovement) => Some(1.0),
            (TierScale::Wide, Tier::AsExpected) => Some(3.0),
            (TierScale::Wide, Tier::Exceeds) => Some(5.0),
            _ => None,
        }
    }
}

/// The product decisions that govern one aggregation run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FeedbackRules {
    pub tier_scale: TierScale,
    /// When false (the reference behavior), a collaborator/competency average
    /// of exactly zero is dropped from the radar output.
    pub emit_zero_scores: bool,
}

impl FeedbackRules {
    pub const DEFAULT_RULES: FeedbackRules = FeedbackRules {
        tier_scale: TierScale::Linear,
        emit_zero_scores: false,
    };
}

// ******** Output data structures *********

use std::collections::BTreeMap;

/// One radar axis: a competency and the average score of every collaborator
/// who has at least one valid answer for it, keyed by display name.
#[derive(PartialEq, Debug, Clone)]
pub struct RadarPoint {
    pub competency: Competency,
    pub collaborator_scores: BTreeMap<String, f64>,
}

/// The per-collaborator competency view.
#[derive(PartialEq, Debug, Clone)]
pub struct RadarResult {
    /// One entry per competency, in [`Competency::ALL`] order.
    pub points: Vec<RadarPoint>,
    /// Collaborators seen in competency columns with zero valid answers
    /// anywhere, sorted by display name.
    pub members_with_no_ratings: Vec<String>,
}

/// Raw tier counts for one strength category. Not averaged and not sorted:
/// display order is a presentation concern.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BarPoint {
    pub category: StrengthCategory,
    pub needs_improvement: u64,
    pub as_expected: u64,
    pub exceeds: u64,
}

impl BarPoint {
    pub fn total(&self) -> u64 {
        self.needs_improvement + self.as_expected + self.exceeds
    }
}

/// One slice of the overall rating distribution.
#[derive(PartialEq, Debug, Clone)]
pub struct PiePoint {
    pub label: &'static str,
    /// Percentage of all valid tiered responses across the whole dataset.
    /// All zero when there are no valid responses.
    pub percentage: f64,
    pub color: &'static str,
}

/// The three chart-ready aggregates of one survey batch.
#[derive(PartialEq, Debug, Clone)]
pub struct FeedbackSummary {
    pub radar: RadarResult,
    pub strengths: Vec<BarPoint>,
    pub ratings: Vec<PiePoint>,
}
