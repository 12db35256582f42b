//! Ingredient text annotation.
//!
//! Three passes run in order over an ingredient list:
//!
//! 1. technical names are rewritten into lay terms,
//! 2. the user's allergens are marked,
//! 3. terms relevant to diabetes or high blood pressure are marked.
//!
//! Later passes never match partway into text written by the first pass. A
//! rewritten span is judged as a whole, first by the technical name it
//! replaced and then by its lay replacement, so "high-fructose corn syrup"
//! still flags for a diabetic user even though the displayed text is
//! "Sugar (from Corn)". Each span carries at most one tag, allergens winning
//! over conditions.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::HealthProfile;

/// Technical ingredient names and their lay replacements.
pub const SIMPLIFICATIONS: &[(&str, &str)] = &[
    ("high-fructose corn syrup", "Sugar (from Corn)"),
    ("high fructose corn syrup", "Sugar (from Corn)"),
    ("glucose-fructose syrup", "Sugar Syrup"),
    ("sodium chloride", "Salt"),
    ("monosodium glutamate", "MSG (Flavor Enhancer)"),
    ("sodium bicarbonate", "Baking Soda"),
    ("sodium benzoate", "Preservative (Benzoate)"),
    ("sodium nitrite", "Preservative (Nitrite)"),
    ("potassium sorbate", "Preservative (Sorbate)"),
    ("sucrose", "Sugar"),
    ("dextrose", "Sugar (Glucose)"),
    ("maltodextrin", "Starch Sugar"),
    ("ascorbic acid", "Vitamin C"),
    ("tocopherols", "Vitamin E"),
    ("cholecalciferol", "Vitamin D3"),
    ("riboflavin", "Vitamin B2"),
    ("thiamine mononitrate", "Vitamin B1"),
    ("pyridoxine hydrochloride", "Vitamin B6"),
    ("soy lecithin", "Emulsifier (from Soy)"),
    ("xanthan gum", "Thickener"),
];

pub const DIABETES_TERMS: &[&str] = &["sugar", "syrup", "glucose", "fructose"];
pub const HIGH_BP_TERMS: &[&str] = &["salt", "sodium"];

static SIMPLIFICATION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let mut names: Vec<&str> = SIMPLIFICATIONS.iter().map(|(name, _)| *name).collect();
    // longest first so "high-fructose corn syrup" beats any shorter overlap
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));
    whole_word_pattern(names.iter().copied()).ok()
});

static DIABETES_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| whole_word_pattern(DIABETES_TERMS.iter().copied()).ok());

static HIGH_BP_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| whole_word_pattern(HIGH_BP_TERMS.iter().copied()).ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Allergen,
    Condition,
}

/// A marked region of the annotated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSpan {
    /// Byte range into [`AnnotatedText::text`]
    pub range: Range<usize>,
    pub kind: SpanKind,
    /// Lower-cased term that triggered the tag
    pub matched_term: String,
}

/// One technical name rewritten by the simplification pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Byte range of the replacement in [`AnnotatedText::text`]
    pub range: Range<usize>,
    /// Technical name as it appeared in the input
    pub original: String,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedText {
    pub original: String,
    /// Text after simplification; span ranges index into this
    pub text: String,
    /// Sorted by start, never overlapping
    pub spans: Vec<AnnotatedSpan>,
    pub substitutions: Vec<Substitution>,
}

impl AnnotatedText {
    pub fn spans_of(&self, kind: SpanKind) -> impl Iterator<Item = &AnnotatedSpan> {
        self.spans.iter().filter(move |s| s.kind == kind)
    }

    pub fn span_text(&self, span: &AnnotatedSpan) -> &str {
        &self.text[span.range.clone()]
    }

    /// Split the text into consecutive runs, tagged where a span covers them.
    pub fn segments(&self) -> Vec<(&str, Option<SpanKind>)> {
        let mut out = Vec::new();
        let mut cursor = 0;
        for span in &self.spans {
            if span.range.start > cursor {
                out.push((&self.text[cursor..span.range.start], None));
            }
            out.push((&self.text[span.range.clone()], Some(span.kind)));
            cursor = span.range.end;
        }
        if cursor < self.text.len() {
            out.push((&self.text[cursor..], None));
        }
        out
    }
}

/// Which condition term lists apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionFlags {
    pub is_diabetic: bool,
    pub has_high_bp: bool,
}

impl From<&HealthProfile> for ConditionFlags {
    fn from(profile: &HealthProfile) -> Self {
        Self {
            is_diabetic: profile.is_diabetic,
            has_high_bp: profile.has_high_bp,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive alternation of escaped terms with whole-word edges.
///
/// `\b` only holds next to a word character, so the boundary is asserted
/// only on term edges that are word characters.
fn whole_word_pattern<'a>(
    terms: impl IntoIterator<Item = &'a str>,
) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = terms
        .into_iter()
        .map(|term| {
            let lead = if term.starts_with(is_word_char) { r"\b" } else { "" };
            let trail = if term.ends_with(is_word_char) { r"\b" } else { "" };
            format!("{lead}{}{trail}", regex::escape(term))
        })
        .collect();
    RegexBuilder::new(&format!("(?:{})", alternatives.join("|")))
        .case_insensitive(true)
        .build()
}

/// Trim and lower-case one allergy entry. `Ok(None)` for a blank entry.
fn normalize_allergen_term(raw: &str) -> EngineResult<Option<String>> {
    let term = raw.trim().to_lowercase();
    if term.is_empty() {
        return Ok(None);
    }
    if !term.chars().any(char::is_alphanumeric) {
        return Err(EngineError::malformed_allergen(
            term,
            "term contains no letters or digits",
        ));
    }
    Ok(Some(term))
}

/// Split a comma-separated allergy list into trimmed, lower-cased terms.
///
/// # Errors
///
/// Returns `MalformedAllergenTerm` for an entry with no letters or digits.
pub fn parse_allergen_list(raw: &str) -> EngineResult<Vec<String>> {
    let mut terms: Vec<String> = Vec::new();
    for entry in raw.split(',') {
        if let Some(term) = normalize_allergen_term(entry)? {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
    }
    Ok(terms)
}

fn compile_allergens(terms: &[String]) -> EngineResult<Option<Regex>> {
    let mut cleaned = Vec::with_capacity(terms.len());
    for term in terms {
        if let Some(term) = normalize_allergen_term(term)? {
            cleaned.push(term);
        }
    }
    if cleaned.is_empty() {
        return Ok(None);
    }
    whole_word_pattern(cleaned.iter().map(String::as_str))
        .map(Some)
        .map_err(|e| EngineError::malformed_allergen(cleaned.join(", "), e.to_string()))
}

fn simplify(text: &str) -> (String, Vec<Substitution>) {
    let Some(pattern) = SIMPLIFICATION_PATTERN.as_ref() else {
        return (text.to_string(), Vec::new());
    };

    let mut out = String::with_capacity(text.len());
    let mut substitutions = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        let key = m.as_str().to_lowercase();
        let Some((_, replacement)) = SIMPLIFICATIONS.iter().find(|(name, _)| *name == key) else {
            continue;
        };
        out.push_str(&text[last..m.start()]);
        let start = out.len();
        out.push_str(replacement);
        substitutions.push(Substitution {
            range: start..out.len(),
            original: m.as_str().to_string(),
            replacement: (*replacement).to_string(),
        });
        last = m.end();
    }
    out.push_str(&text[last..]);
    (out, substitutions)
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Tag matches of `pattern`, skipping rewritten text and anything already tagged.
fn mark(
    pattern: &Regex,
    kind: SpanKind,
    text: &str,
    substitutions: &[Substitution],
    spans: &mut Vec<AnnotatedSpan>,
) {
    let mut found = Vec::new();
    for m in pattern.find_iter(text) {
        let range = m.range();
        if substitutions.iter().any(|s| overlaps(&s.range, &range)) {
            continue;
        }
        found.push(AnnotatedSpan {
            range,
            kind,
            matched_term: m.as_str().to_lowercase(),
        });
    }
    for sub in substitutions {
        let hit = pattern
            .find(&sub.original)
            .or_else(|| pattern.find(&sub.replacement));
        if let Some(m) = hit {
            found.push(AnnotatedSpan {
                range: sub.range.clone(),
                kind,
                matched_term: m.as_str().to_lowercase(),
            });
        }
    }
    for span in found {
        if !spans.iter().any(|s| overlaps(&s.range, &span.range)) {
            spans.push(span);
        }
    }
}

/// Simplify an ingredient list and mark allergen and condition terms.
///
/// Allergen terms are escaped before compilation, so characters such as
/// `+`, `(` or `.` in a user's entry match literally.
///
/// # Errors
///
/// Returns `MalformedAllergenTerm` when an allergen term cannot be compiled
/// into a whole-word pattern.
pub fn annotate(
    text: &str,
    allergen_terms: &[String],
    conditions: ConditionFlags,
) -> EngineResult<AnnotatedText> {
    let allergens = compile_allergens(allergen_terms)?;
    let (simplified, substitutions) = simplify(text);
    let mut spans = Vec::new();

    if let Some(pattern) = allergens.as_ref() {
        mark(
            pattern,
            SpanKind::Allergen,
            &simplified,
            &substitutions,
            &mut spans,
        );
    }

    let condition_patterns: [(bool, &Option<Regex>); 2] = [
        (conditions.is_diabetic, &DIABETES_PATTERN),
        (conditions.has_high_bp, &HIGH_BP_PATTERN),
    ];
    for (active, pattern) in condition_patterns {
        let Some(pattern) = pattern.as_ref().filter(|_| active) else {
            continue;
        };
        mark(
            pattern,
            SpanKind::Condition,
            &simplified,
            &substitutions,
            &mut spans,
        );
    }

    spans.sort_by_key(|s| s.range.start);
    debug!(
        substitutions = substitutions.len(),
        spans = spans.len(),
        "annotated ingredient text"
    );

    Ok(AnnotatedText {
        original: text.to_string(),
        text: simplified,
        spans,
        substitutions,
    })
}

/// Annotate using the allergies and conditions recorded on a profile.
pub fn annotate_for_profile(
    text: &str,
    profile: &HealthProfile,
) -> EngineResult<AnnotatedText> {
    let terms = parse_allergen_list(&profile.allergies)?;
    annotate(text, &terms, ConditionFlags::from(profile))
}
