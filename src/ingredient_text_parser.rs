//! # Ingredient Text Parser
//!
//! Extracts `{ name, detail }` from an unstructured ingredient string
//! ("2 cups of flour, sifted", "a pinch of salt") using an ordered list of
//! `(pattern, extractor)` pairs evaluated first-match-wins.
//!
//! This is a best-effort heuristic parser, not a grammar: it never fails,
//! never drops characters outside the stripped preparation clause, and is
//! idempotent on its own clean `name` output.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::{Captures, Regex};

/// Result of parsing one raw ingredient string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIngredient {
    /// Cleaned, capitalized ingredient name
    pub name: String,
    /// Quantity detail ("2 cups", "3", "a pinch"), if any was recognized
    pub detail: Option<String>,
}

/// Extractor half of a parse rule: captures -> (name remainder, detail).
type Extractor = fn(&Captures) -> (String, Option<String>);

// Known unit words, longest-form alternatives first so the leftmost-first
// alternation never truncates a longer word ("grams" before "g").
const UNIT_WORDS: &str = "cups?|tablespoons?|tbsp|teaspoons?|tsp|ounces?|oz|pounds?|lbs?\
|grams?|kg|g|ml|liters?|litres?|l|cloves?|slices?|pieces?|pinch(?:es)?|bunch(?:es)?\
|sprigs?|stalks?|cans?|packets?|heads?|handfuls?|dash(?:es)?";

lazy_static! {
    /// `<number>[ fraction] <known-unit-word>[.] [of ]<rest>`
    static ref QTY_UNIT_RE: Regex = Regex::new(&format!(
        r"^(?i)(?P<qty>\d+(?:\.\d+)?(?:\s+\d+/\d+)?|\d+/\d+)\s*(?P<unit>{UNIT_WORDS})\.?\s+(?:of\s+)?(?P<rest>.+)$"
    ))
    .expect("quantity+unit pattern should be valid");

    /// `<number> <rest>` with no recognized unit word
    static ref QTY_ONLY_RE: Regex =
        Regex::new(r"^(?P<qty>\d+(?:\.\d+)?)\s+(?P<rest>.+)$")
            .expect("quantity-only pattern should be valid");

    /// `a {few|pinch|dash|handful} [of] <rest>`
    static ref QUALITATIVE_RE: Regex =
        Regex::new(r"^(?i)a\s+(?P<phrase>few|pinch|dash|handful)(?:\s+of)?\s+(?P<rest>.+)$")
            .expect("qualitative pattern should be valid");

    /// Trailing comma-clause opening with a preparation descriptor
    static ref PREP_CLAUSE_RE: Regex = Regex::new(
        r"(?i),\s*(?:chopped|diced|minced|sliced|crushed|grated|peeled|fresh|dried|ground|finely|coarsely|roughly|thinly|to\s+taste|optional)\b.*$"
    )
    .expect("preparation clause pattern should be valid");

    /// The parse cascade, in precedence order. First match wins.
    static ref RULES: Vec<(&'static Regex, Extractor)> = vec![
        (&*QTY_UNIT_RE, extract_quantity_unit as Extractor),
        (&*QTY_ONLY_RE, extract_quantity_only as Extractor),
        (&*QUALITATIVE_RE, extract_qualitative as Extractor),
    ];
}

fn extract_quantity_unit(caps: &Captures) -> (String, Option<String>) {
    let qty = caps["qty"].trim().to_string();
    let unit = caps["unit"].to_lowercase();
    (caps["rest"].to_string(), Some(format!("{} {}", qty, unit)))
}

fn extract_quantity_only(caps: &Captures) -> (String, Option<String>) {
    (caps["rest"].to_string(), Some(caps["qty"].to_string()))
}

fn extract_qualitative(caps: &Captures) -> (String, Option<String>) {
    let phrase = caps["phrase"].to_lowercase();
    (caps["rest"].to_string(), Some(format!("a {}", phrase)))
}

/// Parse a raw ingredient string into a name and optional quantity detail.
///
/// The cascade tries, in order: quantity + known unit word, bare quantity,
/// qualitative phrase ("a pinch of ..."), and finally passes the whole
/// string through as the name. All branches then strip a trailing
/// preparation clause and capitalize the first letter.
pub fn parse(raw: &str) -> ParsedIngredient {
    let raw = raw.trim();
    trace!("Parsing ingredient text: {:?}", raw);

    for (pattern, extract) in RULES.iter() {
        if let Some(caps) = pattern.captures(raw) {
            let (rest, detail) = extract(&caps);
            debug!("Ingredient pattern matched: detail={:?}", detail);
            return ParsedIngredient {
                name: clean_name(&rest),
                detail,
            };
        }
    }

    // No quantity recognized: the whole string is the name.
    ParsedIngredient {
        name: clean_name(raw),
        detail: None,
    }
}

/// Strip a trailing preparation clause and capitalize the first letter.
fn clean_name(remainder: &str) -> String {
    let stripped = PREP_CLAUSE_RE.replace(remainder, "");
    capitalize_first(stripped.trim())
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
