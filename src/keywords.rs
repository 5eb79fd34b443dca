//! Keyword variant expansion and alternation pattern compilation
//!
//! A category label like `"active_admin"` expands into every lexical surface
//! form a codebase is likely to spell it in: casing variants of every
//! contiguous sub-phrase, plus singular/plural forms. Variants are ordered
//! longest-first before being compiled into a single alternation pattern, so
//! that at any scan position the longer, more specific variant wins over a
//! shorter overlapping one.

use regex::Regex;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Compiled alternation pattern for one category's keyword variants
#[derive(Debug, Clone)]
pub struct CategoryPattern {
    regex: Regex,
}

impl CategoryPattern {
    /// Compile variants (already ordered longest-first) into one alternation
    pub fn compile(variants: &[String]) -> Result<Self, regex::Error> {
        let alternation = if variants.is_empty() {
            // A label with no variants matches nothing
            "[^\\s\\S]".to_string()
        } else {
            variants
                .iter()
                .map(|variant| regex::escape(variant))
                .collect::<Vec<_>>()
                .join("|")
        };

        Ok(Self {
            regex: Regex::new(&alternation)?,
        })
    }

    /// All non-overlapping matches of the pattern in `text`
    pub fn find_matches<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Expand a label into its deduplicated, length-ordered keyword variants
///
/// Words are separated by spaces or underscores. Every contiguous run of
/// 1..N words contributes a battery of casings (upper snake, pascal, snake,
/// space-joined, title-spaced) for its as-written, singular, and plural
/// forms. The result is sorted by descending length with an ascending
/// lexical tie-break, so identical input always yields identical output.
pub fn expand_label(label: &str) -> Vec<String> {
    let words: Vec<String> = label
        .to_lowercase()
        .split([' ', '_'])
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect();

    let mut variants = BTreeSet::new();
    for width in 1..=words.len() {
        for window in words.windows(width) {
            for phrase in phrase_forms(window) {
                variants.extend(casings(&phrase));
            }
        }
    }
    variants.retain(|variant: &String| !variant.trim().is_empty());

    let mut ordered: Vec<String> = variants.into_iter().collect();
    ordered.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    ordered
}

/// Expand every label and compile its variants into an alternation pattern
pub fn compile_categories(
    labels: &[String],
) -> Result<BTreeMap<String, CategoryPattern>, regex::Error> {
    let mut patterns = BTreeMap::new();
    for label in labels {
        let variants = expand_label(label);
        patterns.insert(label.clone(), CategoryPattern::compile(&variants)?);
    }
    Ok(patterns)
}

/// The sub-phrase as written, with its last word singularized, and with its
/// last word pluralized
fn phrase_forms(words: &[String]) -> Vec<Vec<String>> {
    let mut forms = vec![words.to_vec()];

    if let Some((last, stem)) = words.split_last() {
        if let Some(singular) = last.strip_suffix('s').filter(|root| !root.is_empty()) {
            let mut form = stem.to_vec();
            form.push(singular.to_string());
            forms.push(form);
        } else if !last.ends_with('s') {
            let mut form = stem.to_vec();
            form.push(format!("{last}s"));
            forms.push(form);
        }
    }

    forms
}

/// Fixed casing battery over one word sequence
fn casings(words: &[String]) -> Vec<String> {
    let capitalized: Vec<String> = words.iter().map(|word| capitalize(word)).collect();
    let upper: Vec<String> = words.iter().map(|word| word.to_uppercase()).collect();

    vec![
        upper.join("_"),
        capitalized.join(""),
        words.join("_"),
        words.join(" "),
        capitalized.join(" "),
    ]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
