//! Leaf scorers: keyword categorisation and blame-line contribution
//!
//! Both scorers turn raw leaf input into `WeightedAttribution`s folded into
//! a file's `AttributionSet`. The walker drives them through the
//! `FileScorer` seam so the same recursion serves both dimensions.

use crate::attribution::{WeightedAttribution, UNKNOWN_LABEL};
use crate::attribution_set::AttributionSet;
use crate::blame::BlameSource;
use crate::keywords::{compile_categories, CategoryPattern};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

/// Separator used when concatenating matched substrings for scoring
///
/// The score of a scan is the length of the matches joined by this
/// character, i.e. `sum(match lengths) + (count - 1)`. The inflation by
/// separator count is reproduced exactly for compatibility with existing
/// reports; see DESIGN.md before treating it as a stable metric.
pub const MATCH_SEPARATOR: &str = "-";

/// Leaf scorer seam between the directory walker and a scoring dimension
pub trait FileScorer {
    /// Declared label universe (the walker adds UNKNOWN)
    fn labels(&self) -> Vec<String>;

    /// Score one file node, folding attributions into its set
    fn score_file(&self, set: &mut AttributionSet, rel_path: &Path, abs_path: &Path)
        -> Result<()>;
}

/// Score one text against a category pattern
///
/// All non-overlapping matches are concatenated with `MATCH_SEPARATOR`; the
/// score is the character length of the result, or 0 with no matches.
pub fn keyword_score(pattern: &CategoryPattern, text: &str) -> u64 {
    let matches = pattern.find_matches(text);
    if matches.is_empty() {
        return 0;
    }

    matches.join(MATCH_SEPARATOR).chars().count() as u64
}

/// Categorisation scorer: keyword patterns over file path and content
#[derive(Debug, Clone)]
pub struct CategoryScorer {
    patterns: BTreeMap<String, CategoryPattern>,
}

impl CategoryScorer {
    /// Expand and compile keyword patterns for the given category labels
    pub fn new(labels: &[String]) -> Result<Self, regex::Error> {
        Ok(Self {
            patterns: compile_categories(labels)?,
        })
    }

    /// Use already-compiled patterns (normalized boundary contract)
    pub fn from_patterns(patterns: BTreeMap<String, CategoryPattern>) -> Self {
        Self { patterns }
    }
}

impl FileScorer for CategoryScorer {
    fn labels(&self) -> Vec<String> {
        self.patterns.keys().cloned().collect()
    }

    fn score_file(
        &self,
        set: &mut AttributionSet,
        rel_path: &Path,
        abs_path: &Path,
    ) -> Result<()> {
        let bytes = fs::read(abs_path)
            .with_context(|| format!("failed to read '{}'", abs_path.display()))?;
        // Invalid UTF-8 is repaired rather than failing the walk
        let content = String::from_utf8_lossy(&bytes);
        let path_text = rel_path.to_string_lossy();

        for (category, pattern) in &self.patterns {
            // Path score uses the relative path only, so reports do not
            // depend on where the tree is checked out
            let weight = keyword_score(pattern, &path_text) + keyword_score(pattern, &content);
            set.insert(WeightedAttribution::new(category.clone(), weight))?;
        }

        Ok(())
    }
}

/// Parses one line of annotated blame output into a contribution
///
/// Line shape: `<8-char-revision> (<author name> YYYY-MM-DD...) <content>`.
/// The author is the word/whitespace run immediately preceding the date,
/// right-trimmed.
#[derive(Debug, Clone)]
pub struct BlameLineParser {
    author_pattern: Regex,
}

impl BlameLineParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            author_pattern: Regex::new(r"^\w{8}\s+\((?P<author>[\w\s]+)\s\d{4}-\d{2}-\d{2}")?,
        })
    }

    /// One line of annotated history is one unit of contribution
    ///
    /// Unrecognized authors and unparseable lines both land on UNKNOWN.
    pub fn score_line(
        &self,
        blame_line: &str,
        lookup: &HashMap<String, String>,
    ) -> WeightedAttribution {
        let group = self
            .author_pattern
            .captures(blame_line)
            .and_then(|captures| captures.name("author"))
            .map(|author| author.as_str().trim_end())
            .and_then(|author| lookup.get(author))
            .map_or(UNKNOWN_LABEL, String::as_str);

        WeightedAttribution::new(group, 1)
    }
}

/// Contribution scorer: per-line authorship over blame output
#[derive(Debug)]
pub struct ContributionScorer<B: BlameSource> {
    lookup: HashMap<String, String>,
    parser: BlameLineParser,
    blame: B,
}

impl<B: BlameSource> ContributionScorer<B> {
    pub fn new(lookup: HashMap<String, String>, blame: B) -> Result<Self, regex::Error> {
        Ok(Self {
            lookup,
            parser: BlameLineParser::new()?,
            blame,
        })
    }
}

impl<B: BlameSource> FileScorer for ContributionScorer<B> {
    fn labels(&self) -> Vec<String> {
        // Contributor groups, deduplicated and sorted
        self.lookup
            .values()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn score_file(
        &self,
        set: &mut AttributionSet,
        _rel_path: &Path,
        abs_path: &Path,
    ) -> Result<()> {
        // Exactly one blame fetch per file; every line folds into the set
        let annotated = self.blame.annotate(abs_path)?;
        for line in annotated.lines() {
            set.insert(self.parser.score_line(line, &self.lookup))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::expand_label;

    fn charges_pattern() -> CategoryPattern {
        CategoryPattern::compile(&expand_label("charges")).unwrap()
    }

    fn lookup(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(author, group)| (author.to_string(), group.to_string()))
            .collect()
    }

    #[test]
    fn test_keyword_score_counts_matches_plus_separators() {
        // "charges" (7) + "Charge" (6) + one separator
        assert_eq!(keyword_score(&charges_pattern(), "3 charges and a Charge"), 14);
    }

    #[test]
    fn test_keyword_score_single_match_has_no_separator() {
        assert_eq!(keyword_score(&charges_pattern(), "one charge"), 6);
    }

    #[test]
    fn test_keyword_score_no_match_is_zero() {
        assert_eq!(keyword_score(&charges_pattern(), "nothing relevant"), 0);
    }

    #[test]
    fn test_keyword_score_empty_text_is_zero() {
        assert_eq!(keyword_score(&charges_pattern(), ""), 0);
    }

    #[test]
    fn test_category_scorer_sums_path_and_content() {
        use crate::attribution_set::AttributionSet;
        use crate::paths::PathResolver;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("charges.rs"), "a Charge here").unwrap();
        let resolver = PathResolver::new(dir.path());

        let scorer = CategoryScorer::new(&["charges".to_string()]).unwrap();
        let mut set =
            AttributionSet::new(&resolver, Path::new("charges.rs"), &scorer.labels()).unwrap();
        scorer
            .score_file(
                &mut set,
                Path::new("charges.rs"),
                &dir.path().join("charges.rs"),
            )
            .unwrap();

        // path: "charges" (7); content: "Charge" (6)
        assert_eq!(set.get("charges").unwrap().weight(), 13);
    }

    #[test]
    fn test_blame_line_maps_known_author_to_group() {
        let parser = BlameLineParser::new().unwrap();
        let attribution = parser.score_line(
            "308f0de6 (Jimbo Weasle 2022-02-27 17:31:33 +0000 1) content",
            &lookup(&[("Jimbo Weasle", "Pooh Bear")]),
        );

        assert_eq!(attribution.label(), "Pooh Bear");
        assert_eq!(attribution.weight(), 1);
    }

    #[test]
    fn test_blame_line_unrecognized_author_is_unknown() {
        let parser = BlameLineParser::new().unwrap();
        let attribution = parser.score_line(
            "308f0de6 (Somebody Else 2022-02-27 17:31:33 +0000 1) content",
            &lookup(&[("Jimbo Weasle", "Pooh Bear")]),
        );

        assert_eq!(attribution.label(), UNKNOWN_LABEL);
        assert_eq!(attribution.weight(), 1);
    }

    #[test]
    fn test_blame_line_unparseable_is_unknown() {
        let parser = BlameLineParser::new().unwrap();
        let attribution = parser.score_line("not a blame line", &lookup(&[]));

        assert_eq!(attribution.label(), UNKNOWN_LABEL);
        assert_eq!(attribution.weight(), 1);
    }

    #[test]
    fn test_blame_line_author_is_right_trimmed() {
        let parser = BlameLineParser::new().unwrap();
        let attribution = parser.score_line(
            "deadbeef (Ada Lovelace  2021-01-02 09:00:00 +0000 4) x = 1",
            &lookup(&[("Ada Lovelace", "Compilers")]),
        );

        assert_eq!(attribution.label(), "Compilers");
    }

    #[test]
    fn test_contribution_labels_are_deduplicated_groups() {
        struct NoBlame;
        impl BlameSource for NoBlame {
            fn annotate(&self, _path: &Path) -> Result<String> {
                Ok(String::new())
            }
        }

        let scorer = ContributionScorer::new(
            lookup(&[
                ("Jimbo Weasle", "Pooh Bear"),
                ("Ada Lovelace", "Compilers"),
                ("Alan Turing", "Compilers"),
            ]),
            NoBlame,
        )
        .unwrap();

        assert_eq!(scorer.labels(), vec!["Compilers", "Pooh Bear"]);
    }
}
