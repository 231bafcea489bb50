//! Question filtering.
//!
//! The engine is a pure predicate over the question bank. Callers own the
//! criteria and re-run [`filter`] whenever any of them changes; nothing is
//! cached between calls.

use serde::Serialize;

use crate::models::{Category, Difficulty, Question};

/// Sentinel accepted by every filter dimension meaning "no constraint".
pub const ALL: &str = "All";

/// One filter dimension: either unconstrained or an exact label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// `"All"` (case-sensitive) is the sentinel, anything else is taken literally.
    pub fn parse(s: &str) -> Self {
        if s == ALL {
            Selection::All
        } else {
            Selection::Only(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(value) => value,
        }
    }

    pub fn admits(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl Serialize for Selection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub category: Selection,
    pub difficulty: Selection,
    pub time_to_answer: Selection,
}

impl FilterCriteria {
    pub fn new(search_term: &str, category: &str, difficulty: &str, time_to_answer: &str) -> Self {
        Self {
            search_term: search_term.to_string(),
            category: Selection::parse(category),
            difficulty: Selection::parse(difficulty),
            time_to_answer: Selection::parse(time_to_answer),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty()
            && self.category == Selection::All
            && self.difficulty == Selection::All
            && self.time_to_answer == Selection::All
    }
}

/// Returns the records satisfying every criterion, in their original order.
pub fn filter<'a>(records: &'a [Question], criteria: &FilterCriteria) -> Vec<&'a Question> {
    let needle = criteria.search_term.to_lowercase();
    let matched: Vec<&Question> = records
        .iter()
        .filter(|q| matches_lowered(q, criteria, &needle))
        .collect();
    log::debug!(
        "filter matched {} of {} questions",
        matched.len(),
        records.len()
    );
    matched
}

pub fn matches(question: &Question, criteria: &FilterCriteria) -> bool {
    matches_lowered(question, criteria, &criteria.search_term.to_lowercase())
}

fn matches_lowered(question: &Question, criteria: &FilterCriteria, needle: &str) -> bool {
    matches_text(question, needle)
        && criteria.category.admits(question.category.as_str())
        && criteria.difficulty.admits(question.difficulty.as_str())
        && criteria.time_to_answer.admits(&question.time_to_answer)
}

// `needle` must already be lowercase. Tags use the same substring rule as
// question and answer text.
fn matches_text(question: &Question, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    question.question.to_lowercase().contains(needle)
        || question.answer.to_lowercase().contains(needle)
        || question
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Values a display can offer for each dimension, each list led by `"All"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub difficulties: Vec<String>,
    pub time_buckets: Vec<String>,
}

impl FilterOptions {
    pub fn from_questions(records: &[Question]) -> Self {
        let categories = std::iter::once(ALL)
            .chain(Category::ALL.iter().map(|c| c.as_str()))
            .map(String::from)
            .collect();
        let difficulties = std::iter::once(ALL)
            .chain(Difficulty::ALL.iter().map(|d| d.as_str()))
            .map(String::from)
            .collect();

        let mut buckets: Vec<&str> = Vec::new();
        for q in records {
            if !buckets.contains(&q.time_to_answer.as_str()) {
                buckets.push(&q.time_to_answer);
            }
        }
        for label in buckets.iter().filter(|b| bucket_bounds(b).is_none()) {
            log::warn!("unrecognised time bucket '{}'", label);
        }
        // Stable sort keeps unparseable labels in first-seen order at the end
        buckets.sort_by_key(|b| bucket_bounds(b).unwrap_or((u32::MAX, u32::MAX)));

        let time_buckets = std::iter::once(ALL)
            .chain(buckets)
            .map(String::from)
            .collect();

        Self {
            categories,
            difficulties,
            time_buckets,
        }
    }
}

/// Parses `"<lo>-<hi> minutes"` into its bounds.
pub fn bucket_bounds(label: &str) -> Option<(u32, u32)> {
    let range = label.strip_suffix(" minutes")?;
    let (lo, hi) = range.split_once('-')?;
    Some((lo.trim().parse().ok()?, hi.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn question(
        id: i64,
        text: &str,
        answer: &str,
        category: Category,
        difficulty: Difficulty,
        tags: &[&str],
        time: &str,
    ) -> Question {
        Question {
            id,
            question: text.to_string(),
            answer: answer.to_string(),
            difficulty,
            category,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            time_to_answer: time.to_string(),
            frequency: Frequency::High,
        }
    }

    fn sample() -> Vec<Question> {
        vec![
            question(
                1,
                "What is the difference between 'let', 'const', and 'var'?",
                "var: Function-scoped, can be redeclared",
                Category::JavaScript,
                Difficulty::Easy,
                &["Variables", "Scope", "Hoisting"],
                "2-3 minutes",
            ),
            question(
                2,
                "Explain Closures in JavaScript",
                "A closure keeps access to its outer scope.",
                Category::JavaScript,
                Difficulty::Medium,
                &["Closures", "Scope", "Functions"],
                "5-7 minutes",
            ),
            question(
                6,
                "What is the difference between state and props?",
                "Props (Properties): passed down from parent components",
                Category::React,
                Difficulty::Easy,
                &["State", "Props", "Components"],
                "3-5 minutes",
            ),
            question(
                10,
                "What is the difference between getServerSideProps and getStaticProps?",
                "getServerSideProps runs on every request.",
                Category::NextJs,
                Difficulty::Medium,
                &["SSR", "SSG", "Data Fetching"],
                "5-8 minutes",
            ),
            question(
                12,
                "What is the difference between margin and padding?",
                "Margin is outside the border, padding inside.",
                Category::HtmlCss,
                Difficulty::Easy,
                &["Box Model", "Layout", "Spacing"],
                "2-3 minutes",
            ),
        ]
    }

    fn ids(result: &[&Question]) -> Vec<i64> {
        result.iter().map(|q| q.id).collect()
    }

    fn search(term: &str) -> FilterCriteria {
        FilterCriteria {
            search_term: term.to_string(),
            ..FilterCriteria::default()
        }
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn parse_recognises_sentinel() {
            assert_eq!(Selection::parse("All"), Selection::All);
            assert_eq!(
                Selection::parse("React"),
                Selection::Only("React".to_string())
            );
        }

        #[test]
        fn sentinel_is_case_sensitive() {
            assert_eq!(Selection::parse("all"), Selection::Only("all".to_string()));
        }

        #[test]
        fn admits_exact_match_only() {
            let s = Selection::parse("React");
            assert!(s.admits("React"));
            assert!(!s.admits("react"));
            assert!(!s.admits("React Native"));
            assert!(Selection::All.admits("anything"));
        }

        #[test]
        fn serializes_as_label() {
            let json = serde_json::to_string(&FilterCriteria::default()).unwrap();
            assert!(json.contains("\"category\":\"All\""));
            assert!(json.contains("\"search_term\":\"\""));
        }
    }

    mod property_tests {
        use super::*;

        #[test]
        fn unconstrained_criteria_return_everything_in_order() {
            let records = sample();
            let criteria = FilterCriteria::new("", "All", "All", "All");
            assert!(criteria.is_unconstrained());
            let result = filter(&records, &criteria);
            assert_eq!(ids(&result), vec![1, 2, 6, 10, 12]);
        }

        #[test]
        fn empty_records_yield_empty_result() {
            let result = filter(&[], &search("props"));
            assert!(result.is_empty());
        }

        #[test]
        fn filtering_is_idempotent() {
            let records = sample();
            let criteria = FilterCriteria::new("the", "All", "Easy", "All");
            let first = filter(&records, &criteria);
            let second = filter(&records, &criteria);
            assert_eq!(first, second);
        }

        #[test]
        fn output_preserves_input_order() {
            let records = sample();
            let result = ids(&filter(&records, &search("difference")));
            assert_eq!(result, vec![1, 6, 10, 12]);
            let mut sorted = result.clone();
            sorted.sort();
            assert_eq!(result, sorted);
        }

        #[test]
        fn dimensions_compose_as_intersection() {
            let records = sample();
            let by_category = ids(&filter(
                &records,
                &FilterCriteria::new("", "JavaScript", "All", "All"),
            ));
            let by_difficulty = ids(&filter(
                &records,
                &FilterCriteria::new("", "All", "Easy", "All"),
            ));
            let combined = ids(&filter(
                &records,
                &FilterCriteria::new("", "JavaScript", "Easy", "All"),
            ));

            let intersection: Vec<i64> = by_category
                .iter()
                .copied()
                .filter(|id| by_difficulty.contains(id))
                .collect();
            assert_eq!(combined, intersection);
            assert_eq!(combined, vec![1]);
        }

        #[test]
        fn records_are_not_mutated() {
            let records = sample();
            let before = records.clone();
            let _ = filter(&records, &FilterCriteria::new("x", "React", "Hard", "All"));
            assert_eq!(records, before);
        }
    }

    mod text_tests {
        use super::*;

        #[test]
        fn search_is_case_insensitive() {
            let records = sample();
            assert_eq!(ids(&filter(&records, &search("closure"))), vec![2]);
            assert_eq!(ids(&filter(&records, &search("CLOSURE"))), vec![2]);
        }

        #[test]
        fn search_matches_answer_text() {
            let records = sample();
            assert_eq!(ids(&filter(&records, &search("every request"))), vec![10]);
        }

        #[test]
        fn search_matches_tag_substrings() {
            let records = sample();
            assert_eq!(ids(&filter(&records, &search("fetch"))), vec![10]);
            assert_eq!(ids(&filter(&records, &search("box mod"))), vec![12]);
        }

        #[test]
        fn search_term_is_not_trimmed() {
            let records = sample();
            assert!(filter(&records, &search("closure  ")).is_empty());
        }

        #[test]
        fn unknown_term_returns_empty() {
            let records = sample();
            assert!(filter(&records, &search("zzzzznotfound")).is_empty());
        }

        #[test]
        fn matches_agrees_with_filter() {
            let records = sample();
            let criteria = FilterCriteria::new("scope", "JavaScript", "All", "All");
            let expected: Vec<i64> = records
                .iter()
                .filter(|q| matches(q, &criteria))
                .map(|q| q.id)
                .collect();
            assert_eq!(ids(&filter(&records, &criteria)), expected);
        }
    }

    mod dimension_tests {
        use super::*;

        #[test]
        fn category_requires_exact_label() {
            let records = sample();
            let hit = FilterCriteria::new("", "Next.js", "All", "All");
            let miss = FilterCriteria::new("", "next.js", "All", "All");
            assert_eq!(ids(&filter(&records, &hit)), vec![10]);
            assert!(filter(&records, &miss).is_empty());
        }

        #[test]
        fn time_bucket_filters_exactly() {
            let records = sample();
            let criteria = FilterCriteria::new("", "All", "All", "2-3 minutes");
            assert_eq!(ids(&filter(&records, &criteria)), vec![1, 12]);
        }

        #[test]
        fn unknown_dimension_value_yields_no_matches() {
            let records = sample();
            let criteria = FilterCriteria::new("", "All", "Impossible", "All");
            assert!(filter(&records, &criteria).is_empty());
        }
    }

    mod scenario_tests {
        use super::*;

        fn three() -> Vec<Question> {
            sample()
                .into_iter()
                .filter(|q| [1, 6, 10].contains(&q.id))
                .collect()
        }

        #[test]
        fn props_search_finds_react_and_nextjs() {
            let records = three();
            let criteria = FilterCriteria::new("props", "All", "All", "All");
            assert_eq!(ids(&filter(&records, &criteria)), vec![6, 10]);
        }

        #[test]
        fn react_category_alone() {
            let records = three();
            let criteria = FilterCriteria::new("", "React", "All", "All");
            assert_eq!(ids(&filter(&records, &criteria)), vec![6]);
        }

        #[test]
        fn props_search_within_react() {
            let records = three();
            let criteria = FilterCriteria::new("props", "React", "All", "All");
            assert_eq!(ids(&filter(&records, &criteria)), vec![6]);
        }
    }

    mod options_tests {
        use super::*;

        #[test]
        fn fixed_dimensions_lead_with_all() {
            let options = FilterOptions::from_questions(&sample());
            assert_eq!(
                options.categories,
                vec!["All", "JavaScript", "React", "Next.js", "HTML/CSS"]
            );
            assert_eq!(options.difficulties, vec!["All", "Easy", "Medium", "Hard"]);
        }

        #[test]
        fn time_buckets_are_distinct_and_ordered() {
            let options = FilterOptions::from_questions(&sample());
            assert_eq!(
                options.time_buckets,
                vec!["All", "2-3 minutes", "3-5 minutes", "5-7 minutes", "5-8 minutes"]
            );
        }

        #[test]
        fn unparseable_buckets_sort_last() {
            let mut records = sample();
            records[0].time_to_answer = "a while".to_string();
            let options = FilterOptions::from_questions(&records);
            assert_eq!(options.time_buckets.last().unwrap(), "a while");
        }

        #[test]
        fn repeated_unparseable_bucket_listed_once() {
            let mut records = sample();
            records[0].time_to_answer = "a while".to_string();
            records[2].time_to_answer = "a while".to_string();
            records[3].time_to_answer = "soon".to_string();
            let options = FilterOptions::from_questions(&records);
            let odd: Vec<&String> = options
                .time_buckets
                .iter()
                .filter(|b| bucket_bounds(b).is_none() && b.as_str() != ALL)
                .collect();
            assert_eq!(odd, vec!["a while", "soon"]);
        }

        #[test]
        fn bucket_bounds_parses_ranges() {
            assert_eq!(bucket_bounds("10-15 minutes"), Some((10, 15)));
            assert_eq!(bucket_bounds("1-2 minutes"), Some((1, 2)));
            assert_eq!(bucket_bounds("soon"), None);
            assert_eq!(bucket_bounds("x-y minutes"), None);
            assert_eq!(bucket_bounds("a while"), None);
            assert_eq!(bucket_bounds("5 minutes"), None);
        }
    }
}
