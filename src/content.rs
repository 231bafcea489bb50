use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::filter::{self, FilterCriteria, FilterOptions};
use crate::models::{Category, Difficulty, Guide, GuideTopic, Question};

const QUESTIONS_JSON: &str = include_str!("../data/questions.json");
const GUIDES_JSON: &str = include_str!("../data/guides.json");

/// The read-only question bank and tutorial guides.
///
/// Built once at startup and never mutated afterwards, so it can be shared
/// freely by reference.
#[derive(Debug)]
pub struct Library {
    questions: Vec<Question>,
    guides: Vec<Guide>,
}

impl Library {
    pub fn load_embedded() -> Result<Self> {
        Self::from_json(QUESTIONS_JSON, GUIDES_JSON)
    }

    pub fn from_json(questions_json: &str, guides_json: &str) -> Result<Self> {
        let questions: Vec<Question> =
            serde_json::from_str(questions_json).map_err(|source| Error::Content {
                what: "questions",
                source,
            })?;
        let guides: Vec<Guide> =
            serde_json::from_str(guides_json).map_err(|source| Error::Content {
                what: "guides",
                source,
            })?;

        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id) {
                return Err(Error::DuplicateId(q.id));
            }
            if q.question.is_empty() {
                return Err(Error::EmptyField {
                    id: q.id,
                    field: "question",
                });
            }
            if q.answer.is_empty() {
                return Err(Error::EmptyField {
                    id: q.id,
                    field: "answer",
                });
            }
        }

        log::debug!(
            "loaded {} questions and {} guides",
            questions.len(),
            guides.len()
        );
        Ok(Self { questions, guides })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn search(&self, criteria: &FilterCriteria) -> Vec<&Question> {
        filter::filter(&self.questions, criteria)
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_questions(&self.questions)
    }

    // Stochastic pick among the matches, weighted toward frequently asked questions
    pub fn random_question<R: Rng>(
        &self,
        criteria: &FilterCriteria,
        rng: &mut R,
    ) -> Option<&Question> {
        let candidates = self.search(criteria);
        if candidates.is_empty() {
            return None;
        }

        let total_weight: u32 = candidates.iter().map(|q| q.frequency.weight()).sum();
        let mut point = rng.gen_range(0..total_weight);
        for q in candidates.iter().copied() {
            let weight = q.frequency.weight();
            if point < weight {
                return Some(q);
            }
            point -= weight;
        }

        candidates.first().copied()
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// Finds a guide by slug, subject or title, ignoring case and punctuation,
    /// so "nextjs", "Next.js" and "next js" all resolve to the same guide.
    pub fn guide(&self, name: &str) -> Result<&Guide> {
        let wanted = normalize(name);
        self.guides
            .iter()
            .find(|g| {
                normalize(&g.slug) == wanted
                    || normalize(&g.subject) == wanted
                    || normalize(&g.title) == wanted
            })
            .ok_or_else(|| Error::UnknownSubject(name.to_string()))
    }

    /// Exact title match first, then the first topic whose title contains `title`.
    pub fn topic<'a>(&self, guide: &'a Guide, title: &str) -> Result<&'a GuideTopic> {
        let wanted = title.to_lowercase();
        guide
            .topics
            .iter()
            .find(|t| t.title.to_lowercase() == wanted)
            .or_else(|| {
                guide
                    .topics
                    .iter()
                    .find(|t| t.title.to_lowercase().contains(&wanted))
            })
            .ok_or_else(|| Error::UnknownTopic {
                guide: guide.title.clone(),
                topic: title.to_string(),
            })
    }

    pub fn stats(&self) -> Stats {
        let by_category = Category::ALL
            .iter()
            .map(|c| CountEntry {
                label: c.as_str().to_string(),
                count: self.questions.iter().filter(|q| q.category == *c).count(),
            })
            .collect();
        let by_difficulty = Difficulty::ALL
            .iter()
            .map(|d| CountEntry {
                label: d.as_str().to_string(),
                count: self.questions.iter().filter(|q| q.difficulty == *d).count(),
            })
            .collect();

        Stats {
            total_questions: self.questions.len(),
            by_category,
            by_difficulty,
            guides: self.guides.len(),
            topics: self.guides.iter().map(|g| g.topics.len()).sum(),
            subtopics: self.guides.iter().map(|g| g.subtopic_count()).sum(),
            code_examples: self
                .guides
                .iter()
                .flat_map(|g| &g.topics)
                .flat_map(|t| &t.subtopics)
                .filter(|s| !s.example.is_empty())
                .count(),
        }
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_questions: usize,
    pub by_category: Vec<CountEntry>,
    pub by_difficulty: Vec<CountEntry>,
    pub guides: usize,
    pub topics: usize,
    pub subtopics: usize,
    pub code_examples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn library() -> Library {
        Library::load_embedded().expect("embedded content should parse")
    }

    const GUIDES_EMPTY: &str = "[]";

    mod load_tests {
        use super::*;

        #[test]
        fn embedded_content_loads() {
            let lib = library();
            assert_eq!(lib.questions().len(), 35);
            assert_eq!(lib.guides().len(), 4);
        }

        #[test]
        fn ids_are_unique_and_in_order() {
            let lib = library();
            let ids: Vec<i64> = lib.questions().iter().map(|q| q.id).collect();
            let expected: Vec<i64> = (1..=35).collect();
            assert_eq!(ids, expected);
        }

        #[test]
        fn rejects_duplicate_ids() {
            let json = r#"[
                {"id": 1, "question": "a", "answer": "b", "difficulty": "Easy",
                 "category": "React", "tags": [], "time_to_answer": "1-2 minutes",
                 "frequency": "High"},
                {"id": 1, "question": "c", "answer": "d", "difficulty": "Hard",
                 "category": "React", "tags": [], "time_to_answer": "1-2 minutes",
                 "frequency": "High"}
            ]"#;
            let err = Library::from_json(json, GUIDES_EMPTY).unwrap_err();
            assert!(matches!(err, Error::DuplicateId(1)));
        }

        #[test]
        fn rejects_empty_answer() {
            let json = r#"[
                {"id": 4, "question": "a", "answer": "", "difficulty": "Easy",
                 "category": "JavaScript", "tags": ["x"], "time_to_answer": "1-2 minutes",
                 "frequency": "Medium"}
            ]"#;
            let err = Library::from_json(json, GUIDES_EMPTY).unwrap_err();
            assert!(matches!(
                err,
                Error::EmptyField {
                    id: 4,
                    field: "answer"
                }
            ));
        }

        #[test]
        fn rejects_unknown_category() {
            let json = r#"[
                {"id": 1, "question": "a", "answer": "b", "difficulty": "Easy",
                 "category": "Svelte", "tags": [], "time_to_answer": "1-2 minutes",
                 "frequency": "High"}
            ]"#;
            let err = Library::from_json(json, GUIDES_EMPTY).unwrap_err();
            assert!(matches!(err, Error::Content { what: "questions", .. }));
        }

        #[test]
        fn rejects_malformed_guides() {
            let err = Library::from_json("[]", "{").unwrap_err();
            assert!(matches!(err, Error::Content { what: "guides", .. }));
        }

        #[test]
        fn empty_bank_is_allowed() {
            let lib = Library::from_json("[]", GUIDES_EMPTY).unwrap();
            assert!(lib.questions().is_empty());
            assert!(lib.search(&FilterCriteria::default()).is_empty());
        }
    }

    mod question_tests {
        use super::*;

        #[test]
        fn question_by_id() {
            let lib = library();
            let q = lib.question(2).unwrap();
            assert_eq!(q.question, "Explain closures in JavaScript");
            assert_eq!(q.category, Category::JavaScript);
        }

        #[test]
        fn question_not_found() {
            assert!(library().question(999).is_none());
        }

        #[test]
        fn unconstrained_search_returns_whole_bank() {
            let lib = library();
            let result = lib.search(&FilterCriteria::default());
            assert_eq!(result.len(), lib.questions().len());
            assert!(result
                .iter()
                .zip(lib.questions())
                .all(|(a, b)| a.id == b.id));
        }

        #[test]
        fn closure_search_finds_closure_question() {
            let lib = library();
            let criteria = FilterCriteria::new("closure", "All", "All", "All");
            let ids: Vec<i64> = lib.search(&criteria).iter().map(|q| q.id).collect();
            assert!(ids.contains(&2));
        }

        #[test]
        fn react_props_scenario_on_embedded_bank() {
            let lib = library();
            let records: Vec<Question> = lib
                .questions()
                .iter()
                .filter(|q| [1, 6, 10].contains(&q.id))
                .cloned()
                .collect();

            let props = FilterCriteria::new("props", "All", "All", "All");
            let react = FilterCriteria::new("", "React", "All", "All");
            let both = FilterCriteria::new("props", "React", "All", "All");

            let ids = |c: &FilterCriteria| -> Vec<i64> {
                filter::filter(&records, c).iter().map(|q| q.id).collect()
            };
            assert_eq!(ids(&props), vec![6, 10]);
            assert_eq!(ids(&react), vec![6]);
            assert_eq!(ids(&both), vec![6]);
        }

        #[test]
        fn nonsense_search_is_empty() {
            let lib = library();
            let criteria = FilterCriteria::new("zzzzznotfound", "All", "All", "All");
            assert!(lib.search(&criteria).is_empty());
        }
    }

    mod random_tests {
        use super::*;

        #[test]
        fn random_respects_criteria() {
            let lib = library();
            let mut rng = StdRng::seed_from_u64(7);
            let criteria = FilterCriteria::new("", "Next.js", "All", "All");
            for _ in 0..20 {
                let q = lib.random_question(&criteria, &mut rng).unwrap();
                assert_eq!(q.category, Category::NextJs);
            }
        }

        #[test]
        fn random_with_no_matches_is_none() {
            let lib = library();
            let mut rng = StdRng::seed_from_u64(1);
            let criteria = FilterCriteria::new("zzzzznotfound", "All", "All", "All");
            assert!(lib.random_question(&criteria, &mut rng).is_none());
        }

        #[test]
        fn random_single_candidate_is_always_picked() {
            let lib = library();
            let mut rng = StdRng::seed_from_u64(3);
            let criteria = FilterCriteria::new("callback hell", "All", "All", "All");
            let q = lib.random_question(&criteria, &mut rng).unwrap();
            assert_eq!(q.id, 18);
        }
    }

    mod guide_tests {
        use super::*;

        #[test]
        fn guide_lookup_ignores_case_and_punctuation() {
            let lib = library();
            assert_eq!(lib.guide("nextjs").unwrap().slug, "nextjs");
            assert_eq!(lib.guide("Next.js").unwrap().slug, "nextjs");
            assert_eq!(lib.guide("html & css").unwrap().slug, "html-css");
            assert_eq!(lib.guide("HTML-CSS").unwrap().slug, "html-css");
            assert_eq!(lib.guide("React Development").unwrap().slug, "react");
        }

        #[test]
        fn unknown_guide_is_an_error() {
            let err = library().guide("svelte").unwrap_err();
            assert!(matches!(err, Error::UnknownSubject(ref s) if s == "svelte"));
        }

        #[test]
        fn topic_lookup_prefers_exact_then_substring() {
            let lib = library();
            let guide = lib.guide("javascript").unwrap();
            let exact = lib.topic(guide, "es6+ features").unwrap();
            let partial = lib.topic(guide, "async").unwrap();
            assert_eq!(exact.title, "ES6+ Features");
            assert_eq!(partial.title, "Async Programming");
        }

        #[test]
        fn unknown_topic_is_an_error() {
            let lib = library();
            let guide = lib.guide("react").unwrap();
            let err = lib.topic(guide, "redux toolkit").unwrap_err();
            assert!(matches!(err, Error::UnknownTopic { .. }));
        }

        #[test]
        fn every_guide_has_topics_with_subtopics() {
            for guide in library().guides() {
                assert!(!guide.topics.is_empty(), "{} has no topics", guide.slug);
                for topic in &guide.topics {
                    assert!(!topic.subtopics.is_empty(), "{} is empty", topic.title);
                }
            }
        }
    }

    mod stats_tests {
        use super::*;

        #[test]
        fn stats_totals_add_up() {
            let stats = library().stats();
            assert_eq!(stats.total_questions, 35);
            let by_category: usize = stats.by_category.iter().map(|e| e.count).sum();
            let by_difficulty: usize = stats.by_difficulty.iter().map(|e| e.count).sum();
            assert_eq!(by_category, 35);
            assert_eq!(by_difficulty, 35);
        }

        #[test]
        fn stats_counts_guide_structure() {
            let stats = library().stats();
            assert_eq!(stats.guides, 4);
            assert_eq!(stats.topics, 14);
            assert_eq!(stats.subtopics, 30);
            assert!(stats.code_examples <= stats.subtopics);
        }

        #[test]
        fn stats_on_empty_library() {
            let stats = Library::from_json("[]", "[]").unwrap().stats();
            assert_eq!(stats.total_questions, 0);
            assert!(stats.by_category.iter().all(|e| e.count == 0));
            assert_eq!(stats.subtopics, 0);
        }
    }

    mod options_tests {
        use super::*;

        #[test]
        fn time_buckets_cover_every_question() {
            let lib = library();
            let options = lib.filter_options();
            for q in lib.questions() {
                assert!(options.time_buckets.contains(&q.time_to_answer));
            }
            assert_eq!(options.time_buckets[0], "All");
            assert_eq!(options.time_buckets[1], "1-2 minutes");
        }

        #[test]
        fn every_time_bucket_has_matches() {
            let lib = library();
            for bucket in lib.filter_options().time_buckets.iter().skip(1) {
                let criteria = FilterCriteria::new("", "All", "All", bucket);
                assert!(!lib.search(&criteria).is_empty(), "{} is empty", bucket);
            }
        }
    }
}
