//! crates/parallax_core/src/quiz.rs
//!
//! The weighted domain quiz. Each of five questions carries a weight; each
//! option belongs to one category. A category's score is the sum of the
//! weights of the questions whose chosen option belongs to it, normalized by
//! the sum of all weights.
//!
//! Weights are kept in tenths so equal totals compare equal.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    /// Weight in tenths (12 = 1.2).
    pub weight_tenths: u32,
    pub options: &'static [&'static str],
}

impl QuizQuestion {
    pub fn weight(&self) -> f64 {
        f64::from(self.weight_tenths) / 10.0
    }
}

pub static QUIZ_QUESTIONS: [QuizQuestion; 5] = [
    QuizQuestion {
        id: "q1",
        prompt: "Which area excites you the most?",
        weight_tenths: 12,
        options: &[
            "Technology & Innovation",
            "Personal Growth & Motivation",
            "Business & Entrepreneurship",
            "Environment & Sustainability",
            "Art, Culture & Storytelling",
        ],
    },
    QuizQuestion {
        id: "q2",
        prompt: "What kind of experience do you prefer?",
        weight_tenths: 10,
        options: &[
            "Emotional and inspiring",
            "Practical and solution-focused",
            "Thought-provoking and analytical",
            "Entertaining with stories",
        ],
    },
    QuizQuestion {
        id: "q3",
        prompt: "How do you want to feel after the talk?",
        weight_tenths: 11,
        options: &[
            "Energized and motivated",
            "Calm and reflective",
            "Curious and questioning",
            "Empowered to take action",
        ],
    },
    QuizQuestion {
        id: "q4",
        prompt: "Which setting sounds most like you?",
        weight_tenths: 13,
        options: &[
            "Innovator, always exploring new ideas",
            "Dreamer, inspired by journeys and experiences",
            "Problem-solver, looking for actionable insights",
            "Visionary, interested in big-picture thinking",
        ],
    },
    QuizQuestion {
        id: "q5",
        prompt: "Do you enjoy talks that…",
        weight_tenths: 10,
        options: &[
            "Challenge your perspective",
            "Share a personal journey",
            "Offer new tools or skills",
            "Highlight global challenges and solutions",
        ],
    },
];

/// Option text → category.
static CATEGORY_OF: [(&str, Path); 21] = [
    ("Technology & Innovation", Path::Tech),
    ("Personal Growth & Motivation", Path::Influencer),
    ("Business & Entrepreneurship", Path::Gaming),
    ("Environment & Sustainability", Path::Military),
    ("Art, Culture & Storytelling", Path::Influencer),
    ("Emotional and inspiring", Path::Influencer),
    ("Practical and solution-focused", Path::Tech),
    ("Thought-provoking and analytical", Path::Military),
    ("Entertaining with stories", Path::Gaming),
    ("Energized and motivated", Path::Influencer),
    ("Calm and reflective", Path::Military),
    ("Curious and questioning", Path::Tech),
    ("Empowered to take action", Path::Gaming),
    ("Innovator, always exploring new ideas", Path::Tech),
    ("Dreamer, inspired by journeys and experiences", Path::Influencer),
    ("Problem-solver, looking for actionable insights", Path::Military),
    ("Visionary, interested in big-picture thinking", Path::Gaming),
    ("Challenge your perspective", Path::Military),
    ("Share a personal journey", Path::Influencer),
    ("Offer new tools or skills", Path::Tech),
    ("Highlight global challenges and solutions", Path::Gaming),
];

pub fn category_of(option: &str) -> Option<Path> {
    CATEGORY_OF
        .iter()
        .find(|(text, _)| *text == option)
        .map(|(_, path)| *path)
}

/// Name and blurb shown for a quiz outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DomainDescription {
    pub name: &'static str,
    pub description: &'static str,
}

pub fn describe(path: Path) -> DomainDescription {
    match path {
        Path::Influencer => DomainDescription {
            name: "Influencer & Storytelling",
            description: "Focus on personal growth, motivation, and inspiring content",
        },
        Path::Tech => DomainDescription {
            name: "Technology & Innovation",
            description: "Emphasis on practical solutions, tools, and technical innovation",
        },
        Path::Military => DomainDescription {
            name: "Strategic Leadership",
            description: "Analytical thinking, problem-solving, and strategic planning",
        },
        Path::Gaming => DomainDescription {
            name: "Visionary & Gaming",
            description: "Big-picture thinking, entertainment, and strategic vision",
        },
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Unknown quiz question '{0}'")]
    UnknownQuestion(String),
    #[error("'{option}' is not an option of {question}")]
    UnknownOption {
        question: &'static str,
        option: String,
    },
    #[error("Unanswered questions: {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },
}

/// The quiz outcome: every category's percentage and the winner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainMatch {
    pub top_domain: Path,
    pub probabilities: BTreeMap<Path, f64>,
    pub description: DomainDescription,
}

#[derive(Debug, Clone, Default)]
pub struct DomainQuiz {
    selections: BTreeMap<&'static str, &'static str>,
}

impl DomainQuiz {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `option` for `question_id`, replacing any earlier choice.
    pub fn select(&mut self, question_id: &str, option: &str) -> Result<(), QuizError> {
        let question = QUIZ_QUESTIONS
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;
        let option = question
            .options
            .iter()
            .find(|o| **o == option)
            .copied()
            .ok_or_else(|| QuizError::UnknownOption {
                question: question.id,
                option: option.to_string(),
            })?;
        self.selections.insert(question.id, option);
        Ok(())
    }

    pub fn selection(&self, question_id: &str) -> Option<&'static str> {
        self.selections.get(question_id).copied()
    }

    pub fn missing(&self) -> Vec<&'static str> {
        QUIZ_QUESTIONS
            .iter()
            .map(|q| q.id)
            .filter(|id| !self.selections.contains_key(id))
            .collect()
    }

    /// Summed weight (in tenths) per category for the answers given so far.
    fn totals(&self) -> BTreeMap<Path, u32> {
        let mut totals: BTreeMap<Path, u32> = Path::ALL.iter().map(|p| (*p, 0)).collect();
        for question in &QUIZ_QUESTIONS {
            let category = self.selection(question.id).and_then(category_of);
            if let Some(total) = category.and_then(|c| totals.get_mut(&c)) {
                *total += question.weight_tenths;
            }
        }
        totals
    }

    /// Percentages per category for the answers given so far.
    pub fn probabilities(&self) -> BTreeMap<Path, f64> {
        let possible: u32 = QUIZ_QUESTIONS.iter().map(|q| q.weight_tenths).sum();
        self.totals()
            .into_iter()
            .map(|(path, total)| (path, f64::from(total) / f64::from(possible) * 100.0))
            .collect()
    }

    /// Scores a completed quiz.
    ///
    /// Equal scores go to the category declared first in [`Path`].
    pub fn resolve(&self) -> Result<DomainMatch, QuizError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(QuizError::Incomplete { missing });
        }
        let totals = self.totals();
        let top_domain = Path::ALL
            .into_iter()
            .fold(Path::ALL[0], |best, candidate| {
                if totals[&candidate] > totals[&best] {
                    candidate
                } else {
                    best
                }
            });
        Ok(DomainMatch {
            top_domain,
            probabilities: self.probabilities(),
            description: describe(top_domain),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(quiz: &mut DomainQuiz, category: Path) {
        for question in &QUIZ_QUESTIONS {
            let option = question
                .options
                .iter()
                .find(|o| category_of(o) == Some(category))
                .unwrap();
            quiz.select(question.id, option).unwrap();
        }
    }

    #[test]
    fn every_option_has_a_category() {
        for question in &QUIZ_QUESTIONS {
            for option in question.options {
                assert!(category_of(option).is_some(), "{option}");
            }
        }
    }

    #[test]
    fn unanimous_answers_score_one_hundred_percent() {
        for category in Path::ALL {
            let mut quiz = DomainQuiz::new();
            answer_all(&mut quiz, category);
            let outcome = quiz.resolve().unwrap();
            assert_eq!(outcome.top_domain, category);
            assert_eq!(outcome.probabilities[&category], 100.0);
            let others: f64 = outcome
                .probabilities
                .iter()
                .filter(|(p, _)| **p != category)
                .map(|(_, v)| v)
                .sum();
            assert_eq!(others, 0.0);
            assert_eq!(outcome.description, describe(category));
        }
    }

    #[test]
    fn weights_decide_between_categories() {
        let mut quiz = DomainQuiz::new();
        quiz.select("q1", "Technology & Innovation").unwrap(); // tech 1.2
        quiz.select("q2", "Emotional and inspiring").unwrap(); // influencer 1.0
        quiz.select("q3", "Energized and motivated").unwrap(); // influencer 1.1
        quiz.select("q4", "Innovator, always exploring new ideas").unwrap(); // tech 1.3
        quiz.select("q5", "Challenge your perspective").unwrap(); // military 1.0

        let outcome = quiz.resolve().unwrap();
        assert_eq!(outcome.top_domain, Path::Tech);
        assert!((outcome.probabilities[&Path::Tech] - 25.0 / 56.0 * 100.0).abs() < 1e-9);
        assert!((outcome.probabilities[&Path::Influencer] - 21.0 / 56.0 * 100.0).abs() < 1e-9);
        assert_eq!(outcome.probabilities[&Path::Gaming], 0.0);
    }

    #[test]
    fn exact_ties_go_to_the_first_declared_category() {
        // q1 + q3 and q2 + q4 both weigh 2.3.
        let mut quiz = DomainQuiz::new();
        quiz.select("q1", "Environment & Sustainability").unwrap(); // military
        quiz.select("q3", "Calm and reflective").unwrap(); // military
        quiz.select("q2", "Practical and solution-focused").unwrap(); // tech
        quiz.select("q4", "Innovator, always exploring new ideas").unwrap(); // tech
        quiz.select("q5", "Share a personal journey").unwrap(); // influencer
        assert_eq!(quiz.resolve().unwrap().top_domain, Path::Tech);

        let mut swapped = DomainQuiz::new();
        swapped.select("q1", "Technology & Innovation").unwrap(); // tech
        swapped.select("q3", "Curious and questioning").unwrap(); // tech
        swapped.select("q2", "Thought-provoking and analytical").unwrap(); // military
        swapped.select("q4", "Problem-solver, looking for actionable insights").unwrap(); // military
        swapped.select("q5", "Highlight global challenges and solutions").unwrap(); // gaming
        let outcome = swapped.resolve().unwrap();
        assert_eq!(outcome.top_domain, Path::Tech);
        assert!((outcome.probabilities[&Path::Tech] - outcome.probabilities[&Path::Military]).abs() < 1e-9);
    }

    #[test]
    fn reselecting_overwrites_the_previous_answer() {
        let mut quiz = DomainQuiz::new();
        quiz.select("q1", "Technology & Innovation").unwrap();
        quiz.select("q1", "Personal Growth & Motivation").unwrap();
        assert_eq!(quiz.selection("q1"), Some("Personal Growth & Motivation"));
        let probabilities = quiz.probabilities();
        assert_eq!(probabilities[&Path::Tech], 0.0);
        assert!(probabilities[&Path::Influencer] > 0.0);
    }

    #[test]
    fn incomplete_and_unknown_inputs_are_rejected() {
        let mut quiz = DomainQuiz::new();
        quiz.select("q1", "Technology & Innovation").unwrap();
        assert_eq!(
            quiz.resolve(),
            Err(QuizError::Incomplete {
                missing: vec!["q2", "q3", "q4", "q5"]
            })
        );
        assert_eq!(
            quiz.select("q9", "anything"),
            Err(QuizError::UnknownQuestion("q9".to_string()))
        );
        assert!(matches!(
            quiz.select("q2", "Technology & Innovation"),
            Err(QuizError::UnknownOption { question: "q2", .. })
        ));
    }
}
