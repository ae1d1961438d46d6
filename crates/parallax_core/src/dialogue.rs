//! crates/parallax_core/src/dialogue.rs
//!
//! The speaker-match dialogue: a finite question tree walked one answer at a time.
//!
//! The session is a plain state object. Transitions are synchronous; the bot's
//! reply is returned as a [`BotTurn`] for the presentation layer to deliver
//! with whatever pacing it likes.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{self, Path, Question, QuestionOption};
use crate::domain::SpeakerFaq;

//=========================================================================================
// Question Identifiers and the Transition Table
//=========================================================================================

/// Identifies one question of the tree. Wire form: `Q1`, `Q2_tech`, ..., `Q5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionId {
    /// The branch-selecting question.
    Opening,
    Second(Path),
    Third(Path),
    Fourth(Path),
    /// The shared question every path converges on.
    Closing,
}

impl QuestionId {
    /// The question asked after this one. `branch` is only read on `Opening`;
    /// path-specific questions stay on their own path.
    pub fn next(self, branch: Path) -> Option<QuestionId> {
        match self {
            QuestionId::Opening => Some(QuestionId::Second(branch)),
            QuestionId::Second(path) => Some(QuestionId::Third(path)),
            QuestionId::Third(path) => Some(QuestionId::Fourth(path)),
            QuestionId::Fourth(_) => Some(QuestionId::Closing),
            QuestionId::Closing => None,
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Opening => f.write_str("Q1"),
            QuestionId::Second(path) => write!(f, "Q2_{path}"),
            QuestionId::Third(path) => write!(f, "Q3_{path}"),
            QuestionId::Fourth(path) => write!(f, "Q4_{path}"),
            QuestionId::Closing => f.write_str("Q5"),
        }
    }
}

impl Serialize for QuestionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

//=========================================================================================
// Session State
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    AwaitingAnswer(QuestionId),
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub text: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
}

/// What the bot says in response to one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotTurn {
    /// Transitional remark, or the resolution sentence after the last question.
    pub remark: String,
    /// The question to show next; `None` once the dialogue is resolved.
    pub next_question: Option<QuestionId>,
}

impl BotTurn {
    pub fn next_prompt(&self) -> Option<&'static str> {
        self.next_question.map(|id| catalog::question(id).prompt)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DialogueError {
    #[error("The dialogue is already resolved")]
    Resolved,
    #[error("Question {question} has no option {index}")]
    UnknownOption { question: QuestionId, index: usize },
    #[error("There is no speaker question {0}")]
    UnknownFaq(usize),
}

/// Where the walk is. The path is fixed by the opening answer, so every later
/// stage carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Opening,
    OnPath { question: QuestionId, path: Path },
    Resolved { path: Path },
}

#[derive(Debug, Clone)]
pub struct DialogueSession {
    transcript: Vec<TranscriptEntry>,
    stage: Stage,
    answers: BTreeMap<QuestionId, &'static str>,
}

impl DialogueSession {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            transcript: vec![TranscriptEntry {
                text: catalog::GREETING.to_string(),
                is_bot: true,
                timestamp: now,
            }],
            stage: Stage::Opening,
            answers: BTreeMap::new(),
        }
    }

    /// Back to the opening question with only the greeting in the transcript.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::new(now);
    }

    pub fn state(&self) -> DialogueState {
        match self.stage {
            Stage::Opening => DialogueState::AwaitingAnswer(QuestionId::Opening),
            Stage::OnPath { question, .. } => DialogueState::AwaitingAnswer(question),
            Stage::Resolved { .. } => DialogueState::Resolved,
        }
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn path(&self) -> Option<Path> {
        match self.stage {
            Stage::Opening => None,
            Stage::OnPath { path, .. } | Stage::Resolved { path } => Some(path),
        }
    }

    pub fn answers(&self) -> &BTreeMap<QuestionId, &'static str> {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.state() {
            DialogueState::AwaitingAnswer(id) => Some(catalog::question(id)),
            DialogueState::Resolved => None,
        }
    }

    /// The options the user may pick from right now.
    pub fn options(&self) -> &'static [QuestionOption] {
        match self.current_question() {
            Some(question) => question.options,
            None => &[],
        }
    }

    /// Applies the user's choice of option `index` for the active question.
    ///
    /// Nothing is changed when the request is rejected.
    pub fn answer(&mut self, index: usize, now: DateTime<Utc>) -> Result<BotTurn, DialogueError> {
        let (id, known_path) = match self.stage {
            Stage::Opening => (QuestionId::Opening, None),
            Stage::OnPath { question, path } => (question, Some(path)),
            Stage::Resolved { .. } => return Err(DialogueError::Resolved),
        };
        let option = catalog::question(id)
            .options
            .get(index)
            .ok_or(DialogueError::UnknownOption { question: id, index })?;
        // Only the opening options pick a path; later stages keep theirs.
        let branch = known_path
            .or(option.path)
            .ok_or(DialogueError::UnknownOption { question: id, index })?;

        self.answers.insert(id, option.value);
        self.push(option.text, false, now);

        let next_question = id.next(branch);
        let remark = match (next_question, catalog::remark_after(id)) {
            (Some(_), Some(remark)) => remark.to_string(),
            _ => resolution(branch),
        };
        self.stage = match next_question {
            Some(question) => Stage::OnPath {
                question,
                path: branch,
            },
            None => Stage::Resolved { path: branch },
        };

        Ok(BotTurn {
            remark,
            next_question,
        })
    }

    /// Appends a bot line to the transcript.
    pub fn push_bot(&mut self, text: &str, now: DateTime<Utc>) {
        self.push(text, true, now);
    }

    /// Delivers a whole bot turn at once: the remark, then the next prompt.
    pub fn deliver(&mut self, turn: &BotTurn, now: DateTime<Utc>) {
        self.push_bot(&turn.remark, now);
        if let Some(prompt) = turn.next_prompt() {
            self.push_bot(prompt, now);
        }
    }

    /// Answers one of the canned speaker questions. Does not touch the question tree.
    pub fn ask_faq(
        &mut self,
        index: usize,
        now: DateTime<Utc>,
    ) -> Result<&'static SpeakerFaq, DialogueError> {
        let faq = catalog::SPEAKER_FAQ
            .get(index)
            .ok_or(DialogueError::UnknownFaq(index))?;
        self.push(faq.question, false, now);
        self.push(faq.answer, true, now);
        Ok(faq)
    }

    fn push(&mut self, text: &str, is_bot: bool, timestamp: DateTime<Utc>) {
        self.transcript.push(TranscriptEntry {
            text: text.to_string(),
            is_bot,
            timestamp,
        });
    }
}

/// The closing sentence naming the speakers that fit `path`.
pub fn resolution(path: Path) -> String {
    let matched = catalog::speakers_for(path);
    if matched.is_empty() {
        return catalog::NO_MATCH.to_string();
    }
    let names: Vec<&str> = matched.iter().map(|speaker| speaker.name).collect();
    format!(
        "Based on your interests, I think you'll really connect with {}! They share your passion for {}.",
        names.join(" and "),
        path.display_name()
    )
}
