//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser client and the API server
//! for the speaker-match dialogue.

use parallax_core::catalog::QuestionOption;
use parallax_core::dialogue::{DialogueSession, QuestionId, TranscriptEntry};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Picks option `option_index` of the question currently shown.
    Answer { option_index: usize },

    /// Asks one of the canned speaker questions.
    AskFaq { index: usize },

    /// Closes and reopens the dialogue: back to the greeting and the first question.
    Reset,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The whole transcript. Sent on connect and after a reset.
    Transcript { entries: Vec<TranscriptEntry> },

    /// One line appended to the transcript.
    Entry { entry: TranscriptEntry },

    /// The question the user may answer now. All fields are empty once resolved.
    Options {
        question_id: Option<QuestionId>,
        prompt: Option<&'static str>,
        options: Vec<QuestionOption>,
        resolved: bool,
    },

    /// Reports a rejected client message. The session stays usable.
    Error { message: String },
}

impl ServerMessage {
    pub fn transcript(dialogue: &DialogueSession) -> Self {
        ServerMessage::Transcript {
            entries: dialogue.transcript().to_vec(),
        }
    }

    pub fn options(dialogue: &DialogueSession) -> Self {
        let question = dialogue.current_question();
        ServerMessage::Options {
            question_id: question.map(|q| q.id),
            prompt: question.map(|q| q.prompt),
            options: dialogue.options().to_vec(),
            resolved: question.is_none(),
        }
    }

    /// The most recent transcript line, if any.
    pub fn last_entry(dialogue: &DialogueSession) -> Option<Self> {
        dialogue
            .transcript()
            .last()
            .cloned()
            .map(|entry| ServerMessage::Entry { entry })
    }
}
