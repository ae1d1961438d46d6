pub mod catalog;
pub mod dialogue;
pub mod domain;
pub mod ports;
pub mod quiz;
pub mod registration;

pub use catalog::{Path, Question, QuestionOption};
pub use dialogue::{BotTurn, DialogueError, DialogueSession, DialogueState, QuestionId, TranscriptEntry};
pub use domain::{Attachment, NewRegistration, RegistrationRecord, Speaker, SpeakerFaq};
pub use ports::{FileStorage, PortError, PortResult, RegistrationStore};
pub use quiz::{DomainMatch, DomainQuiz, QuizError};
pub use registration::{
    Field, Notice, NoticeVariant, RegistrationDraft, RegistrationForm, RegistrationPipeline,
    SubmissionError, ValidationErrors,
};
