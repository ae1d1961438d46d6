//! crates/parallax_core/src/catalog.rs
//!
//! Static configuration for the speaker-match dialogue: interest paths, the
//! question tree, the speaker roster and the canned speaker FAQ.

use serde::Serialize;
use std::fmt;

use crate::dialogue::QuestionId;
use crate::domain::{Speaker, SpeakerFaq};

//=========================================================================================
// Interest Paths
//=========================================================================================

/// An interest domain the dialogue resolves a user into.
///
/// Declaration order is significant: it is the tie-break order of the
/// weighted quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Path {
    Influencer,
    Tech,
    Military,
    Gaming,
}

impl Path {
    pub const ALL: [Path; 4] = [Path::Influencer, Path::Tech, Path::Military, Path::Gaming];

    pub fn as_str(self) -> &'static str {
        match self {
            Path::Influencer => "influencer",
            Path::Tech => "tech",
            Path::Military => "military",
            Path::Gaming => "gaming",
        }
    }

    /// Display name used in the resolution sentence.
    pub fn display_name(self) -> &'static str {
        match self {
            Path::Influencer => "Digital Influence",
            Path::Tech => "Technology & Innovation",
            Path::Military => "Leadership & Strategy",
            Path::Gaming => "Digital Entertainment",
        }
    }

    /// Lowercase keywords matched against speaker topics.
    ///
    /// `tech` is an addition so the roster's "Tech" speaker resolves the Tech path.
    pub fn speaker_tags(self) -> &'static [&'static str] {
        match self {
            Path::Influencer => &["social-media", "content-creation", "digital-marketing"],
            Path::Tech => &["tech", "technology", "ai", "innovation", "startup"],
            Path::Military => &["leadership", "strategy", "discipline", "military"],
            Path::Gaming => &["gaming", "esports", "digital-entertainment"],
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================================
// Question Tree
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub text: &'static str,
    pub value: &'static str,
    /// Only set on the branch-selecting question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub options: &'static [QuestionOption],
}

const fn opt(text: &'static str, value: &'static str) -> QuestionOption {
    QuestionOption {
        text,
        value,
        path: None,
    }
}

const fn branch(text: &'static str, value: &'static str, path: Path) -> QuestionOption {
    QuestionOption {
        text,
        value,
        path: Some(path),
    }
}

static OPENING: Question = Question {
    id: QuestionId::Opening,
    prompt: "What kind of world excites you the most?",
    options: &[
        branch("One where stories shape trends and followers", "A", Path::Influencer),
        branch("One driven by innovation and futuristic ideas", "B", Path::Tech),
        branch("One built on discipline, strategy, and honor", "C", Path::Military),
        branch("One full of challenges, quests, and digital adventures", "D", Path::Gaming),
    ],
};

static INFLUENCER: [Question; 3] = [
    Question {
        id: QuestionId::Second(Path::Influencer),
        prompt: "What would you love your audience to feel after watching you?",
        options: &[
            opt("Inspired to change something in their life", "A"),
            opt("Entertained and coming back for more laughs", "B"),
            opt("Educated and empowered with new info", "C"),
            opt("Emotionally connected, like they know the real you", "D"),
        ],
    },
    Question {
        id: QuestionId::Third(Path::Influencer),
        prompt: "What's your secret superpower as a creator?",
        options: &[
            opt("Turning ordinary stories into viral moments", "A"),
            opt("Making complex things easy to understand", "B"),
            opt("Building an authentic bond with my followers", "C"),
            opt("Spotting trends before anyone else", "D"),
        ],
    },
    Question {
        id: QuestionId::Fourth(Path::Influencer),
        prompt: "If you could collab with anyone, who would it be?",
        options: &[
            opt("A visionary brand", "A"),
            opt("A fellow influencer with wild creativity", "B"),
            opt("A social cause campaign", "C"),
            opt("A music artist", "D"),
        ],
    },
];

static TECH: [Question; 3] = [
    Question {
        id: QuestionId::Second(Path::Tech),
        prompt: "What fascinates you most about technology?",
        options: &[
            opt("How it makes life easier", "A"),
            opt("How it connects people across the world", "B"),
            opt("How it pushes the limits of imagination", "C"),
            opt("How it can shape the future responsibly", "D"),
        ],
    },
    Question {
        id: QuestionId::Third(Path::Tech),
        prompt: "Pick your dream project:",
        options: &[
            opt("Building an AI that understands emotions", "A"),
            opt("Creating a startup that solves a real-world problem", "B"),
            opt("Designing futuristic gadgets", "C"),
            opt("Developing a green tech solution", "D"),
        ],
    },
    Question {
        id: QuestionId::Fourth(Path::Tech),
        prompt: "What's your coding spirit animal?",
        options: &[
            opt("The Debugger: patient, precise, unstoppable", "A"),
            opt("The Hacker: creative, curious, rule-bender", "B"),
            opt("The Architect: visionary, system thinker", "C"),
            opt("The Innovator: bold, restless, dreamer", "D"),
        ],
    },
];

static MILITARY: [Question; 3] = [
    Question {
        id: QuestionId::Second(Path::Military),
        prompt: "What motivates you the most?",
        options: &[
            opt("Protecting others and standing for something greater", "A"),
            opt("Working as a team to achieve impossible goals", "B"),
            opt("Strategy and discipline", "C"),
            opt("Adrenaline and challenge", "D"),
        ],
    },
    Question {
        id: QuestionId::Third(Path::Military),
        prompt: "If you were in a tactical mission, what role would you take?",
        options: &[
            opt("The Leader: making the tough calls", "A"),
            opt("The Strategist: mapping every move", "B"),
            opt("The Scout: fast, silent, observant", "C"),
            opt("The Engineer: keeping the mission running", "D"),
        ],
    },
    Question {
        id: QuestionId::Fourth(Path::Military),
        prompt: "What does 'strength' mean to you?",
        options: &[
            opt("Courage under pressure", "A"),
            opt("Loyalty to the team", "B"),
            opt("Mind over matter", "C"),
            opt("The will to keep going, no matter what", "D"),
        ],
    },
];

static GAMING: [Question; 3] = [
    Question {
        id: QuestionId::Second(Path::Gaming),
        prompt: "When you enter a new game world, what's the first thing you do?",
        options: &[
            opt("Explore every corner for hidden secrets", "A"),
            opt("Find teammates and build alliances", "B"),
            opt("Go straight into battle, no time to waste!", "C"),
            opt("Customize your character to perfection", "D"),
        ],
    },
    Question {
        id: QuestionId::Third(Path::Gaming),
        prompt: "What kind of player are you?",
        options: &[
            opt("The Strategist: always two steps ahead", "A"),
            opt("The Grinder: unstoppable, goal-oriented", "B"),
            opt("The Storyteller: loves immersive worlds", "C"),
            opt("The Competitor: it's all about winning", "D"),
        ],
    },
    Question {
        id: QuestionId::Fourth(Path::Gaming),
        prompt: "If your life were a game, what would be your ultimate quest?",
        options: &[
            opt("Mastering new skills", "A"),
            opt("Leading an unbeatable team", "B"),
            opt("Discovering the unknown", "C"),
            opt("Becoming legendary", "D"),
        ],
    },
];

static CLOSING: Question = Question {
    id: QuestionId::Closing,
    prompt: "What do you want people to remember about you after your talk?",
    options: &[
        opt("My ideas changed how they think", "A"),
        opt("My energy inspired them to take action", "B"),
        opt("My story made them believe in themselves", "C"),
        opt("My journey proved that passion wins every time", "D"),
    ],
};

fn path_questions(path: Path) -> &'static [Question; 3] {
    match path {
        Path::Influencer => &INFLUENCER,
        Path::Tech => &TECH,
        Path::Military => &MILITARY,
        Path::Gaming => &GAMING,
    }
}

/// Looks up a question. Every `QuestionId` has exactly one entry.
pub fn question(id: QuestionId) -> &'static Question {
    match id {
        QuestionId::Opening => &OPENING,
        QuestionId::Second(path) => &path_questions(path)[0],
        QuestionId::Third(path) => &path_questions(path)[1],
        QuestionId::Fourth(path) => &path_questions(path)[2],
        QuestionId::Closing => &CLOSING,
    }
}

//=========================================================================================
// Canned Dialogue Text
//=========================================================================================

pub const GREETING: &str = "Hi! I'm here to help you find the perfect speaker that matches your interests. Let's start with a simple question!";

pub const NO_MATCH: &str = "Based on your unique interests, I recommend exploring all our amazing speakers. Each one brings a special perspective that could inspire you in unexpected ways!";

/// The transitional remark sent after answering `id`, for every non-final question.
pub fn remark_after(id: QuestionId) -> Option<&'static str> {
    match id {
        QuestionId::Opening => Some("Great choice! Let's dive deeper into your interests."),
        QuestionId::Second(_) => Some("Interesting perspective! Let's explore that further..."),
        QuestionId::Third(_) => Some(
            "You're getting closer to finding your perfect match! Here's another question...",
        ),
        QuestionId::Fourth(_) => Some(
            "You're really helping me understand your perspective! One final question...",
        ),
        QuestionId::Closing => None,
    }
}

//=========================================================================================
// Speakers
//=========================================================================================

pub static SPEAKERS: [Speaker; 6] = [
    Speaker {
        name: "Major A.K. Singh",
        topic: "Military",
        featured: true,
    },
    Speaker {
        name: "Shams Aalam",
        topic: "Sports",
        featured: true,
    },
    Speaker {
        name: "Neeraj Gaba",
        topic: "Creative Entrepreneur",
        featured: true,
    },
    Speaker {
        name: "Mukesh Jain",
        topic: "Tech",
        featured: true,
    },
    Speaker {
        name: "Rishab Chadha",
        topic: "Actor",
        featured: true,
    },
    Speaker {
        name: "Prachi Tehlan",
        topic: "Actor",
        featured: true,
    },
];

/// Speakers whose topic contains any keyword of `path`.
pub fn speakers_for(path: Path) -> Vec<&'static Speaker> {
    SPEAKERS
        .iter()
        .filter(|speaker| {
            let topic = speaker.topic.to_lowercase();
            path.speaker_tags().iter().any(|tag| topic.contains(tag))
        })
        .collect()
}

pub static SPEAKER_FAQ: [SpeakerFaq; 3] = [
    SpeakerFaq {
        question: "What types of speakers do you have?",
        answer: "We have experts in technology, business, personal development, and more!",
    },
    SpeakerFaq {
        question: "How can I book a speaker?",
        answer: "You can book through our website or contact our team directly.",
    },
    SpeakerFaq {
        question: "What topics do your speakers cover?",
        answer: "Our speakers cover innovation, leadership, marketing, and emerging trends.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_opening_option_selects_a_distinct_path() {
        let paths: Vec<Path> = OPENING.options.iter().filter_map(|o| o.path).collect();
        assert_eq!(paths, Path::ALL.to_vec());
    }

    #[test]
    fn lookup_returns_the_question_with_that_id() {
        for path in Path::ALL {
            for id in [
                QuestionId::Second(path),
                QuestionId::Third(path),
                QuestionId::Fourth(path),
            ] {
                let question = question(id);
                assert_eq!(question.id, id);
                assert_eq!(question.options.len(), 4);
                assert!(question.options.iter().all(|o| o.path.is_none()));
            }
        }
        assert_eq!(question(QuestionId::Closing).id, QuestionId::Closing);
    }

    #[test]
    fn speaker_tags_are_matched_case_insensitively() {
        let military: Vec<&str> = speakers_for(Path::Military).iter().map(|s| s.name).collect();
        assert_eq!(military, vec!["Major A.K. Singh"]);

        let tech: Vec<&str> = speakers_for(Path::Tech).iter().map(|s| s.name).collect();
        assert_eq!(tech, vec!["Mukesh Jain"]);

        assert!(speakers_for(Path::Gaming).is_empty());
    }
}
