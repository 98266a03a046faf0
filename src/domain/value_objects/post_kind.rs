//! Post kinds and their status enums.

use serde::{Deserialize, Serialize};

/// The three flavours of board post.
///
/// Stored in the `posts.kind` column; all kinds share the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// Free-form discussion
    Chat,
    /// Study group recruitment, open or closed
    Study,
    /// Q&A question, solved or unsolved
    Question,
}

impl PostKind {
    /// All kinds, in route order.
    pub const ALL: [PostKind; 3] = [PostKind::Chat, PostKind::Study, PostKind::Question];

    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chat" => Some(Self::Chat),
            "study" => Some(Self::Study),
            "question" => Some(Self::Question),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Study => "study",
            Self::Question => "question",
        }
    }

    /// Collection path segment used by the HTTP API.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Chat => "chats",
            Self::Study => "studies",
            Self::Question => "questions",
        }
    }

    /// Parse a collection path segment (`chats`, `studies`, `questions`).
    pub fn from_collection(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.collection() == s)
    }

    /// Whether posts of this kind carry a toggleable status.
    pub fn has_status(&self) -> bool {
        !matches!(self, Self::Chat)
    }

    /// Status a freshly created post of this kind starts with.
    pub fn initial_status(&self) -> Option<PostStatus> {
        match self {
            Self::Chat => None,
            Self::Study => Some(PostStatus::Study(StudyStatus::Active)),
            Self::Question => Some(PostStatus::Question(QuestionStatus::Unsolved)),
        }
    }
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recruitment state of a study post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudyStatus {
    Active,
    Closed,
}

impl StudyStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Some(Self::Active),
            "CLOSED" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Closed => "CLOSED",
        }
    }

    /// The other value of the pair.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Closed,
            Self::Closed => Self::Active,
        }
    }
}

/// Resolution state of a question post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionStatus {
    Unsolved,
    Solved,
}

impl QuestionStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "UNSOLVED" => Some(Self::Unsolved),
            "SOLVED" => Some(Self::Solved),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsolved => "UNSOLVED",
            Self::Solved => "SOLVED",
        }
    }

    /// The other value of the pair.
    pub fn toggled(self) -> Self {
        match self {
            Self::Unsolved => Self::Solved,
            Self::Solved => Self::Unsolved,
        }
    }
}

/// Status of a post that has one, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Study(StudyStatus),
    Question(QuestionStatus),
}

impl PostStatus {
    /// Parse a status filter for the given kind. Chats have no status.
    pub fn parse(kind: PostKind, s: &str) -> Option<Self> {
        match kind {
            PostKind::Chat => None,
            PostKind::Study => StudyStatus::from_str(s).map(Self::Study),
            PostKind::Question => QuestionStatus::from_str(s).map(Self::Question),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Study(s) => Self::Study(s.toggled()),
            Self::Question(q) => Self::Question(q.toggled()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study(s) => s.as_str(),
            Self::Question(q) => q.as_str(),
        }
    }

    pub fn kind(&self) -> PostKind {
        match self {
            Self::Study(_) => PostKind::Study,
            Self::Question(_) => PostKind::Question,
        }
    }
}
