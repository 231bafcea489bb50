use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "medium" | "m" => Some(Difficulty::Medium),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

// Labels are the exact strings the category filter compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    JavaScript,
    React,
    #[serde(rename = "Next.js")]
    NextJs,
    #[serde(rename = "HTML/CSS")]
    HtmlCss,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::JavaScript,
        Category::React,
        Category::NextJs,
        Category::HtmlCss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::JavaScript => "JavaScript",
            Category::React => "React",
            Category::NextJs => "Next.js",
            Category::HtmlCss => "HTML/CSS",
        }
    }

    /// Accepts any casing and ignores punctuation, so "nextjs" and "html css" resolve.
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "javascript" | "js" => Some(Category::JavaScript),
            "react" => Some(Category::React),
            "nextjs" | "next" => Some(Category::NextJs),
            "htmlcss" | "html" | "css" => Some(Category::HtmlCss),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::JavaScript => "</>",
            Category::React => "⚛",
            Category::NextJs => "▲",
            Category::HtmlCss => "#",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Medium => "Medium",
            Frequency::High => "High",
            Frequency::VeryHigh => "Very High",
        }
    }

    // Relative weight when picking a practice question at random
    pub fn weight(&self) -> u32 {
        match self {
            Frequency::Medium => 1,
            Frequency::High => 2,
            Frequency::VeryHigh => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
    pub category: Category,
    pub tags: Vec<String>,
    pub time_to_answer: String,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtopic {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub example: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideTopic {
    pub title: String,
    pub subtopics: Vec<Subtopic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guide {
    pub slug: String,
    pub subject: String,
    pub title: String,
    pub description: String,
    pub topics: Vec<GuideTopic>,
}

impl Guide {
    pub fn subtopic_count(&self) -> usize {
        self.topics.iter().map(|t| t.subtopics.len()).sum()
    }
}

// Navigation entries shown on every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    JavaScript,
    React,
    NextJs,
    HtmlCss,
    Interview,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::JavaScript,
        Subject::React,
        Subject::NextJs,
        Subject::HtmlCss,
        Subject::Interview,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Subject::JavaScript => "JavaScript",
            Subject::React => "React",
            Subject::NextJs => "Next.js",
            Subject::HtmlCss => "HTML & CSS",
            Subject::Interview => "Interview Prep",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Subject::JavaScript => "javascript",
            Subject::React => "react",
            Subject::NextJs => "nextjs",
            Subject::HtmlCss => "html-css",
            Subject::Interview => "interview",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Subject::JavaScript => Category::JavaScript.icon(),
            Subject::React => Category::React.icon(),
            Subject::NextJs => Category::NextJs.icon(),
            Subject::HtmlCss => Category::HtmlCss.icon(),
            Subject::Interview => "?",
        }
    }

    pub fn is_guide(&self) -> bool {
        !matches!(self, Subject::Interview)
    }

    /// Question category practised at the end of this subject's guide.
    pub fn category(&self) -> Option<Category> {
        match self {
            Subject::JavaScript => Some(Category::JavaScript),
            Subject::React => Some(Category::React),
            Subject::NextJs => Some(Category::NextJs),
            Subject::HtmlCss => Some(Category::HtmlCss),
            Subject::Interview => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dark" | "d" => Some(Theme::Dark),
            "light" | "l" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

// JSON output wrapper for CLI
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
