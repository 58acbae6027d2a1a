use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::PromptError;
use crate::types::PromptCategory;

const QUOTES: &[&str] = &[
    "\"The only way to do great work is to love what you do.\" - Steve Jobs",
    "\"In the middle of difficulty lies opportunity.\" - Albert Einstein",
    "\"It always seems impossible until it's done.\" - Nelson Mandela",
    "\"The best way to predict the future is to create it.\" - Peter Drucker",
    "\"Whether you think you can or you think you can't, you're right.\" - Henry Ford",
    "\"Simplicity is the ultimate sophistication.\" - Leonardo da Vinci",
    "\"What we think, we become.\" - Buddha",
    "\"Well done is better than well said.\" - Benjamin Franklin",
    "\"The unexamined life is not worth living.\" - Socrates",
    "\"Be yourself; everyone else is already taken.\" - Oscar Wilde",
    "\"Fall seven times, stand up eight.\" - Japanese proverb",
    "\"Courage is grace under pressure.\" - Ernest Hemingway",
];

const STATEMENTS: &[&str] = &[
    "Social media does more harm than good.",
    "Everyone should learn a second language.",
    "Failure is a better teacher than success.",
    "Remote work is the future of employment.",
    "Homework should be abolished.",
    "Technology makes us less creative.",
    "Travel is the best form of education.",
    "Money can buy happiness.",
    "Public speaking should be a required school subject.",
    "It is better to be a generalist than a specialist.",
    "Cities should ban cars from their centers.",
    "Every adult should volunteer at least once a year.",
];

const QUESTIONS: &[&str] = &[
    "What is the most valuable lesson you have learned so far?",
    "If you could have dinner with anyone, who would it be and why?",
    "What does success mean to you?",
    "Describe a moment that changed your perspective.",
    "What skill would you like to master and why?",
    "If you could change one thing about your city, what would it be?",
    "What is the best advice you have ever received?",
    "How do you handle stress?",
    "What book has influenced you the most?",
    "Where do you see yourself in five years?",
    "What makes a good leader?",
    "What would you do with an extra hour every day?",
];

const THEMED_QUOTES: &[&str] = &[
    "\"Love is composed of a single soul inhabiting two bodies.\" - Aristotle",
    "\"Where there is love there is life.\" - Mahatma Gandhi",
    "\"To love and be loved is to feel the sun from both sides.\" - David Viscott",
    "\"Love all, trust a few, do wrong to none.\" - William Shakespeare",
    "\"The best thing to hold onto in life is each other.\" - Audrey Hepburn",
];

const THEMED_STATEMENTS: &[&str] = &[
    "Love at first sight is real.",
    "Valentine's Day is overrated.",
    "Friendship is more important than romance.",
    "Grand gestures matter more than small everyday kindness.",
    "Opposites attract.",
];

const THEMED_QUESTIONS: &[&str] = &[
    "What is the most romantic thing someone has done for you?",
    "How would you describe love to someone who has never felt it?",
    "What is your idea of a perfect date?",
    "Who taught you the most about kindness?",
    "What small gesture always makes your day better?",
];

/// One set of prompt lists, one per category. Every list is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromptPools {
    quotes: Vec<String>,
    statements: Vec<String>,
    questions: Vec<String>,
}

impl PromptPools {
    pub fn new(
        quotes: Vec<String>,
        statements: Vec<String>,
        questions: Vec<String>,
    ) -> Result<Self, PromptError> {
        Self {
            quotes,
            statements,
            questions,
        }
        .validated()
    }

    pub fn builtin() -> Self {
        Self::from_static(QUOTES, STATEMENTS, QUESTIONS)
    }

    pub fn builtin_themed() -> Self {
        Self::from_static(THEMED_QUOTES, THEMED_STATEMENTS, THEMED_QUESTIONS)
    }

    pub fn from_json_str(content: &str) -> Result<Self, PromptError> {
        serde_json::from_str::<Self>(content)?.validated()
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, PromptError> {
        serde_yaml::from_str::<Self>(content)?.validated()
    }

    pub fn pool(&self, category: PromptCategory) -> &[String] {
        match category {
            PromptCategory::Quote => &self.quotes,
            PromptCategory::Statement => &self.statements,
            PromptCategory::Question => &self.questions,
        }
    }

    /// Uniform pick from the category's list.
    pub fn choose<R: Rng + ?Sized>(&self, category: PromptCategory, rng: &mut R) -> &str {
        // Pools are validated non-empty on construction.
        self.pool(category)
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn from_static(quotes: &[&str], statements: &[&str], questions: &[&str]) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            quotes: owned(quotes),
            statements: owned(statements),
            questions: owned(questions),
        }
    }

    fn validated(mut self) -> Result<Self, PromptError> {
        for (name, pool) in [
            ("quotes", &mut self.quotes),
            ("statements", &mut self.statements),
            ("questions", &mut self.questions),
        ] {
            pool.retain(|p| !p.trim().is_empty());
            if pool.is_empty() {
                return Err(PromptError::EmptyPool(name));
            }
        }
        Ok(self)
    }
}

/// The standard pools plus the themed ("Valentine's Edition") variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLibrary {
    pub standard: PromptPools,
    pub themed: PromptPools,
}

impl PromptLibrary {
    pub fn with_standard(standard: PromptPools) -> Self {
        Self {
            standard,
            themed: PromptPools::builtin_themed(),
        }
    }

    pub fn pools(&self, themed: bool) -> &PromptPools {
        if themed {
            &self.themed
        } else {
            &self.standard
        }
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::with_standard(PromptPools::builtin())
    }
}
