use crate::{
    policy::{default_achievements, AchievementDef, RewardPolicy},
    quiz::{QuizCategory, QuizQuestion},
    store::Book,
    types::{AccountId, BookId, Credits, Role},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookConfig {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub cost: Credits,
}

impl BookConfig {
    pub fn to_book(&self) -> Book {
        Book::available(self.id, self.title.clone(), self.author.clone(), self.cost)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BookCatalogFile {
    books: Vec<BookConfig>,
}

/// An account registered when the engine starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Fixed id for seeded accounts; generated when absent.
    #[serde(default)]
    pub id: Option<AccountId>,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub initial_credits: Credits,
}

#[derive(Debug, Clone, Deserialize)]
struct RosterFile {
    accounts: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct QuizCatalogFile {
    categories: Vec<QuizCategory>,
}

#[derive(Debug, Clone, Deserialize)]
struct AchievementsFile {
    achievements: Vec<AchievementDef>,
}

/// Self-service faculty enrolment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyJoinConfig {
    /// Shared enrolment token handed out by the institution.
    pub token: String,
    /// Required email suffix, including the `@`.
    pub email_domain: String,
}

impl Default for FacultyJoinConfig {
    fn default() -> Self {
        Self {
            token: "EDU-SECRET-2024".into(),
            email_domain: "@university.edu".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusConfig {
    pub reward_policy: RewardPolicy,
    pub achievements: Vec<AchievementDef>,
    pub quiz_categories: Vec<QuizCategory>,
    pub books: Vec<BookConfig>,
    pub roster: Vec<RosterEntry>,
    pub faculty_join: FacultyJoinConfig,
}

impl CampusConfig {
    /// Load from the data/ directory.
    /// In tests, use CampusConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let reward_policy: RewardPolicy = read_json(data_dir, "policy/rewards.json")?;
        let achievements: AchievementsFile = read_json(data_dir, "policy/achievements.json")?;
        let quiz: QuizCatalogFile = read_json(data_dir, "quiz/categories.json")?;
        let books: BookCatalogFile = read_json(data_dir, "library/books.json")?;
        let roster: RosterFile = read_json(data_dir, "roster/accounts.json")?;
        let faculty_join: FacultyJoinConfig = read_json(data_dir, "faculty/join.json")?;

        let config = Self {
            reward_policy,
            achievements: achievements.achievements,
            quiz_categories: quiz.categories,
            books: books.books,
            roster: roster.accounts,
            faculty_join,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configuration the engine cannot honour.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.reward_policy.activity_rewards.values().any(|r| *r < 0) {
            anyhow::bail!("activity rewards must be non-negative");
        }
        if let Some((kind, _)) = self
            .reward_policy
            .activity_rewards
            .iter()
            .find(|(kind, _)| !kind.is_activity_category())
        {
            anyhow::bail!("'{kind}' is not an activity category");
        }
        if self.reward_policy.quiz_bonus_reward < 0 {
            anyhow::bail!("quiz bonus reward must be non-negative");
        }
        if self.reward_policy.spin_segments.is_empty() {
            anyhow::bail!("spin wheel needs at least one segment");
        }
        if self.reward_policy.spin_segments.iter().any(|v| *v < 0) {
            anyhow::bail!("spin wheel segments must be non-negative");
        }
        if let Some(book) = self.books.iter().find(|b| b.cost < 0) {
            anyhow::bail!("book {} has a negative cost", book.id);
        }
        if let Some(entry) = self.roster.iter().find(|e| e.initial_credits < 0) {
            anyhow::bail!("roster entry '{}' has negative initial credits", entry.email);
        }
        let mut ids = HashSet::new();
        let mut emails = HashSet::new();
        for entry in &self.roster {
            if let Some(id) = &entry.id {
                if !ids.insert(id.as_str()) {
                    anyhow::bail!("roster id '{id}' appears more than once");
                }
            }
            if !emails.insert(entry.email.to_ascii_lowercase()) {
                anyhow::bail!("roster email '{}' appears more than once", entry.email);
            }
        }
        let mut book_ids = HashSet::new();
        if let Some(book) = self.books.iter().find(|b| !book_ids.insert(b.id)) {
            anyhow::bail!("book {} appears more than once", book.id);
        }
        for category in &self.quiz_categories {
            for q in &category.questions {
                q.validate()
                    .map_err(|e| anyhow::anyhow!("quiz '{}': {e}", category.name))?;
            }
        }
        Ok(())
    }

    /// Built-in defaults for tests: the standard reward table, two quiz
    /// categories, a six-book library and a small roster.
    pub fn default_test() -> Self {
        let q = |question: &str, options: [&str; 4], answer: &str, credits: Credits| QuizQuestion {
            question: question.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: answer.into(),
            credits,
        };

        let general_science = QuizCategory {
            name: "General Science".into(),
            questions: vec![
                q("What is the process by which a cell divides into two new daughter cells called?",
                  ["Meiosis", "Mitosis", "Fusion", "Fission"], "Mitosis", 10),
                q("What is the approximate speed of light in a vacuum?",
                  ["300,000 km/s", "150,000 km/s", "500,000 km/s", "1,000,000 km/s"], "300,000 km/s", 10),
                q("In physics, what is the unit of electrical resistance?",
                  ["Watt", "Volt", "Ampere", "Ohm"], "Ohm", 10),
                q("Which gas makes up the majority of the Earth's atmosphere (about 78%)?",
                  ["Oxygen", "Carbon Dioxide", "Nitrogen", "Argon"], "Nitrogen", 10),
                q("What is the name of the galaxy that contains our Solar System?",
                  ["Andromeda", "Triangulum", "Whirlpool", "The Milky Way"], "The Milky Way", 10),
            ],
        };

        let tech = QuizCategory {
            name: "Current Affairs - Tech".into(),
            questions: vec![
                q("What does the acronym \"LLM\" stand for in the context of AI?",
                  ["Low-Level Machine", "Large Language Model", "Linear Logic Module", "Live Learning Machine"],
                  "Large Language Model", 20),
                q("Which cryptocurrency was the first to be created?",
                  ["Ethereum", "Ripple", "Bitcoin", "Litecoin"], "Bitcoin", 20),
                q("Quantum computing uses what fundamental unit of information?",
                  ["Quants", "Photons", "Qubits", "Superbits"], "Qubits", 20),
                q("What is \"Starlink\"?",
                  ["A NASA space telescope", "A new video game console",
                   "A satellite internet constellation", "An AI-powered search engine"],
                  "A satellite internet constellation", 20),
                q("Which company is behind the \"React\" JavaScript library?",
                  ["Google", "Microsoft", "Meta", "Amazon"], "Meta", 20),
            ],
        };

        let book = |id: BookId, title: &str, author: &str, cost: Credits| BookConfig {
            id,
            title: title.into(),
            author: author.into(),
            cost,
        };

        let entry = |id: &str, name: &str, email: &str, role: Role, initial_credits: Credits| RosterEntry {
            id: Some(id.into()),
            name: name.into(),
            email: email.into(),
            role,
            initial_credits,
        };

        Self {
            reward_policy: RewardPolicy::default(),
            achievements: default_achievements(),
            quiz_categories: vec![general_science, tech],
            books: vec![
                book(1, "Smart Contract Development", "Jane Doe", 50),
                book(2, "Advanced React Patterns", "John Smith", 75),
                book(3, "The Decentralized Future", "Alice Brown", 60),
                book(4, "UI/UX for Web3", "Bob White", 40),
                book(5, "Blockchain for Beginners", "Clara Green", 30),
                book(6, "Mastering Tailwind CSS", "Eve Black", 45),
            ],
            roster: vec![
                entry("user-001", "Alex Johnson", "alex.j@university.edu", Role::Student, 500),
                entry("user-002", "Priya Sharma", "priya.s@university.edu", Role::Student, 120),
                entry("user-003", "Rohan Gupta", "rohan.g@university.edu", Role::Student, 340),
                entry("user-004", "Anjali Verma", "anjali.v@university.edu", Role::Student, 850),
                entry("faculty-001", "Dr. Evelyn Reed", "e.reed@university.edu", Role::Faculty, 0),
            ],
            faculty_join: FacultyJoinConfig::default(),
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(data_dir: &str, relative: &str) -> anyhow::Result<T> {
    let path = format!("{data_dir}/{relative}");
    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))
}
