//! Quiz-style drink recommendation.
//!
//! Four fixed questions, each option weighting the four drink categories.
//! Scoring is a pure function of the selected option values.

use serde::Serialize;
use thiserror::Error;

use sakaya_core::Category;

/// Errors from [`score`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosisError {
    #[error("expected {expected} answers, got {actual}")]
    WrongAnswerCount { expected: usize, actual: usize },

    #[error("unknown option {value:?} for question {question:?}")]
    UnknownOption {
        question: &'static str,
        value: String,
    },
}

/// Per-category weights or running totals, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Scores {
    pub sake: u32,
    pub wine: u32,
    pub beer: u32,
    pub shochu: u32,
}

impl Scores {
    const fn new(sake: u32, wine: u32, beer: u32, shochu: u32) -> Self {
        Self {
            sake,
            wine,
            beer,
            shochu,
        }
    }

    fn add(&mut self, other: &Self) {
        self.sake += other.sake;
        self.wine += other.wine;
        self.beer += other.beer;
        self.shochu += other.shochu;
    }

    /// Categories and their totals in tie-break order.
    #[must_use]
    pub const fn entries(&self) -> [(Category, u32); 4] {
        [
            (Category::Sake, self.sake),
            (Category::Wine, self.wine),
            (Category::Beer, self.beer),
            (Category::Shochu, self.shochu),
        ]
    }

    /// Category with the strictly greatest total; ties go to the earlier
    /// entry.
    #[must_use]
    pub fn winner(&self) -> Category {
        let mut best = (Category::Sake, self.sake);
        for (category, total) in self.entries() {
            if total > best.1 {
                best = (category, total);
            }
        }
        best.0
    }
}

/// One selectable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    /// Token recorded in the history.
    pub value: &'static str,
    pub label: &'static str,
    pub weight: Scores,
}

/// A diagnosis question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

impl Question {
    #[must_use]
    pub fn option(&self, value: &str) -> Option<&'static AnswerOption> {
        self.options.iter().find(|opt| opt.value == value)
    }
}

const fn opt(value: &'static str, label: &'static str, weight: Scores) -> AnswerOption {
    AnswerOption {
        value,
        label,
        weight,
    }
}

/// The question table, in answer order.
pub static QUESTIONS: [Question; 4] = [
    Question {
        key: "taste",
        prompt: "どのような味がお好みですか？",
        options: &[
            opt("sweet", "甘い", Scores::new(2, 3, 1, 1)),
            opt("dry", "辛口", Scores::new(3, 2, 2, 3)),
            opt("bitter", "苦い", Scores::new(1, 1, 3, 1)),
            opt("sour", "酸っぱい", Scores::new(1, 3, 1, 1)),
        ],
    },
    Question {
        key: "strength",
        prompt: "アルコール度数の好みは？",
        options: &[
            opt("low", "低め（5-10%）", Scores::new(1, 2, 3, 0)),
            opt("medium", "中程度（10-20%）", Scores::new(3, 3, 1, 1)),
            opt("high", "高め（20%以上）", Scores::new(2, 1, 0, 3)),
        ],
    },
    Question {
        key: "scene",
        prompt: "どのようなシーンで飲みますか？",
        options: &[
            opt("daily", "日常的に", Scores::new(2, 2, 3, 2)),
            opt("special", "特別な日に", Scores::new(3, 3, 1, 2)),
            opt("party", "パーティーで", Scores::new(1, 2, 3, 1)),
            opt("alone", "一人でゆっくり", Scores::new(3, 2, 2, 3)),
        ],
    },
    Question {
        key: "temperature",
        prompt: "温度の好みは？",
        options: &[
            opt("cold", "冷たい", Scores::new(2, 2, 3, 2)),
            opt("room", "常温", Scores::new(2, 3, 1, 2)),
            opt("warm", "温かい", Scores::new(3, 1, 0, 3)),
        ],
    },
];

/// Sum the weights of the selected options.
///
/// # Errors
///
/// Returns `DiagnosisError::WrongAnswerCount` unless exactly one answer per
/// question is given, and `DiagnosisError::UnknownOption` for a value that
/// is not an option of its question.
pub fn tally<S: AsRef<str>>(answers: &[S]) -> Result<Scores, DiagnosisError> {
    if answers.len() != QUESTIONS.len() {
        return Err(DiagnosisError::WrongAnswerCount {
            expected: QUESTIONS.len(),
            actual: answers.len(),
        });
    }

    let mut scores = Scores::default();
    for (question, answer) in QUESTIONS.iter().zip(answers) {
        let answer = answer.as_ref();
        let option = question
            .option(answer)
            .ok_or_else(|| DiagnosisError::UnknownOption {
                question: question.key,
                value: answer.to_owned(),
            })?;
        scores.add(&option.weight);
    }
    Ok(scores)
}

/// Recommended category for a full set of answers.
///
/// # Errors
///
/// See [`tally`].
pub fn score<S: AsRef<str>>(answers: &[S]) -> Result<Category, DiagnosisError> {
    tally(answers).map(|scores| scores.winner())
}
