use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::capture::{MediaKind, Recording};

/// Lowest and highest sub-score the random scorer can produce
pub const SUB_SCORE_RANGE: (u8, u8) = (7, 9);

const GENERIC_IDEAL_ANSWER: &str = "The ideal answer would demonstrate deep understanding of the topic, provide specific examples from experience, and show alignment with industry best practices.";

const IDEAL_ANSWERS: [(&str, &str); 3] = [
    (
        "Tell me about yourself and your background.",
        "I am a results-driven professional with X years of experience in [field]. I've developed expertise in [specific skills] through my work at [previous companies/projects]. I'm particularly passionate about [relevant interests] and have a proven track record of [specific achievements].",
    ),
    (
        "Why do you want to work at our company?",
        "I'm impressed by your company's innovation in [specific area] and commitment to [company values]. Your recent [project/product] particularly caught my attention. I believe my skills in [relevant skills] align perfectly with your needs, and I'm excited about contributing to [specific company goals].",
    ),
    (
        "Where do you see yourself in 5 years?",
        "I am looking to advance my career in [specific field] and contribute to [specific company goals]. I am excited about the opportunity to work with [specific team members] and learn from [specific mentors].",
    ),
];

/// Canned model answer for a question, falling back to generic guidance
pub fn ideal_answer(question: &str) -> &'static str {
    IDEAL_ANSWERS
        .iter()
        .find(|(q, _)| *q == question)
        .map(|(_, answer)| *answer)
        .unwrap_or(GENERIC_IDEAL_ANSWER)
}

/// Feedback band a rating falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    /// rating >= 8
    Excellent,
    /// 6 <= rating < 8
    Good,
    /// rating < 6
    NeedsImprovement,
}

impl FeedbackTier {
    pub fn for_rating(rating: u8) -> Self {
        if rating >= 8 {
            FeedbackTier::Excellent
        } else if rating >= 6 {
            FeedbackTier::Good
        } else {
            FeedbackTier::NeedsImprovement
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Excellent => "Excellent response! You demonstrated strong knowledge and provided relevant examples. Consider adding more specific metrics or outcomes to strengthen your answer further.",
            FeedbackTier::Good => "Good answer, but there's room for improvement. Try to include more specific examples and structure your response using the STAR method (Situation, Task, Action, Result).",
            FeedbackTier::NeedsImprovement => "Your answer needs significant improvement. Focus on understanding the core concepts, prepare specific examples from your experience, and practice articulating your thoughts clearly.",
        }
    }
}

pub fn feedback_for_rating(rating: u8) -> &'static str {
    FeedbackTier::for_rating(rating).message()
}

/// The four simulated analysis dimensions of one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub confidence: u8,
    pub clarity: u8,
    pub relevance: u8,
    pub structure: u8,
}

impl SubScores {
    /// Floor of the mean of the four sub-scores
    pub fn rating(&self) -> u8 {
        let total = self.confidence as u16
            + self.clarity as u16
            + self.relevance as u16
            + self.structure as u16;
        (total / 4) as u8
    }
}

/// Evaluation of one answered question. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub question: String,
    pub user_answer: String,
    pub ideal_answer: String,
    pub sub_scores: SubScores,
    pub rating: u8,
    pub tier: FeedbackTier,
    pub feedback: String,
}

impl ScoreRecord {
    pub fn new(question: &str, user_answer: String, sub_scores: SubScores) -> Self {
        let rating = sub_scores.rating();
        let tier = FeedbackTier::for_rating(rating);
        Self {
            question: question.to_string(),
            user_answer,
            ideal_answer: ideal_answer(question).to_string(),
            sub_scores,
            rating,
            tier,
            feedback: tier.message().to_string(),
        }
    }

    /// Analysis text shown right after a recording is scored
    pub fn analysis(&self) -> String {
        format!(
            "Based on the analysis of your answer:\n\n\
             ✓ Confidence Level: {}/10\n\
             ✓ Clarity of Speech: {}/10\n\
             ✓ Relevance: {}/10\n\
             ✓ Structure: {}/10\n\n\
             Rating: {}/10\n\n{}",
            self.sub_scores.confidence,
            self.sub_scores.clarity,
            self.sub_scores.relevance,
            self.sub_scores.structure,
            self.rating,
            self.feedback
        )
    }
}

/// Placeholder for the answer text; recordings are not transcribed
pub fn answer_placeholder(recording: &Recording) -> String {
    let medium = match recording.kind {
        MediaKind::AudioOnly => "Audio",
        MediaKind::AudioVideo => "Video",
    };
    format!(
        "{} response recorded ({:.1}s).",
        medium,
        recording.duration_ms as f64 / 1000.0
    )
}

/// Produces the evaluation for a finished recording.
///
/// Swap implementations to replace the simulated analysis with a real one.
#[async_trait]
pub trait ScoringProvider: Send + Sync {
    async fn score(&self, question: &str, recording: &Recording) -> ScoreRecord;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Simulated analysis: every sub-score is drawn uniformly from 7..=9,
/// independent of the recorded content.
pub struct RandomScorer {
    rng: Mutex<StdRng>,
}

impl RandomScorer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn sample(&self) -> SubScores {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let (low, high) = SUB_SCORE_RANGE;
        SubScores {
            confidence: rng.gen_range(low..=high),
            clarity: rng.gen_range(low..=high),
            relevance: rng.gen_range(low..=high),
            structure: rng.gen_range(low..=high),
        }
    }
}

impl Default for RandomScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoringProvider for RandomScorer {
    async fn score(&self, question: &str, recording: &Recording) -> ScoreRecord {
        ScoreRecord::new(question, answer_placeholder(recording), self.sample())
    }

    fn name(&self) -> &str {
        "random"
    }
}
