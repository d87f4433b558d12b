use serde::Serialize;
use std::fmt;

use super::scoring::FeedbackTier;
use super::state::SessionState;

/// One answered question in the summary report
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    /// 1-based position of the question in the list
    pub number: usize,
    pub question: String,
    pub rating: u8,
    pub tier: FeedbackTier,
    pub user_answer: String,
    pub ideal_answer: String,
    pub feedback: String,
}

/// End-of-interview summary
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub interview_id: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub complete: bool,
    pub answered: usize,
    pub question_count: usize,
    pub overall_rating: Option<f64>,
    pub entries: Vec<ReportEntry>,
}

impl SessionReport {
    pub fn new(interview_id: &str, state: &SessionState) -> Self {
        let entries = state
            .score_records
            .iter()
            .enumerate()
            .map(|(i, record)| ReportEntry {
                number: state
                    .questions
                    .iter()
                    .position(|q| *q == record.question)
                    .unwrap_or(i)
                    + 1,
                question: record.question.clone(),
                rating: record.rating,
                tier: record.tier,
                user_answer: record.user_answer.clone(),
                ideal_answer: record.ideal_answer.clone(),
                feedback: record.feedback.clone(),
            })
            .collect();

        Self {
            interview_id: interview_id.to_string(),
            role: state.role.clone(),
            company: state.company.clone(),
            complete: state.is_complete,
            answered: state.score_records.len(),
            question_count: state.questions.len(),
            overall_rating: state.overall_rating(),
            entries,
        }
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.complete {
            writeln!(f, "Congratulations! Interview Complete")?;
        } else {
            writeln!(
                f,
                "Interview in progress ({} of {} answered)",
                self.answered, self.question_count
            )?;
        }

        if let (Some(role), Some(company)) = (&self.role, &self.company) {
            writeln!(f, "{} at {}", role, company)?;
        }

        match self.overall_rating {
            Some(rating) => writeln!(f, "Overall Rating: {:.1}/10", rating)?,
            None => writeln!(f, "Overall Rating: not yet rated")?,
        }

        for entry in &self.entries {
            writeln!(f)?;
            writeln!(f, "Question {}: {}", entry.number, entry.question)?;
            writeln!(f, "Rating: {}/10", entry.rating)?;
            writeln!(f, "Your Answer: {}", entry.user_answer)?;
            writeln!(f, "Ideal Answer: {}", entry.ideal_answer)?;
            writeln!(f, "Feedback for Improvement: {}", entry.feedback)?;
        }

        Ok(())
    }
}
