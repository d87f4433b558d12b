//! Deterministic question list generation.
//!
//! A list is the three common questions, then the role's questions (none for
//! roles without a table entry), then three questions templated with the
//! company name (none for the "Other" company).

use super::catalog::OTHER_COMPANY;

pub const COMMON_QUESTIONS: [&str; 3] = [
    "Tell me about yourself and your background.",
    "Why do you want to work at our company?",
    "Where do you see yourself in 5 years?",
];

const SOFTWARE_ENGINEER_QUESTIONS: &[&str] = &[
    "Can you explain a challenging technical problem you've solved recently?",
    "What's your experience with system design and scalability?",
    "How do you approach testing and debugging?",
    "Explain the concept of time and space complexity.",
    "What's your preferred programming language and why?",
];

const PRODUCT_MANAGER_QUESTIONS: &[&str] = &[
    "How do you prioritize features in a product roadmap?",
    "Describe a time when you had to make a difficult product decision.",
    "How do you gather and incorporate user feedback?",
    "Walk me through your process for launching a new product.",
    "How do you measure product success?",
];

const DATA_SCIENTIST_QUESTIONS: &[&str] = &[
    "Explain your approach to A/B testing.",
    "How do you handle missing or corrupt data?",
    "Describe a complex data analysis project you've worked on.",
    "What's your experience with machine learning models?",
    "How do you communicate technical findings to non-technical stakeholders?",
];

/// Questions specific to a role. Unknown roles have none.
pub fn role_questions(role: &str) -> &'static [&'static str] {
    match role {
        "Software Engineer" => SOFTWARE_ENGINEER_QUESTIONS,
        "Product Manager" => PRODUCT_MANAGER_QUESTIONS,
        "Data Scientist" => DATA_SCIENTIST_QUESTIONS,
        _ => &[],
    }
}

/// Questions personalised with the company name. Empty for "Other".
pub fn company_questions(company: &str) -> Vec<String> {
    if company == OTHER_COMPANY {
        return Vec::new();
    }

    vec![
        format!("What interests you most about {company}'s products or services?"),
        format!("How would you contribute to {company}'s mission and values?"),
        format!("What recent {company} announcement or product launch excited you?"),
    ]
}

/// Build the ordered question list for a role/company pair
pub fn generate_questions(role: &str, company: &str) -> Vec<String> {
    COMMON_QUESTIONS
        .iter()
        .chain(role_questions(role))
        .map(|q| q.to_string())
        .chain(company_questions(company))
        .collect()
}
