use serde::Serialize;

/// Company selection that opts out of company-specific questions
pub const OTHER_COMPANY: &str = "Other";

pub const JOB_ROLES: &[&str] = &[
    "Software Engineer",
    "Product Manager",
    "Data Scientist",
    "UX Designer",
    "Marketing Manager",
    "Sales Representative",
    "Project Manager",
];

pub const COMPANIES: &[&str] = &[
    "Google",
    "Microsoft",
    "Amazon",
    "Apple",
    "Meta",
    "Netflix",
    "Tesla",
    OTHER_COMPANY,
];

/// Selectable roles and companies offered to the user
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub roles: Vec<&'static str>,
    pub companies: Vec<&'static str>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            roles: JOB_ROLES.to_vec(),
            companies: COMPANIES.to_vec(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
