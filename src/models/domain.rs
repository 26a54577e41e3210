use serde::{Deserialize, Serialize};
use validator::Validate;

/// Developer profile as supplied by the caller or produced by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Developer {
    #[validate(length(min = 1))]
    pub name: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub profile_summary: String,
}

/// A unit of work to be assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Ticket {
    #[validate(length(min = 1))]
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Pairing of a ticket with the developer chosen for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Assignment {
    #[serde(rename = "ticketId")]
    pub ticket_id: String,
    #[serde(rename = "developerName")]
    pub developer_name: String,
    pub reason: String,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}
