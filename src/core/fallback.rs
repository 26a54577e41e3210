use crate::models::{Assignment, Developer, Ticket};

/// Score given to every positional fallback assignment
pub const FALLBACK_MATCH_SCORE: f64 = 75.0;

/// Skill sets handed out to placeholder developers, in rotation
const SKILL_SETS: &[&[&str]] = &[
    &["Python", "React", "JavaScript"],
    &["Java", "Spring", "MySQL"],
    &["TypeScript", "Node.js", "PostgreSQL"],
    &["Go", "Kubernetes", "Docker"],
    &["Rust", "Tokio", "gRPC"],
];

/// Pair tickets with developers by position
///
/// Produces `min(tickets, developers)` assignments; surplus tickets stay
/// unassigned.
pub fn fallback_assignments(developers: &[Developer], tickets: &[Ticket]) -> Vec<Assignment> {
    tickets
        .iter()
        .zip(developers)
        .map(|(ticket, developer)| Assignment {
            ticket_id: ticket.id.clone(),
            developer_name: developer.name.clone(),
            reason: format!("Matched based on {} years experience", developer.experience_years),
            match_score: FALLBACK_MATCH_SCORE,
        })
        .collect()
}

/// Placeholder developer profiles
pub fn fallback_developers(count: usize) -> Vec<Developer> {
    (0..count)
        .map(|i| {
            let experience_years = 3 + (i % 8) as u32;
            Developer {
                name: format!("Developer {}", i + 1),
                skills: SKILL_SETS[i % SKILL_SETS.len()]
                    .iter()
                    .map(|skill| skill.to_string())
                    .collect(),
                experience_years,
                profile_summary: format!("Software developer with {} years experience", experience_years),
            }
        })
        .collect()
}

/// Placeholder tickets
pub fn fallback_tickets(count: usize) -> Vec<Ticket> {
    (1..=count)
        .map(|n| Ticket {
            id: format!("TASK-{:03}", n),
            title: format!("Sample Task {}", n),
            description: format!("This is a sample development task number {}", n),
        })
        .collect()
}
