use crate::models::{Developer, Ticket};

pub fn match_prompt(developers: &[Developer], tickets: &[Ticket]) -> Result<String, serde_json::Error> {
    let developers = serde_json::to_string(developers)?;
    let tickets = serde_json::to_string(tickets)?;

    Ok(format!(
        r#"Match these developers to tickets. Return JSON array only:

DEVELOPERS: {developers}
TICKETS: {tickets}

Return format:
[
    {{
        "ticketId": "ticket_id",
        "developerName": "Developer Name",
        "reason": "Why this match makes sense",
        "matchScore": 85.5
    }}
]
"matchScore" must be a number between 0 and 100."#
    ))
}

pub fn developers_prompt(count: usize) -> String {
    format!(
        r#"Generate {count} realistic software developer profiles. Return JSON array only:
[
    {{
        "name": "Full Name",
        "skills": ["skill1", "skill2", "skill3"],
        "experience_years": 5,
        "profile_summary": "Brief summary"
    }}
]"#
    )
}

pub fn tickets_prompt(count: usize) -> String {
    format!(
        r#"Generate {count} realistic software development tickets. Return JSON array only:
[
    {{
        "id": "TASK-001",
        "title": "Task title",
        "description": "Detailed description"
    }}
]"#
    )
}
