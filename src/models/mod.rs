// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Developer, Ticket, Assignment};
pub use requests::{GenerateQuery, MatchRequest, MAX_GENERATE_COUNT};
pub use responses::{StatusResponse, ErrorResponse};
