// Core exports
pub mod fallback;
pub mod gateway;
pub mod parse;
pub mod prompts;

pub use fallback::{fallback_assignments, fallback_developers, fallback_tickets, FALLBACK_MATCH_SCORE};
pub use gateway::{GatewayError, MatchingGateway};
pub use parse::{parse_records, strip_code_fences, ParseError};
