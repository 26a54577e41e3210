// Service exports
pub mod completion;
pub mod openai;

pub use completion::{CompletionError, CompletionRequest, CompletionService};
pub use openai::OpenAiClient;
