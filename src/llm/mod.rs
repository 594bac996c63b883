mod llm_client;
mod providers;

pub use llm_client::*;
pub use providers::GenerationBackend;
