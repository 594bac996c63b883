/// Errors produced by the chat pipeline and its collaborators.
///
/// `Connection` and `Generation` abort the current question/answer cycle
/// without touching the conversation history. `Execution` is recovered by the
/// pipeline itself: the database's error text is handed to the answer stage so
/// the failure can be explained in natural language.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database connection error: {0}")]
    Connection(String),
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("query execution failed: {0}")]
    Execution(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("input error: {0}")]
    Input(#[from] std::io::Error),
}
