use std::sync::Arc;

use tracing::{debug, info};

use crate::constants::SEED_GREETING;
use crate::core::{AnswerSynthesizer, ConversationHistory, SqlGenerator};
use crate::db::{Database, QueryExecutor, SchemaProvider};
use crate::errors::Error;
use crate::llm::LlmClient;

/// One conversation against one database connection.
///
/// Owns the append-only history and runs the four-step cycle for each
/// question: fetch schema, generate SQL, execute, synthesize an answer.
/// A cycle either completes fully or leaves the history untouched.
pub struct ChatSession {
    schema_provider: Arc<dyn SchemaProvider>,
    executor: Arc<dyn QueryExecutor>,
    generator: SqlGenerator,
    synthesizer: AnswerSynthesizer,
    history: ConversationHistory,
}

impl ChatSession {
    /// Builds a session over a live connection, with the greeting seeded.
    pub fn new(database: Arc<Database>, provider: &str, model: &str) -> Result<Self, Error> {
        let generator = SqlGenerator::new(LlmClient::new(provider, model)?);
        let synthesizer = AnswerSynthesizer::new(LlmClient::new(provider, model)?);
        Ok(Self::from_parts(
            database.clone(),
            database,
            generator,
            synthesizer,
        ))
    }

    /// Wires a session from explicit collaborators.
    pub fn from_parts(
        schema_provider: Arc<dyn SchemaProvider>,
        executor: Arc<dyn QueryExecutor>,
        generator: SqlGenerator,
        synthesizer: AnswerSynthesizer,
    ) -> Self {
        ChatSession {
            schema_provider,
            executor,
            generator,
            synthesizer,
            history: ConversationHistory::seeded(SEED_GREETING),
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Runs one full question/answer cycle.
    ///
    /// Schema and generation failures abort the cycle with the history
    /// unchanged. An execution failure does not abort: the database's error
    /// text becomes the result handed to the answer stage, which explains it
    /// to the user. The two history appends happen only after the answer
    /// exists.
    pub async fn answer(&mut self, question: &str) -> Result<String, Error> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::Generation("question is empty".into()));
        }

        let schema = self.schema_provider.schema_text().await?;

        let sql = self
            .generator
            .generate(&schema, &self.history, question)
            .await?;
        info!("running query: {}", sql);

        let result = match self.executor.run(&sql).await {
            Ok(text) => text,
            Err(Error::Execution(message)) => {
                debug!("query failed, folding error into answer: {}", message);
                format!("Error: {}", message)
            }
            Err(other) => return Err(other),
        };

        let answer = self
            .synthesizer
            .synthesize(&schema, &self.history, question, &sql, &result)
            .await?;

        self.history.push_user(question);
        self.history.push_assistant(&answer);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;
    use crate::llm::GenerationBackend;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct FixedSchema {
        fetches: AtomicUsize,
    }

    impl FixedSchema {
        fn new() -> Arc<Self> {
            Arc::new(FixedSchema {
                fetches: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SchemaProvider for FixedSchema {
        async fn schema_text(&self) -> Result<String, Error> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok("Table Artist:\n  Name varchar(120)\n".to_string())
        }
    }

    #[derive(Debug)]
    struct NoConnection;

    #[async_trait]
    impl SchemaProvider for NoConnection {
        async fn schema_text(&self) -> Result<String, Error> {
            Err(Error::Connection("no active connection".into()))
        }
    }

    #[derive(Debug)]
    struct RecordingExecutor {
        runs: AtomicUsize,
        fail_with: Option<String>,
    }

    impl RecordingExecutor {
        fn ok() -> Arc<Self> {
            Arc::new(RecordingExecutor {
                runs: AtomicUsize::new(0),
                fail_with: None,
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(RecordingExecutor {
                runs: AtomicUsize::new(0),
                fail_with: Some(message.to_string()),
            })
        }
    }

    #[async_trait]
    impl QueryExecutor for RecordingExecutor {
        async fn run(&self, _sql: &str) -> Result<String, Error> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(message) => Err(Error::Execution(message.clone())),
                None => Ok("Name\n----\nAC/DC\n(1 row)".to_string()),
            }
        }
    }

    /// Answers the SQL prompt with a statement and every other prompt with
    /// prose, recording what the answer stage was shown.
    #[derive(Debug)]
    struct ScriptedBackend {
        seen_prompts: std::sync::Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new() -> ScriptedBackend {
            ScriptedBackend {
                seen_prompts: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, Error> {
            self.seen_prompts.lock().unwrap().push(prompt.to_string());
            if prompt.ends_with("SQL Query:") {
                Ok("SELECT Name FROM Artist LIMIT 10;".to_string())
            } else {
                Ok("Here are ten artists from the catalog.".to_string())
            }
        }
    }

    #[derive(Debug)]
    struct UnreachableBackend;

    #[async_trait]
    impl GenerationBackend for UnreachableBackend {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, Error> {
            Err(Error::Generation("service unreachable".into()))
        }
    }

    fn session_with(
        schema: Arc<dyn SchemaProvider>,
        executor: Arc<dyn QueryExecutor>,
        sql_backend: Box<dyn GenerationBackend>,
        answer_backend: Box<dyn GenerationBackend>,
    ) -> ChatSession {
        ChatSession::from_parts(
            schema,
            executor,
            SqlGenerator::new(LlmClient::from_backend(sql_backend)),
            AnswerSynthesizer::new(LlmClient::from_backend(answer_backend)),
        )
    }

    #[tokio::test]
    async fn successful_cycle_appends_exactly_two_turns() {
        let schema = FixedSchema::new();
        let executor = RecordingExecutor::ok();
        let mut session = session_with(
            schema.clone(),
            executor.clone(),
            Box::new(ScriptedBackend::new()),
            Box::new(ScriptedBackend::new()),
        );

        assert_eq!(session.history().len(), 1);
        let answer = session.answer("Name 10 artists").await.unwrap();
        assert!(!answer.is_empty());
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history().turns()[1].role, Role::User);
        assert_eq!(session.history().turns()[1].text, "Name 10 artists");
        assert_eq!(session.history().turns()[2].role, Role::Assistant);
        assert_eq!(executor.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn schema_is_fetched_fresh_on_every_call() {
        let schema = FixedSchema::new();
        let mut session = session_with(
            schema.clone(),
            RecordingExecutor::ok(),
            Box::new(ScriptedBackend::new()),
            Box::new(ScriptedBackend::new()),
        );

        session.answer("Name 10 artists").await.unwrap();
        session.answer("And 5 albums?").await.unwrap();
        assert_eq!(schema.fetches.load(Ordering::SeqCst), 2);
    }

    #[derive(Debug)]
    struct SharedBackend(Arc<ScriptedBackend>);

    #[async_trait]
    impl GenerationBackend for SharedBackend {
        async fn complete(&self, system: &str, prompt: &str) -> Result<String, Error> {
            self.0.complete(system, prompt).await
        }
    }

    #[tokio::test]
    async fn execution_error_still_reaches_the_answer_stage() {
        let answer_backend = Arc::new(ScriptedBackend::new());
        let mut session = ChatSession::from_parts(
            FixedSchema::new(),
            RecordingExecutor::failing("unknown column Foo"),
            SqlGenerator::new(LlmClient::from_backend(Box::new(ScriptedBackend::new()))),
            AnswerSynthesizer::new(LlmClient::from_backend(Box::new(SharedBackend(
                answer_backend.clone(),
            )))),
        );

        let before = session.history().len();
        let answer = session.answer("Show me Foo").await.unwrap();
        assert!(!answer.is_empty());
        assert_eq!(session.history().len(), before + 2);

        let prompts = answer_backend.seen_prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Error: unknown column Foo"));
    }

    #[tokio::test]
    async fn generation_failure_aborts_before_execution() {
        let executor = RecordingExecutor::ok();
        let mut session = session_with(
            FixedSchema::new(),
            executor.clone(),
            Box::new(UnreachableBackend),
            Box::new(ScriptedBackend::new()),
        );

        let before = session.history().len();
        let err = session.answer("Name 10 artists").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert_eq!(session.history().len(), before);
        assert_eq!(executor.runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_connection_fails_before_any_generation() {
        #[derive(Debug)]
        struct PanickingBackend;

        #[async_trait]
        impl GenerationBackend for PanickingBackend {
            async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, Error> {
                panic!("generation must not run without a connection");
            }
        }

        let mut session = session_with(
            Arc::new(NoConnection),
            RecordingExecutor::ok(),
            Box::new(PanickingBackend),
            Box::new(PanickingBackend),
        );

        let before = session.history().len();
        let err = session.answer("Name 10 artists").await.unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
        assert_eq!(session.history().len(), before);
    }

    #[tokio::test]
    async fn connection_loss_during_execution_aborts_the_cycle() {
        #[derive(Debug)]
        struct DroppedConnection;

        #[async_trait]
        impl QueryExecutor for DroppedConnection {
            async fn run(&self, _sql: &str) -> Result<String, Error> {
                Err(Error::Connection("connection reset".into()))
            }
        }

        let mut session = session_with(
            FixedSchema::new(),
            Arc::new(DroppedConnection),
            Box::new(ScriptedBackend::new()),
            Box::new(ScriptedBackend::new()),
        );

        let before = session.history().len();
        let err = session.answer("Name 10 artists").await.unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
        assert_eq!(session.history().len(), before);
    }

    #[tokio::test]
    async fn empty_question_is_refused_without_side_effects() {
        let schema = FixedSchema::new();
        let mut session = session_with(
            schema.clone(),
            RecordingExecutor::ok(),
            Box::new(ScriptedBackend::new()),
            Box::new(ScriptedBackend::new()),
        );

        assert!(session.answer("   ").await.is_err());
        assert_eq!(session.history().len(), 1);
        assert_eq!(schema.fetches.load(Ordering::SeqCst), 0);
    }
}
