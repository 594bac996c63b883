use crate::constants::{SQL_FORMAT_RULES, SQL_SYSTEM_PROMPT, SQL_WORKED_EXAMPLES};
use crate::core::ConversationHistory;
use crate::errors::Error;
use crate::llm::LlmClient;
use tracing::debug;

/// Turns a question plus conversation context into one executable SQL
/// statement.
pub struct SqlGenerator {
    llm_client: LlmClient,
}

impl SqlGenerator {
    pub fn new(llm_client: LlmClient) -> Self {
        SqlGenerator { llm_client }
    }

    /// Generates a single bare SQL statement for `question`.
    ///
    /// The raw completion is normalized (fences and echoed labels stripped)
    /// and rejected if it is empty or contains more than one statement.
    pub async fn generate(
        &self,
        schema: &str,
        history: &ConversationHistory,
        question: &str,
    ) -> Result<String, Error> {
        let prompt = build_sql_prompt(schema, history, question);
        let raw = self.llm_client.complete(SQL_SYSTEM_PROMPT, &prompt).await?;
        let sql = normalize_statement(&raw)?;
        debug!("generated SQL: {}", sql);
        Ok(sql)
    }
}

/// Assembles the SQL-generation prompt. Pure string assembly over fixed
/// skeleton pieces, so identical inputs yield byte-identical prompts.
pub fn build_sql_prompt(schema: &str, history: &ConversationHistory, question: &str) -> String {
    format!(
        "<SCHEMA>{}</SCHEMA>\n\nConversation History:\n{}\n\n{}\n\n{}\n\nYour turn:\n\nQuestion: {}\nSQL Query:",
        schema,
        history.render(),
        SQL_FORMAT_RULES,
        SQL_WORKED_EXAMPLES,
        question
    )
}

/// Reduces a completion to one bare statement.
///
/// Models occasionally fence their output or echo the "SQL Query:" label
/// despite the format rules; both are stripped here rather than handed to the
/// database. Anything still containing a second statement is refused.
fn normalize_statement(raw: &str) -> Result<String, Error> {
    let mut text = raw.trim();

    if let Some(stripped) = text.strip_prefix("```") {
        let stripped = stripped.strip_prefix("sql").unwrap_or(stripped);
        text = stripped.strip_suffix("```").unwrap_or(stripped).trim();
    }
    if let Some(stripped) = text.strip_prefix("SQL Query:") {
        text = stripped.trim();
    }

    if text.is_empty() {
        return Err(Error::Generation("model produced no SQL".into()));
    }

    let body = text.strip_suffix(';').unwrap_or(text);
    if body.contains(';') {
        return Err(Error::Generation(format!(
            "model produced more than one statement: {}",
            text
        )));
    }

    Ok(text.to_string())
}
