use crate::constants::ANSWER_SYSTEM_PROMPT;
use crate::core::ConversationHistory;
use crate::errors::Error;
use crate::llm::LlmClient;

/// Turns an executed query and its raw result into a natural-language answer.
///
/// Purely a text-to-text transform: it never re-derives or re-runs SQL. When
/// the result text carries a database error, the same call explains that
/// error to the user instead.
pub struct AnswerSynthesizer {
    llm_client: LlmClient,
}

impl AnswerSynthesizer {
    pub fn new(llm_client: LlmClient) -> Self {
        AnswerSynthesizer { llm_client }
    }

    pub async fn synthesize(
        &self,
        schema: &str,
        history: &ConversationHistory,
        question: &str,
        query: &str,
        result: &str,
    ) -> Result<String, Error> {
        let prompt = build_answer_prompt(schema, history, question, query, result);
        self.llm_client.complete(ANSWER_SYSTEM_PROMPT, &prompt).await
    }
}

/// Assembles the answer prompt. Same deterministic skeleton discipline as the
/// SQL prompt.
pub fn build_answer_prompt(
    schema: &str,
    history: &ConversationHistory,
    question: &str,
    query: &str,
    result: &str,
) -> String {
    format!(
        "<SCHEMA>{}</SCHEMA>\n\nConversation History:\n{}\n\nSQL Query: <SQL>{}</SQL>\nQuestion: {}\nSQL Response: {}",
        schema,
        history.render(),
        query,
        question,
        result
    )
}
