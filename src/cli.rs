use clap::Parser;

/// Command line interface for the application
#[derive(Parser)]
#[command(name = "dbchat", about = "Chat with a MySQL database in natural language")]
pub struct Cli {
    /// Path to a YAML profile with connection and LLM settings
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Database host
    #[arg(long, default_value_t = String::from("localhost"))]
    pub host: String,

    /// Database port
    #[arg(long, default_value_t = 3306)]
    pub port: u16,

    /// Database user
    #[arg(long, default_value_t = String::from("root"))]
    pub user: String,

    /// Database password. Falls back to the DBCHAT_DB_PASSWORD environment
    /// variable when omitted.
    #[arg(long)]
    pub password: Option<String>,

    /// Database name to connect to
    #[arg(long)]
    pub database: Option<String>,

    /// LLM provider to use ("openai", "anthropic", "ollama" or "deepseek")
    #[arg(long, default_value_t = String::from("openai"))]
    pub llm_provider: String,

    /// Model name to use with the provider
    #[arg(long, default_value_t = String::from("gpt-4o"))]
    pub llm_model: String,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,
}
