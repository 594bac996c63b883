use super::ChatProfile;
use std::fs;

use tracing::info;

use crate::errors::Error;

/// Loads and parses a chat profile from a YAML file
///
/// # Arguments
///
/// * `file_path` - Path to the YAML profile file
///
/// # Returns
///
/// * `Result<ChatProfile, Error>` - The parsed profile on success, or an error
///   if loading/parsing fails
pub fn load_profile(file_path: &str) -> Result<ChatProfile, Error> {
    let yaml_str = fs::read_to_string(file_path)
        .map_err(|e| Error::Config(format!("cannot read profile '{}': {}", file_path, e)))?;
    let profile = parse_profile(&yaml_str)?;
    info!("Loaded chat profile from {}", file_path);
    Ok(profile)
}

/// Parses a chat profile from a YAML string
pub fn parse_profile(yaml_str: &str) -> Result<ChatProfile, Error> {
    serde_yaml::from_str(yaml_str).map_err(|e| Error::Config(format!("invalid profile: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_profile() {
        let yaml = r#"
connection:
  host: db.internal
  port: 3307
  user: analyst
  database: chinook
llm:
  provider: anthropic
  model: claude-sonnet-4-5
"#;
        let profile = parse_profile(yaml).unwrap();
        assert_eq!(profile.connection.host, "db.internal");
        assert_eq!(profile.connection.port, 3307);
        assert_eq!(profile.connection.database.as_deref(), Some("chinook"));
        assert_eq!(profile.llm.provider, "anthropic");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let profile = parse_profile("connection:\n  database: chinook\n").unwrap();
        assert_eq!(profile.connection.host, "localhost");
        assert_eq!(profile.connection.port, 3306);
        assert_eq!(profile.llm.provider, "openai");
    }
}
