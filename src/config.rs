/// Runtime configuration for the stats database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub create_if_missing: bool,
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://game_stats.db";
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("BARCODEWARS_DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let create_if_missing = std::env::var("BARCODEWARS_CREATE_IF_MISSING")
            .ok()
            .and_then(|s| parse_flag(&s))
            .unwrap_or(true);

        Self {
            database_url,
            create_if_missing,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: IN_MEMORY_DATABASE_URL.to_string(),
            create_if_missing: true,
        }
    }

    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }

    pub fn with_create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = create_if_missing;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            create_if_missing: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("true", Some(true))]
    #[case(" YES ", Some(true))]
    #[case("1", Some(true))]
    #[case("off", Some(false))]
    #[case("0", Some(false))]
    #[case("maybe", None)]
    fn parses_boolean_flags(#[case] input: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_flag(input), expected);
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = AppConfig::default()
            .with_database_url("sqlite://other.db")
            .with_create_if_missing(false);

        assert_eq!(config.database_url, "sqlite://other.db");
        assert!(!config.create_if_missing);
    }

    #[test]
    fn in_memory_config_uses_memory_url() {
        assert_eq!(AppConfig::in_memory().database_url, IN_MEMORY_DATABASE_URL);
    }
}
