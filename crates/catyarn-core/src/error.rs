/// Errors produced while loading or validating a [`crate::config::CatYarnConfig`].
///
/// Nothing after mount is fatal; these only surface while the host is
/// handing the widget its configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The TOML or JSON source could not be deserialized.
    Parse(String),
    /// The source parsed but a value is out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(m) => write!(f, "config parse error: {m}"),
            Self::Invalid(m) => write!(f, "invalid config: {m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let e = ConfigError::Invalid("cat_width must be > 0".to_string());
        assert_eq!(e.to_string(), "invalid config: cat_width must be > 0");

        let e = ConfigError::Parse("expected a table".to_string());
        assert!(e.to_string().starts_with("config parse error"));
    }
}
