use crate::auth::{Error, FyersSessionFactory, DEFAULT_API_BASE};

/// Runtime settings that are not part of the form itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Config {
    pub fn session_factory(&self) -> Result<FyersSessionFactory, Error> {
        FyersSessionFactory::new(&self.api_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_points_at_fyers() {
        let factory = Config::default().session_factory().unwrap();
        assert_eq!(factory.api_base().as_str(), "https://api-t1.fyers.in/api/v3");
    }

    #[test]
    fn bad_base_is_an_error() {
        let config = Config {
            api_base: "::nope".to_string(),
        };
        assert!(config.session_factory().is_err());
    }
}
