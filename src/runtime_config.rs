//! Environment-variable runtime configuration.
//!
//! Loaded once at startup:
//!
//! - `BRRTW_STACK_SIZE` sets the coroutine stack size in bytes, decimal or
//!   `0x`-prefixed hex (default `0x4000`, 16 KB).
//! - `BRRTW_TEMPLATE_DIR` names the template directory (default
//!   `templates`).
//! - `BRRTW_ENVIRONMENT` names the deployment environment: `DEVELOPMENT`
//!   (default), `PRODUCTION`, or `TEST`, case-insensitive. Unknown values
//!   fall back to development.

use std::env;
use std::path::PathBuf;

const DEFAULT_STACK_SIZE: usize = 0x4000;
const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// The deployment environment the application runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    fn parse(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "PRODUCTION" => Environment::Production,
            "TEST" => Environment::Test,
            _ => Environment::Development,
        }
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    #[must_use]
    pub fn is_test(&self) -> bool {
        *self == Environment::Test
    }
}

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Stack size for handler coroutines in bytes.
    pub stack_size: usize,
    /// Directory templates are loaded from.
    pub template_dir: PathBuf,
    /// The deployment environment.
    pub environment: Environment,
}

impl RuntimeConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything absent or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = match env::var("BRRTW_STACK_SIZE") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(DEFAULT_STACK_SIZE)
                } else {
                    val.parse().unwrap_or(DEFAULT_STACK_SIZE)
                }
            }
            Err(_) => DEFAULT_STACK_SIZE,
        };
        let template_dir = env::var("BRRTW_TEMPLATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TEMPLATE_DIR));
        let environment = env::var("BRRTW_ENVIRONMENT")
            .map(|name| Environment::parse(&name))
            .unwrap_or_default();

        RuntimeConfig {
            stack_size,
            template_dir,
            environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("TEST"), Environment::Test);
        assert_eq!(Environment::parse("DEVELOPMENT"), Environment::Development);
        // Unfamiliar names fall back to development.
        assert_eq!(Environment::parse("staging"), Environment::Development);
    }

    #[test]
    fn test_environment_predicates() {
        assert!(Environment::Development.is_development());
        assert!(Environment::Production.is_production());
        assert!(Environment::Test.is_test());
        assert!(!Environment::Test.is_production());
    }
}
