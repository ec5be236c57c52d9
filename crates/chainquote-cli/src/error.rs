use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Price(#[from] chainquote_core::PriceError),

    #[error(transparent)]
    Config(#[from] chainquote_core::ConfigError),

    #[error(transparent)]
    Validation(#[from] chainquote_core::ValidationError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Price(_) => 1,
            Self::Config(_) => 2,
            Self::Validation(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use chainquote_core::{ConfigError, PriceError, ValidationError};

    use super::*;

    #[test]
    fn price_failures_exit_with_one() {
        let error = CliError::from(PriceError::upstream_status("1inch", 503));
        assert_eq!(error.exit_code(), 1);
        assert!(error.to_string().contains("price.upstream_status"));
    }

    #[test]
    fn configuration_failures_exit_with_two() {
        let error = CliError::from(ConfigError::from(ValidationError::EmptyBaseUrl));
        assert_eq!(error.exit_code(), 2);

        let error = CliError::from(ValidationError::InvalidDeployment {
            value: String::from("uniswap"),
        });
        assert_eq!(error.exit_code(), 2);
    }
}
