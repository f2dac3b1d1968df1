//! Configuration validation.
//!
//! Semantic checks only; serde handles syntax. All problems are reported at
//! once rather than stopping at the first.

use thiserror::Error;

use crate::config::schema::ReceiverConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.listen_address must not be empty")]
    EmptyListenAddress,

    #[error("server.listen_address {0:?} is not of the form host:port")]
    MissingPort(String),

    #[error("logging.level must not be empty")]
    EmptyLogLevel,
}

/// Validate a parsed configuration.
///
/// A half-configured TLS pair is not an error here; the server logs a warning
/// and serves plaintext.
pub fn validate_config(config: &ReceiverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let address = config.server.listen_address.trim();
    if address.is_empty() {
        errors.push(ValidationError::EmptyListenAddress);
    } else if !has_port(address) {
        errors.push(ValidationError::MissingPort(address.to_string()));
    }

    if config.logging.level.trim().is_empty() {
        errors.push(ValidationError::EmptyLogLevel);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn has_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((_, port)) => port.parse::<u16>().is_ok(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ReceiverConfig::default()).is_ok());
    }

    #[test]
    fn hostnames_and_ipv6_are_accepted() {
        let mut config = ReceiverConfig::default();
        config.server.listen_address = "localhost:8080".into();
        assert!(validate_config(&config).is_ok());

        config.server.listen_address = "[::1]:8443".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn reports_every_problem() {
        let mut config = ReceiverConfig::default();
        config.server.listen_address = "localhost".into();
        config.logging.level = " ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingPort("localhost".into()),
                ValidationError::EmptyLogLevel,
            ]
        );
    }

    #[test]
    fn partial_tls_is_not_an_error() {
        let mut config = ReceiverConfig::default();
        config.server.tls_cert = Some("cert.pem".into());
        assert!(validate_config(&config).is_ok());
    }
}
