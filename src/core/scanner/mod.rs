// src/core/scanner/mod.rs

//! Aggregation layer driving the diagnostic engines.
//!
//! Both engines share the same contract: input validation happens before
//! any probe is dispatched, individual probe failures are absorbed into
//! per-item results, and only the shared precondition of the blacklist
//! engine (resolving the base A record) can fail a whole run.

pub mod health_scanner;
pub mod rbl_scanner;

use thiserror::Error;

use crate::core::resolver::LookupError;

pub use health_scanner::run_health_scan;
pub use rbl_scanner::run_blacklist_scan;

/// Fatal, run-level failures. Everything else is folded into item results.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("domain must not be empty")]
    EmptyDomain,
    #[error("could not resolve A record for {domain}: {source}")]
    BaseResolution {
        domain: String,
        #[source]
        source: LookupError,
    },
}

/// Rejects empty or blank input before any probe work begins.
pub(crate) fn validate_domain(input: &str) -> Result<&str, ScanError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ScanError::EmptyDomain);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_domain_is_rejected() {
        assert!(matches!(validate_domain(""), Err(ScanError::EmptyDomain)));
        assert!(matches!(validate_domain("   "), Err(ScanError::EmptyDomain)));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(validate_domain(" example.com ").unwrap(), "example.com");
    }
}
