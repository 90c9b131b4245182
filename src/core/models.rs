// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

// --- Blacklist probe results ---

/// Outcome of a single blacklist probe.
///
/// `Ok` is the common, good case (the zone returned NXDOMAIN, meaning the
/// target is not listed). `Timeout` and `Error` are inconclusive outcomes
/// and are reported as such rather than being folded into `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeStatus {
    Listed,
    Ok,
    Timeout,
    Error,
}

/// One row of the blacklist report, one per configured blacklist zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub blacklist: String,
    pub status: ProbeStatus,
    pub reason: String,
    /// Wall-clock time of the probe in milliseconds.
    pub response_time: u64,
    /// TTL of the returned A record; only present when listed.
    pub ttl: Option<u32>,
}

/// Aggregated blacklist report for a single domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistReport {
    pub domain: String,
    pub ip: String,
    pub total_checked: usize,
    pub listed_count: usize,
    pub timeout_count: usize,
    pub results: Vec<ProbeResult>,
    pub checked_at: DateTime<Utc>,
}

impl BlacklistReport {
    /// Builds the report from the collected probe results, deriving the
    /// counts from the result set so they can never disagree with it.
    pub fn new(domain: String, ip: String, results: Vec<ProbeResult>) -> Self {
        let listed_count = results
            .iter()
            .filter(|r| r.status == ProbeStatus::Listed)
            .count();
        let timeout_count = results
            .iter()
            .filter(|r| r.status == ProbeStatus::Timeout)
            .count();
        Self {
            domain,
            ip,
            total_checked: results.len(),
            listed_count,
            timeout_count,
            results,
            checked_at: Utc::now(),
        }
    }
}

// --- Health check results ---

/// Severity of a single health check outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

/// High-level grouping for health checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CheckCategory {
    Dns,
    Email,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    pub status: CheckStatus,
    pub category: CheckCategory,
    pub test: String,
    pub message: String,
}

impl HealthCheckResult {
    pub fn new(
        status: CheckStatus,
        category: CheckCategory,
        test: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            category,
            test: test.to_string(),
            message: message.into(),
        }
    }
}

/// Overall verdict for a health report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SummaryStatus {
    Healthy,
    Warnings,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub errors: usize,
    pub warnings: usize,
    pub status: SummaryStatus,
}

impl HealthSummary {
    /// Rolls the individual check outcomes up into a summary.
    /// Any error makes the domain `Critical`; otherwise any warning makes
    /// it `Warnings`; otherwise it is `Healthy`.
    pub fn from_results(results: &[HealthCheckResult]) -> Self {
        let errors = results
            .iter()
            .filter(|r| r.status == CheckStatus::Error)
            .count();
        let warnings = results
            .iter()
            .filter(|r| r.status == CheckStatus::Warning)
            .count();
        let status = if errors > 0 {
            SummaryStatus::Critical
        } else if warnings > 0 {
            SummaryStatus::Warnings
        } else {
            SummaryStatus::Healthy
        };
        Self {
            errors,
            warnings,
            status,
        }
    }
}

/// Aggregated health report for a single domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub domain: String,
    pub results: Vec<HealthCheckResult>,
    pub summary: HealthSummary,
    pub checked_at: DateTime<Utc>,
}
