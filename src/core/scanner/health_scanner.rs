// src/core/scanner/health_scanner.rs

//! DNS-level health assessment across five independent check categories.
//!
//! The categories run as parallel branches; a failing lookup in one never
//! blocks the others, it becomes that check's outcome. The report lists
//! checks in a fixed order (A, MX, MX Redundancy, SPF, SPF Policy, DMARC,
//! DMARC Policy, SOA) so presentation stays deterministic no matter which
//! lookup finishes first.

use chrono::Utc;
use tracing::{debug, info};

use crate::core::models::{
    CheckCategory, CheckStatus, HealthCheckResult, HealthReport, HealthSummary,
};
use crate::core::resolver::{DnsResolve, LookupError, RecordData, RecordKind};
use crate::core::scanner::{ScanError, validate_domain};

/// Runs all health checks for `domain` and rolls them up into a summary.
pub async fn run_health_scan(
    resolver: &dyn DnsResolve,
    domain: &str,
) -> Result<HealthReport, ScanError> {
    let domain = validate_domain(domain)?;
    info!(domain, "Starting health scan.");

    let (a, mx, spf, dmarc, soa) = tokio::join!(
        check_a(resolver, domain),
        check_mx(resolver, domain),
        check_spf(resolver, domain),
        check_dmarc(resolver, domain),
        check_soa(resolver, domain),
    );

    let mut results = Vec::with_capacity(8);
    results.extend(a);
    results.extend(mx);
    results.extend(spf);
    results.extend(dmarc);
    results.extend(soa);

    let summary = HealthSummary::from_results(&results);
    info!(
        domain,
        status = %summary.status,
        errors = summary.errors,
        warnings = summary.warnings,
        "Health scan finished."
    );
    Ok(HealthReport {
        domain: domain.to_string(),
        results,
        summary,
        checked_at: Utc::now(),
    })
}

async fn check_a(resolver: &dyn DnsResolve, domain: &str) -> Vec<HealthCheckResult> {
    let result = match resolver.resolve(domain, RecordKind::A).await {
        Ok(records) => {
            let count = records
                .iter()
                .filter(|r| matches!(r, RecordData::A { .. }))
                .count();
            HealthCheckResult::new(
                CheckStatus::Ok,
                CheckCategory::Dns,
                "A Record",
                format!("Domain resolves to {count} IPv4 address(es)"),
            )
        }
        Err(LookupError::NotFound) => HealthCheckResult::new(
            CheckStatus::Error,
            CheckCategory::Dns,
            "A Record",
            "No A record found; the domain does not resolve",
        ),
        Err(err) => HealthCheckResult::new(
            CheckStatus::Error,
            CheckCategory::Dns,
            "A Record",
            format!("A record lookup failed: {err}"),
        ),
    };
    vec![result]
}

/// MX presence plus a redundancy check. The redundancy entry is only
/// emitted when at least one MX record exists.
async fn check_mx(resolver: &dyn DnsResolve, domain: &str) -> Vec<HealthCheckResult> {
    match resolver.resolve(domain, RecordKind::Mx).await {
        Ok(records) => {
            let count = records
                .iter()
                .filter(|r| matches!(r, RecordData::Mx { .. }))
                .count();
            debug!(domain, count, "MX records found.");
            let base = HealthCheckResult::new(
                CheckStatus::Ok,
                CheckCategory::Email,
                "MX Records",
                format!("Found {count} MX record(s)"),
            );
            let redundancy = if count >= 2 {
                HealthCheckResult::new(
                    CheckStatus::Ok,
                    CheckCategory::Email,
                    "MX Redundancy",
                    format!("{count} mail servers configured"),
                )
            } else {
                HealthCheckResult::new(
                    CheckStatus::Warning,
                    CheckCategory::Email,
                    "MX Redundancy",
                    "Only one MX record; at least two are recommended for failover",
                )
            };
            vec![base, redundancy]
        }
        Err(LookupError::NotFound) => vec![HealthCheckResult::new(
            CheckStatus::Error,
            CheckCategory::Email,
            "MX Records",
            "No MX records found; the domain cannot receive mail",
        )],
        Err(err) => vec![HealthCheckResult::new(
            CheckStatus::Error,
            CheckCategory::Email,
            "MX Records",
            format!("MX lookup failed: {err}"),
        )],
    }
}

/// SPF presence plus a policy-strength check on the found record.
async fn check_spf(resolver: &dyn DnsResolve, domain: &str) -> Vec<HealthCheckResult> {
    let missing = |message: String| {
        vec![HealthCheckResult::new(
            CheckStatus::Error,
            CheckCategory::Email,
            "SPF Record",
            message,
        )]
    };

    let records = match resolver.resolve(domain, RecordKind::Txt).await {
        Ok(records) => records,
        Err(LookupError::NotFound) => {
            return missing("No SPF record found; any host may send mail as this domain".into());
        }
        Err(err) => return missing(format!("SPF lookup failed: {err}")),
    };

    let Some(spf) = records.iter().find_map(|record| match record {
        RecordData::Txt(text) if text.starts_with("v=spf1") => Some(text.clone()),
        _ => None,
    }) else {
        return missing("No SPF record found; any host may send mail as this domain".into());
    };
    debug!(domain, record = %spf, "SPF record found.");

    let base = HealthCheckResult::new(
        CheckStatus::Ok,
        CheckCategory::Email,
        "SPF Record",
        format!("SPF record found: {spf}"),
    );
    // Hard fail (-all) and soft fail (~all) both reject or flag unlisted
    // senders; anything else leaves the policy open.
    let policy = if spf.contains("-all") {
        HealthCheckResult::new(
            CheckStatus::Ok,
            CheckCategory::Email,
            "SPF Policy",
            "Hard-fail policy (-all)",
        )
    } else if spf.contains("~all") {
        HealthCheckResult::new(
            CheckStatus::Ok,
            CheckCategory::Email,
            "SPF Policy",
            "Soft-fail policy (~all)",
        )
    } else {
        HealthCheckResult::new(
            CheckStatus::Warning,
            CheckCategory::Email,
            "SPF Policy",
            "Permissive or neutral policy; unauthorized senders are not rejected",
        )
    };
    vec![base, policy]
}

/// DMARC presence at `_dmarc.<domain>` plus a policy check on the `p=` tag.
async fn check_dmarc(resolver: &dyn DnsResolve, domain: &str) -> Vec<HealthCheckResult> {
    let dmarc_name = format!("_dmarc.{domain}");
    let missing = |message: String| {
        vec![HealthCheckResult::new(
            CheckStatus::Error,
            CheckCategory::Email,
            "DMARC Record",
            message,
        )]
    };

    let records = match resolver.resolve(&dmarc_name, RecordKind::Txt).await {
        Ok(records) => records,
        Err(LookupError::NotFound) => {
            return missing("No DMARC record found; spoofed mail is not policed".into());
        }
        Err(err) => return missing(format!("DMARC lookup failed: {err}")),
    };

    let Some(dmarc) = records.iter().find_map(|record| match record {
        RecordData::Txt(text) if text.starts_with("v=DMARC1") => Some(text.clone()),
        _ => None,
    }) else {
        return missing("No DMARC record found; spoofed mail is not policed".into());
    };
    debug!(domain, record = %dmarc, "DMARC record found.");

    let policy_tag = dmarc
        .split(';')
        .find(|s| s.trim().starts_with("p="))
        .and_then(|s| s.trim().split('=').nth(1))
        .map(|s| s.trim().to_string());

    let base = HealthCheckResult::new(
        CheckStatus::Ok,
        CheckCategory::Email,
        "DMARC Record",
        format!("DMARC record found: {dmarc}"),
    );
    let policy = match policy_tag.as_deref() {
        Some(p @ ("reject" | "quarantine")) => HealthCheckResult::new(
            CheckStatus::Ok,
            CheckCategory::Email,
            "DMARC Policy",
            format!("Enforcing policy (p={p})"),
        ),
        _ => HealthCheckResult::new(
            CheckStatus::Warning,
            CheckCategory::Email,
            "DMARC Policy",
            "Monitoring-only policy (p=none); failures are reported but not acted on",
        ),
    };
    vec![base, policy]
}

/// SOA presence. A missing SOA at the queried name may still resolve at a
/// parent zone, so absence is a warning rather than an error.
async fn check_soa(resolver: &dyn DnsResolve, domain: &str) -> Vec<HealthCheckResult> {
    let result = match resolver.resolve(domain, RecordKind::Soa).await {
        Ok(records) => match records.iter().find_map(|record| match record {
            RecordData::Soa { mname, .. } => Some(mname.clone()),
            _ => None,
        }) {
            Some(mname) => HealthCheckResult::new(
                CheckStatus::Ok,
                CheckCategory::Dns,
                "SOA Record",
                format!("Primary nameserver: {mname}"),
            ),
            None => HealthCheckResult::new(
                CheckStatus::Warning,
                CheckCategory::Dns,
                "SOA Record",
                "No SOA record found at this name",
            ),
        },
        Err(LookupError::NotFound) => HealthCheckResult::new(
            CheckStatus::Warning,
            CheckCategory::Dns,
            "SOA Record",
            "No SOA record found at this name",
        ),
        Err(err) => HealthCheckResult::new(
            CheckStatus::Warning,
            CheckCategory::Dns,
            "SOA Record",
            format!("SOA lookup failed: {err}"),
        ),
    };
    vec![result]
}
