// src/core/scanner/rbl_scanner.rs

//! Blacklist membership probing.
//!
//! The domain's A record is resolved once; its failure is the only fatal
//! outcome. Every configured zone is then probed concurrently with its own
//! deadline, and each probe lands in a slot keyed by registry index so the
//! report order never depends on completion order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::core::blacklists::{BlacklistDefinition, REGISTRY};
use crate::core::models::{BlacklistReport, ProbeResult, ProbeStatus};
use crate::core::resolver::{DnsResolve, LookupError, RecordData, RecordKind};
use crate::core::scanner::{ScanError, validate_domain};

/// Upper bound on a single blacklist probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on the whole fan-out. Probes enforce their own deadlines,
/// so this only matters if the join itself stalls; slots still empty when
/// it fires are reported as timeouts to keep the counts complete.
pub const RUN_DEADLINE: Duration = Duration::from_secs(30);

/// Checks `domain` against every zone in the static registry.
///
/// Returns a report covering all zones regardless of how many individual
/// probes timed out or errored. Fails only when the base A record cannot
/// be resolved.
pub async fn run_blacklist_scan(
    resolver: Arc<dyn DnsResolve>,
    domain: &str,
) -> Result<BlacklistReport, ScanError> {
    let domain = validate_domain(domain)?;
    info!(domain, zones = REGISTRY.len(), "Starting blacklist scan.");

    let ip = resolve_base_ip(resolver.as_ref(), domain).await?;
    debug!(domain, ip = %ip, "Base A record resolved.");

    let mut probes = JoinSet::new();
    for (index, definition) in REGISTRY.iter().enumerate() {
        let resolver = Arc::clone(&resolver);
        let query = definition.query_name(domain, ip);
        probes.spawn(async move {
            let result = probe_blacklist(resolver.as_ref(), definition, &query).await;
            (index, result)
        });
    }

    let mut slots: Vec<Option<ProbeResult>> = vec![None; REGISTRY.len()];
    let joined = timeout(RUN_DEADLINE, async {
        while let Some(next) = probes.join_next().await {
            if let Ok((index, result)) = next {
                slots[index] = Some(result);
            }
        }
    })
    .await;
    if joined.is_err() {
        warn!(domain, "Blacklist scan hit the overall deadline.");
    }

    // Slots are filled by registry index, so collecting them in order
    // restores declaration order independent of completion order.
    let results: Vec<ProbeResult> = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| ProbeResult {
                blacklist: REGISTRY[index].name.to_string(),
                status: ProbeStatus::Timeout,
                reason: "Scan deadline exceeded".to_string(),
                response_time: RUN_DEADLINE.as_millis() as u64,
                ttl: None,
            })
        })
        .collect();

    let report = BlacklistReport::new(domain.to_string(), ip.to_string(), results);
    info!(
        domain,
        listed = report.listed_count,
        timeouts = report.timeout_count,
        "Blacklist scan finished."
    );
    Ok(report)
}

/// Resolves the shared probe target. A failure here aborts the run; there
/// is no per-zone fallback without an address to check.
async fn resolve_base_ip(
    resolver: &dyn DnsResolve,
    domain: &str,
) -> Result<std::net::Ipv4Addr, ScanError> {
    let records = resolver
        .resolve(domain, RecordKind::A)
        .await
        .map_err(|source| ScanError::BaseResolution {
            domain: domain.to_string(),
            source,
        })?;
    records
        .iter()
        .find_map(|record| match record {
            RecordData::A { addr, .. } => Some(*addr),
            _ => None,
        })
        .ok_or_else(|| ScanError::BaseResolution {
            domain: domain.to_string(),
            source: LookupError::NotFound,
        })
}

/// Probes one zone and classifies the outcome. Never fails: inconclusive
/// probes become `TIMEOUT`/`ERROR` rows in the report.
async fn probe_blacklist(
    resolver: &dyn DnsResolve,
    definition: &BlacklistDefinition,
    query: &str,
) -> ProbeResult {
    debug!(blacklist = definition.name, query, "Probing blacklist zone.");
    let started = Instant::now();
    let outcome = timeout(PROBE_TIMEOUT, resolver.resolve(query, RecordKind::A)).await;
    let response_time = started.elapsed().as_millis() as u64;

    let (status, reason, ttl) = match outcome {
        Ok(Ok(records)) => {
            // Different zones encode different meanings in the returned
            // 127.0.0.x address; decoding that is out of scope, so any
            // answer is reported with the generic reason.
            let ttl = records.iter().find_map(|record| match record {
                RecordData::A { ttl, .. } => Some(*ttl),
                _ => None,
            });
            (ProbeStatus::Listed, "Listed".to_string(), ttl)
        }
        Ok(Err(LookupError::NotFound)) => (ProbeStatus::Ok, "Not listed".to_string(), None),
        Ok(Err(LookupError::Timeout)) | Err(_) => {
            warn!(blacklist = definition.name, "Blacklist probe timed out.");
            (
                ProbeStatus::Timeout,
                format!("No response within {}s", PROBE_TIMEOUT.as_secs()),
                None,
            )
        }
        Ok(Err(LookupError::Transient(message))) => {
            warn!(
                blacklist = definition.name,
                error = %message,
                "Blacklist probe failed."
            );
            (ProbeStatus::Error, message, None)
        }
    };

    ProbeResult {
        blacklist: definition.name.to_string(),
        status,
        reason,
        response_time,
        ttl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::mock::{MockResolver, a_record};
    use std::net::Ipv4Addr;

    const DOMAIN: &str = "example.com";
    const IP: Ipv4Addr = Ipv4Addr::new(1, 2, 3, 4);

    fn with_base_a() -> MockResolver {
        MockResolver::new().answer(DOMAIN, RecordKind::A, vec![a_record([1, 2, 3, 4], 300)])
    }

    fn query_for(index: usize) -> String {
        REGISTRY[index].query_name(DOMAIN, IP)
    }

    #[tokio::test]
    async fn covers_every_zone_despite_mixed_outcomes() {
        let resolver = with_base_a()
            .answer(&query_for(0), RecordKind::A, vec![a_record([127, 0, 0, 2], 60)])
            .fail(
                &query_for(1),
                RecordKind::A,
                LookupError::Transient("SERVFAIL".to_string()),
            );
        let report = run_blacklist_scan(Arc::new(resolver), DOMAIN).await.unwrap();

        assert_eq!(report.total_checked, REGISTRY.len());
        assert_eq!(report.results.len(), REGISTRY.len());
        assert_eq!(report.listed_count, 1);
        assert_eq!(report.timeout_count, 0);
        assert_eq!(report.ip, "1.2.3.4");

        assert_eq!(report.results[0].status, ProbeStatus::Listed);
        assert_eq!(report.results[0].reason, "Listed");
        assert_eq!(report.results[0].ttl, Some(60));
        assert_eq!(report.results[1].status, ProbeStatus::Error);
        assert_eq!(report.results[1].reason, "SERVFAIL");
        assert!(
            report.results[2..]
                .iter()
                .all(|r| r.status == ProbeStatus::Ok)
        );
    }

    #[tokio::test]
    async fn base_resolution_failure_is_fatal() {
        let resolver = MockResolver::new().fail(
            DOMAIN,
            RecordKind::A,
            LookupError::Transient("connection refused".to_string()),
        );
        let err = run_blacklist_scan(Arc::new(resolver), DOMAIN)
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::BaseResolution { .. }));
    }

    #[tokio::test]
    async fn unresolvable_domain_yields_no_partial_results() {
        let resolver = MockResolver::new();
        let outcome =
            run_blacklist_scan(Arc::new(resolver), "nonexistent-test-domain-xyz123.invalid").await;
        assert!(matches!(
            outcome,
            Err(ScanError::BaseResolution {
                source: LookupError::NotFound,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn empty_domain_is_rejected_before_probing() {
        let resolver = MockResolver::new();
        let err = run_blacklist_scan(Arc::new(resolver), "  ").await.unwrap_err();
        assert!(matches!(err, ScanError::EmptyDomain));
    }

    #[tokio::test(start_paused = true)]
    async fn one_stalled_zone_times_out_without_affecting_siblings() {
        let stalled = query_for(5);
        let resolver = with_base_a().delay(&stalled, Duration::from_secs(3600));
        let report = run_blacklist_scan(Arc::new(resolver), DOMAIN).await.unwrap();

        assert_eq!(report.total_checked, REGISTRY.len());
        assert_eq!(report.timeout_count, 1);
        assert_eq!(report.results[5].status, ProbeStatus::Timeout);
        for (index, result) in report.results.iter().enumerate() {
            if index != 5 {
                assert_eq!(result.status, ProbeStatus::Ok, "zone {index}");
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn result_order_matches_registry_regardless_of_completion_order() {
        // Later registry entries answer first, so completion order is the
        // reverse of declaration order.
        let mut resolver = with_base_a();
        for (index, _) in REGISTRY.iter().enumerate() {
            resolver = resolver.delay(
                &query_for(index),
                Duration::from_millis((REGISTRY.len() - index) as u64 * 10),
            );
        }
        let first = run_blacklist_scan(Arc::new(resolver), DOMAIN).await.unwrap();

        let mut resolver = with_base_a();
        for (index, _) in REGISTRY.iter().enumerate() {
            resolver = resolver.delay(&query_for(index), Duration::from_millis(index as u64 * 7));
        }
        let second = run_blacklist_scan(Arc::new(resolver), DOMAIN).await.unwrap();

        let expected: Vec<&str> = REGISTRY.iter().map(|d| d.name).collect();
        let first_names: Vec<&str> = first.results.iter().map(|r| r.blacklist.as_str()).collect();
        let second_names: Vec<&str> =
            second.results.iter().map(|r| r.blacklist.as_str()).collect();
        assert_eq!(first_names, expected);
        assert_eq!(second_names, expected);
    }
}
