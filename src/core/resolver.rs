// src/core/resolver.rs

use std::net::{Ipv4Addr, Ipv6Addr};

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use thiserror::Error;
use tracing::debug;

/// The record types the diagnostic engines query for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    A,
    Aaaa,
    Mx,
    Txt,
    Ns,
    Cname,
    Soa,
}

impl RecordKind {
    fn record_type(self) -> RecordType {
        match self {
            RecordKind::A => RecordType::A,
            RecordKind::Aaaa => RecordType::AAAA,
            RecordKind::Mx => RecordType::MX,
            RecordKind::Txt => RecordType::TXT,
            RecordKind::Ns => RecordType::NS,
            RecordKind::Cname => RecordType::CNAME,
            RecordKind::Soa => RecordType::SOA,
        }
    }
}

/// A single resolved record, typed per record kind. TTL metadata is carried
/// where the engines consume it (address records).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A { addr: Ipv4Addr, ttl: u32 },
    Aaaa { addr: Ipv6Addr, ttl: u32 },
    Mx { preference: u16, exchange: String },
    Txt(String),
    Ns(String),
    Cname(String),
    Soa { mname: String, rname: String, serial: u32 },
}

/// Classified resolution failure.
///
/// Every caller depends on `NotFound` staying distinct from `Transient`:
/// "the record does not exist" is a conclusive, often good answer (not
/// being on a blacklist), while a transient failure is inconclusive and
/// must be surfaced as such. The two are never collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// NXDOMAIN or a no-data answer for the requested type.
    #[error("no such record")]
    NotFound,
    /// No response within the resolver's deadline.
    #[error("lookup timed out")]
    Timeout,
    /// Server failure, network error, or any other resolver error.
    #[error("{0}")]
    Transient(String),
}

/// Uniform asynchronous resolution interface.
///
/// The trait is the seam between the diagnostic engines and the platform
/// resolver; tests substitute a canned implementation. Implementations must
/// preserve the order of records as supplied by the resolver and perform no
/// retries of their own.
#[async_trait]
pub trait DnsResolve: Send + Sync {
    async fn resolve(&self, name: &str, kind: RecordKind)
    -> Result<Vec<RecordData>, LookupError>;
}

/// Production resolver backed by hickory's Tokio resolver with the
/// system/default configuration.
pub struct SystemResolver {
    inner: TokioAsyncResolver,
}

impl SystemResolver {
    pub fn new() -> Self {
        Self {
            inner: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
        }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolve for SystemResolver {
    async fn resolve(
        &self,
        name: &str,
        kind: RecordKind,
    ) -> Result<Vec<RecordData>, LookupError> {
        debug!(name, ?kind, "DNS lookup");
        let lookup = self
            .inner
            .lookup(name, kind.record_type())
            .await
            .map_err(classify)?;

        let mut records = Vec::new();
        for record in lookup.record_iter() {
            let ttl = record.ttl();
            let Some(data) = record.data() else {
                continue;
            };
            match data {
                RData::A(a) => records.push(RecordData::A { addr: a.0, ttl }),
                RData::AAAA(aaaa) => records.push(RecordData::Aaaa { addr: aaaa.0, ttl }),
                RData::MX(mx) => records.push(RecordData::Mx {
                    preference: mx.preference(),
                    exchange: mx.exchange().to_utf8(),
                }),
                RData::TXT(txt) => records.push(RecordData::Txt(txt.to_string())),
                RData::NS(ns) => records.push(RecordData::Ns(ns.0.to_utf8())),
                RData::CNAME(cname) => records.push(RecordData::Cname(cname.0.to_utf8())),
                RData::SOA(soa) => records.push(RecordData::Soa {
                    mname: soa.mname().to_utf8(),
                    rname: soa.rname().to_utf8(),
                    serial: soa.serial(),
                }),
                // Answers of other types (CNAME chain intermediates etc.)
                // are not part of the requested record set.
                _ => {}
            }
        }

        // A successful response that carries no records of the requested
        // type is a no-data answer.
        if records.is_empty() {
            return Err(LookupError::NotFound);
        }
        Ok(records)
    }
}

/// Maps hickory's open-ended error surface onto the closed classification
/// the engines branch on.
fn classify(err: ResolveError) -> LookupError {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => LookupError::NotFound,
        ResolveErrorKind::Timeout => LookupError::Timeout,
        _ => LookupError::Transient(err.to_string()),
    }
}
