// src/lib.rs

//! domainpulse aggregates failure-prone network probes for a single domain
//! into coherent diagnostic reports: blacklist membership across ~30
//! DNS-based zones and a multi-category DNS health assessment.

pub mod api;
pub mod core;
pub mod logging;

pub use api::{ApiResponse, blacklist_endpoint, health_endpoint};
pub use self::core::models::{BlacklistReport, HealthReport};
pub use self::core::resolver::{DnsResolve, SystemResolver};
pub use self::core::scanner::{ScanError, run_blacklist_scan, run_health_scan};
