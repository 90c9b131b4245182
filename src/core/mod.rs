// src/core/mod.rs

/// Report data structures shared by the engines and the endpoint layer:
/// probe and check results, summaries, and the aggregate reports.
pub mod models;

/// Uniform asynchronous DNS resolution with classified failures. This is
/// the leaf dependency every engine probes through.
pub mod resolver;

/// The static registry of blacklist zones and their query-name rules.
pub mod blacklists;

/// The diagnostic engines and the aggregation layer driving them.
pub mod scanner;
