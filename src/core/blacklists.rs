// src/core/blacklists.rs

//! Static registry of the DNS blacklists consulted by the RBL engine.
//!
//! Two probe styles exist. IP-indexed zones are queried with the reversed
//! octets of the target's A record prepended to the zone, so checking
//! `1.2.3.4` against `zen.spamhaus.org` queries `4.3.2.1.zen.spamhaus.org`.
//! Domain-indexed zones are queried with the domain itself prepended.
//! An A record in the answer means "listed"; NXDOMAIN means "clean".

use std::net::Ipv4Addr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistKind {
    Ip,
    Domain,
}

/// One configured blacklist zone. The registry is read-only configuration
/// loaded at process start; nothing mutates it afterwards.
#[derive(Debug, Clone, Copy)]
pub struct BlacklistDefinition {
    pub name: &'static str,
    pub zone: &'static str,
    pub kind: BlacklistKind,
}

impl BlacklistDefinition {
    /// Builds the query name this zone expects for the given target.
    pub fn query_name(&self, domain: &str, ip: Ipv4Addr) -> String {
        match self.kind {
            BlacklistKind::Ip => format!("{}.{}", reverse_ipv4(ip), self.zone),
            BlacklistKind::Domain => format!("{}.{}", domain, self.zone),
        }
    }
}

/// Reverses an IPv4 address for blacklist lookup: `1.2.3.4` -> `4.3.2.1`.
pub fn reverse_ipv4(ip: Ipv4Addr) -> String {
    let o = ip.octets();
    format!("{}.{}.{}.{}", o[3], o[2], o[1], o[0])
}

macro_rules! ip_bl {
    ($name:expr, $zone:expr) => {
        BlacklistDefinition {
            name: $name,
            zone: $zone,
            kind: BlacklistKind::Ip,
        }
    };
}

macro_rules! domain_bl {
    ($name:expr, $zone:expr) => {
        BlacklistDefinition {
            name: $name,
            zone: $zone,
            kind: BlacklistKind::Domain,
        }
    };
}

/// Declaration order here is the order results appear in every report.
pub static REGISTRY: &[BlacklistDefinition] = &[
    ip_bl!("Spamhaus ZEN", "zen.spamhaus.org"),
    ip_bl!("SpamCop", "bl.spamcop.net"),
    ip_bl!("Barracuda", "b.barracudacentral.org"),
    ip_bl!("SORBS", "dnsbl.sorbs.net"),
    ip_bl!("SORBS Spam", "spam.dnsbl.sorbs.net"),
    ip_bl!("PSBL", "psbl.surriel.com"),
    ip_bl!("UCEPROTECT Level 1", "dnsbl-1.uceprotect.net"),
    ip_bl!("UCEPROTECT Level 2", "dnsbl-2.uceprotect.net"),
    ip_bl!("UCEPROTECT Level 3", "dnsbl-3.uceprotect.net"),
    ip_bl!("CBL", "cbl.abuseat.org"),
    ip_bl!("Backscatterer", "ips.backscatterer.org"),
    ip_bl!("s5h.net", "all.s5h.net"),
    ip_bl!("Blocklist.de", "bl.blocklist.de"),
    ip_bl!("GBUdb Truncate", "truncate.gbudb.net"),
    ip_bl!("DroneBL", "dnsbl.dronebl.org"),
    ip_bl!("WPBL", "db.wpbl.info"),
    ip_bl!("Manitu", "ix.dnsbl.manitu.net"),
    ip_bl!("MSRBL Combined", "combined.rbl.msrbl.net"),
    ip_bl!("ImproWare Spam", "spamrbl.imp.ch"),
    ip_bl!("ImproWare Worm", "wormrbl.imp.ch"),
    ip_bl!("SpamRats Dyna", "dyna.spamrats.com"),
    ip_bl!("SpamRats NoPtr", "noptr.spamrats.com"),
    ip_bl!("SpamRats Spam", "spam.spamrats.com"),
    ip_bl!("Korea Services", "korea.services.net"),
    ip_bl!("Interserver", "rbl.interserver.net"),
    ip_bl!("Mailspike", "bl.mailspike.net"),
    ip_bl!("0Spam", "bl.0spam.org"),
    ip_bl!("Nordspam", "bl.nordspam.com"),
    ip_bl!("JIPPG", "mail-abuse.blacklist.jippg.org"),
    domain_bl!("Spamhaus DBL", "dbl.spamhaus.org"),
    domain_bl!("SURBL", "multi.surbl.org"),
    domain_bl!("URIBL Black", "black.uribl.com"),
];
