use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use tracing::warn;
use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::system_conf::read_system_conf;

/// OpenDNS has no built-in `NameServerConfigGroup` constructor.
const OPENDNS_IPS: [IpAddr; 2] = [
    IpAddr::V4(Ipv4Addr::new(208, 67, 222, 222)),
    IpAddr::V4(Ipv4Addr::new(208, 67, 220, 220)),
];

pub(crate) struct ResolverSetup {
    pub label: &'static str,
    pub resolver: TokioAsyncResolver,
}

/// Builds the fallback chain in fixed priority order: the system resolver
/// first, then Google, Cloudflare, OpenDNS and Quad9. A missing or broken
/// system configuration is logged and skipped rather than failing setup.
pub(crate) fn default_chain(attempt_timeout: Duration) -> Vec<ResolverSetup> {
    let mut chain = Vec::new();

    match read_system_conf() {
        Ok((config, mut opts)) => {
            opts.timeout = attempt_timeout;
            chain.push(ResolverSetup {
                label: "system",
                resolver: TokioAsyncResolver::tokio(config, opts),
            });
        }
        Err(err) => warn!(%err, "system DNS config unavailable, using public resolvers only"),
    }

    let public: [(&'static str, NameServerConfigGroup); 4] = [
        ("google", NameServerConfigGroup::google()),
        ("cloudflare", NameServerConfigGroup::cloudflare()),
        (
            "opendns",
            NameServerConfigGroup::from_ips_clear(&OPENDNS_IPS, 53, true),
        ),
        ("quad9", NameServerConfigGroup::quad9()),
    ];

    for (label, servers) in public {
        let config = ResolverConfig::from_parts(None, Vec::new(), servers);
        let mut opts = ResolverOpts::default();
        opts.timeout = attempt_timeout;
        opts.attempts = 2;
        chain.push(ResolverSetup {
            label,
            resolver: TokioAsyncResolver::tokio(config, opts),
        });
    }

    chain
}
