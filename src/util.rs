use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::level_filters::LevelFilter;

const METRICS_PORT: &str = "PACKETLOSS_METRICS_PORT";

const DEFAULT_PORT: u16 = 8080;

pub fn get_port() -> Option<u16> {
    std::env::var(METRICS_PORT).ok()?.parse().ok()
}

const METRICS_ADDR: &str = "PACKETLOSS_METRICS_ADDR";

const DEFAULT_ADDR: Ipv4Addr = Ipv4Addr::new(0, 0, 0, 0);

pub fn get_default_bind() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(DEFAULT_ADDR), DEFAULT_PORT)
}

pub fn get_addr() -> Option<IpAddr> {
    std::env::var(METRICS_ADDR).ok()?.parse().ok()
}

/// Apply the environment overrides on top of a configured bind address
pub fn metrics_bind(configured: SocketAddr) -> SocketAddr {
    let ip = get_addr().unwrap_or(configured.ip());
    let port = get_port().unwrap_or(configured.port());
    SocketAddr::new(ip, port)
}

const LOG_LEVEL: &str = "PACKETLOSS_LOG";

pub fn get_log_level() -> LevelFilter {
    std::env::var(LOG_LEVEL)
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::INFO)
}
