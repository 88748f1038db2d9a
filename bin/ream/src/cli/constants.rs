use std::net::{IpAddr, Ipv4Addr};

pub const DEFAULT_BEACON_API_ENDPOINT: &str = "http://localhost:5052";
pub const DEFAULT_METRICS_ENABLED: bool = false;
pub const DEFAULT_METRICS_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
pub const DEFAULT_METRICS_PORT: u16 = 8080;
pub const DEFAULT_NETWORK: &str = "mainnet";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "60";
