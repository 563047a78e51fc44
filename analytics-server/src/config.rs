//! Server configuration from command-line flags and environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

use crate::validation::{MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};

/// Default port for the analytics server.
pub const DEFAULT_PORT: u16 = 9474;

/// Command-line arguments for analytics-server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "analytics-server")]
#[command(about = "Student Analytics HTTP service: grade analyses and PNG charts")]
#[command(version)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "ANALYTICS_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "ANALYTICS_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Chart width used when a request gives none
    #[arg(
        long,
        env = "ANALYTICS_DEFAULT_WIDTH",
        default_value_t = analytics_charts::DEFAULT_WIDTH,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_WIDTH)..=i64::from(MAX_WIDTH))
    )]
    pub default_width: u32,

    /// Chart height used when a request gives none
    #[arg(
        long,
        env = "ANALYTICS_DEFAULT_HEIGHT",
        default_value_t = analytics_charts::DEFAULT_HEIGHT,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_HEIGHT)..=i64::from(MAX_HEIGHT))
    )]
    pub default_height: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            default_width: analytics_charts::DEFAULT_WIDTH,
            default_height: analytics_charts::DEFAULT_HEIGHT,
        }
    }
}

impl ServerConfig {
    /// Address the server binds to.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Chart size used when a request omits dimensions.
    #[must_use]
    pub fn default_size(&self) -> (u32, u32) {
        (self.default_width, self.default_height)
    }
}
