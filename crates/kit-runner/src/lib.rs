//! `kitd` host daemon
//!
//! Runs a Kit Protocol interpreter over simulated device buses so host
//! tools can be exercised without hardware. Messages arrive over TCP or
//! stdin/stdout; buses and devices come from a YAML file (see [`config`]).

pub mod board;
pub mod config;
pub mod server;
pub mod telemetry;

pub use board::KitBoard;
pub use config::{BoardConfig, BusesConfig, ConfigError, KitConfig};
pub use server::{dispatch, serve, serve_stdio, serve_tcp, SharedInterpreter};
