//! `kitd` configuration file.
//!
//! ```yaml
//! protocol:
//!   max_message_size: 1024
//! diagnostics: true
//! board:
//!   name: KIT-SIM
//!   version: "010203"
//!   firmware: kitd
//! buses:
//!   swi: []
//!   i2c:
//!     - address: 0xC0
//!       device_type: ecc608b
//!       header: ext1
//! ```
//!
//! A bus missing from `buses` has no driver. A bus listed with no devices
//! is registered but empty.

use std::path::{Path, PathBuf};

use kit_common::{hex_decode, FromHexError, LogSink, NullSink};
use kit_hal::{Hal, PhysicalInterface, SimDevice, SimulatedBus};
use kit_protocol::{Interpreter, InterpreterError, ProtocolConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::KitBoard;

/// Errors loading or applying a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("board version is not hex: {0}")]
    InvalidVersion(#[from] FromHexError),

    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
}

/// Identity reported by the board commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Reported before the version frame.
    pub name: String,
    /// Version bytes, as hex.
    pub version: String,
    pub firmware: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            name: "KIT-SIM".to_string(),
            version: "010000".to_string(),
            firmware: format!("kitd {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Simulated devices per bus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusesConfig {
    pub swi: Option<Vec<SimDevice>>,
    pub i2c: Option<Vec<SimDevice>>,
    pub spi: Option<Vec<SimDevice>>,
    pub swi2: Option<Vec<SimDevice>>,
}

impl BusesConfig {
    fn get(&self, kind: PhysicalInterface) -> Option<&Vec<SimDevice>> {
        match kind {
            PhysicalInterface::Swi => self.swi.as_ref(),
            PhysicalInterface::I2c => self.i2c.as_ref(),
            PhysicalInterface::Spi => self.spi.as_ref(),
            PhysicalInterface::Swi2 => self.swi2.as_ref(),
        }
    }
}

/// Top-level `kitd` configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    pub protocol: ProtocolConfig,
    /// Forward discovery and selection lines to the log.
    pub diagnostics: bool,
    pub board: BoardConfig,
    pub buses: BusesConfig,
}

impl KitConfig {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        KitConfig::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Decoded board version bytes.
    pub fn board_version(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(hex_decode(self.board.version.as_bytes())?)
    }

    /// Build a dispatcher with one simulated driver per configured bus.
    pub fn build_hal(&self) -> Hal {
        let mut hal = Hal::new();
        for kind in PhysicalInterface::DISCOVERY_ORDER {
            if let Some(devices) = self.buses.get(kind) {
                hal.register(kind, Box::new(SimulatedBus::new(kind, devices.clone())));
            }
        }
        hal
    }

    /// Build an interpreter running the demo board handler.
    pub fn build_interpreter(&self) -> Result<Interpreter, ConfigError> {
        let board = KitBoard::new(&self.board.name, self.board_version()?, &self.board.firmware);
        let builder = Interpreter::builder()
            .handler(board)
            .hal(self.build_hal())
            .config(self.protocol.clone());
        let builder = if self.diagnostics {
            builder.diagnostics(LogSink)
        } else {
            builder.diagnostics(NullSink)
        };
        Ok(builder.build()?)
    }
}
