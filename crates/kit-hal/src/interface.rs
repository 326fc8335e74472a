//! Interface kinds, extension headers and discovered-device entries.

use kit_device::DeviceType;
use serde::{Deserialize, Serialize};

// ============================================================================
// Interface Identifiers
// ============================================================================

/// Every interface identifier a kit knows about, including the non-physical
/// sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterfaceId {
    /// No interface.
    #[default]
    Unknown,
    Spi,
    I2c,
    Swi,
    /// Single-wire variant driven by GPIO bit-banging.
    Swi2,
    /// Host link; never a device bus.
    Uart,
}

impl std::fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterfaceId::Unknown => write!(f, "none"),
            InterfaceId::Spi => write!(f, "SPI"),
            InterfaceId::I2c => write!(f, "I2C"),
            InterfaceId::Swi => write!(f, "SWI"),
            InterfaceId::Swi2 => write!(f, "SWI2"),
            InterfaceId::Uart => write!(f, "UART"),
        }
    }
}

/// A device bus that can be bound as the active transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalInterface {
    Swi,
    I2c,
    Spi,
    Swi2,
}

impl PhysicalInterface {
    /// Order in which discovery scans the buses.
    pub const DISCOVERY_ORDER: [PhysicalInterface; 4] = [
        PhysicalInterface::Swi,
        PhysicalInterface::I2c,
        PhysicalInterface::Spi,
        PhysicalInterface::Swi2,
    ];

    /// Check whether two interfaces address the same bus family.
    ///
    /// The two single-wire variants are interchangeable.
    pub fn same_family(self, other: PhysicalInterface) -> bool {
        self == other || (self.is_single_wire() && other.is_single_wire())
    }

    /// Check for either single-wire variant.
    pub fn is_single_wire(self) -> bool {
        matches!(self, PhysicalInterface::Swi | PhysicalInterface::Swi2)
    }

    /// Prefix used in selection diagnostics.
    pub fn selection_label(self) -> &'static str {
        match self {
            PhysicalInterface::Spi => "SPI ",
            PhysicalInterface::I2c => "TWI ",
            PhysicalInterface::Swi | PhysicalInterface::Swi2 => "SWI ",
        }
    }
}

impl std::fmt::Display for PhysicalInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", InterfaceId::from(*self))
    }
}

impl From<PhysicalInterface> for InterfaceId {
    fn from(iface: PhysicalInterface) -> Self {
        match iface {
            PhysicalInterface::Swi => InterfaceId::Swi,
            PhysicalInterface::I2c => InterfaceId::I2c,
            PhysicalInterface::Spi => InterfaceId::Spi,
            PhysicalInterface::Swi2 => InterfaceId::Swi2,
        }
    }
}

impl TryFrom<InterfaceId> for PhysicalInterface {
    type Error = InterfaceId;

    fn try_from(id: InterfaceId) -> Result<Self, Self::Error> {
        match id {
            InterfaceId::Swi => Ok(PhysicalInterface::Swi),
            InterfaceId::I2c => Ok(PhysicalInterface::I2c),
            InterfaceId::Spi => Ok(PhysicalInterface::Spi),
            InterfaceId::Swi2 => Ok(PhysicalInterface::Swi2),
            other => Err(other),
        }
    }
}

// ============================================================================
// Extension Headers
// ============================================================================

/// Board connector a device sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtHeader {
    Ext1,
    Ext2,
    Ext3,
    MikroBus,
    #[default]
    None,
}

impl ExtHeader {
    /// Label used in discovery and selection diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            ExtHeader::Ext1 => "EXT1 ",
            ExtHeader::Ext2 => "EXT2 ",
            ExtHeader::Ext3 => "EXT3 ",
            ExtHeader::MikroBus => "MICROBUS",
            ExtHeader::None => "",
        }
    }
}

// ============================================================================
// Device Info
// ============================================================================

/// One discovered device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Bus address or handle.
    pub address: u32,
    /// Bus the device was found on.
    pub interface: PhysicalInterface,
    pub device_type: DeviceType,
    pub header: ExtHeader,
}

impl DeviceInfo {
    /// Line reported for this device after discovery.
    pub fn discovery_line(&self) -> String {
        let name = self.device_type.to_string();
        match self.interface {
            PhysicalInterface::Swi => format!("SWI {} {}", name, self.header.label()),
            PhysicalInterface::I2c => format!("I2C {} {:02X}", name, self.address),
            PhysicalInterface::Spi => format!("SPI {} {}", name, self.header.label()),
            PhysicalInterface::Swi2 => format!("SWI {} {:02X}", name, self.address),
        }
    }

    /// Line reported when this device becomes the selected device.
    pub fn selection_line(&self) -> String {
        let label = self.interface.selection_label();
        match self.interface {
            PhysicalInterface::I2c | PhysicalInterface::Swi2 => {
                format!("Selected {}{}{:02X}", label, self.device_type, self.address)
            }
            PhysicalInterface::Swi | PhysicalInterface::Spi => {
                format!("Selected {}{}{}", label, self.device_type, self.header.label())
            }
        }
    }
}
