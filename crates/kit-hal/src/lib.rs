//! Kit transport dispatch
//!
//! Binds one device bus at a time and discovers the devices attached to
//! every registered bus.
//!
//! # Dispatch States
//!
//! The dispatcher starts *Unbound*. [`Hal::select`] deinitializes whatever
//! is bound and then binds the requested bus, so at most one bus driver is
//! active. Operations issued while unbound answer `InvalidParam`.
//!
//! # Discovery
//!
//! [`Hal::discover`] scans SWI, I2C, SPI and then the second single-wire
//! variant, filling a table of at most [`MAX_DISCOVER_DEVICES`] entries.
//!
//! # Example
//!
//! ```rust
//! use kit_device::DeviceType;
//! use kit_hal::{ExtHeader, Hal, PhysicalInterface, SimDevice, SimulatedBus};
//!
//! let bus = SimulatedBus::new(
//!     PhysicalInterface::I2c,
//!     vec![SimDevice { address: 0xC0, device_type: DeviceType::Ecc608b, header: ExtHeader::None }],
//! );
//! let mut hal = Hal::new().with_transport(PhysicalInterface::I2c, bus);
//!
//! let mut lines: Vec<String> = Vec::new();
//! assert_eq!(hal.discover(&mut lines), Some(PhysicalInterface::I2c));
//! assert_eq!(lines, vec!["I2C ATECC608B C0"]);
//! ```

mod error;
mod hal;
mod interface;
pub mod sim;
mod transport;

pub use error::*;
pub use hal::*;
pub use interface::*;
pub use sim::{BusEvent, BusLog, SimDevice, SimulatedBus};
pub use transport::*;
