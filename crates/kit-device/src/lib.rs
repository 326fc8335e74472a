//! CryptoAuthentication device registry
//!
//! Static lookup tables used by the Kit Protocol stack to identify attached
//! security devices and reason about their commands.
//!
//! # Overview
//!
//! - **Classification**: Info response bytes to [`DeviceType`]
//! - **Names**: device and opcode display names, with the opcode table chosen
//!   by device family
//! - **Timing**: per-opcode response sizes and execution delays
//! - **Power**: which devices support the idle state
//!
//! All lookups are pure. A miss is an explicit `None` or
//! [`DeviceType::Unknown`], never an error.
//!
//! # Example
//!
//! ```rust
//! use kit_device::{classify_from_info_bytes, opcode_to_name, DeviceType, ATCA_SIGN};
//!
//! let ty = classify_from_info_bytes([0x00, 0x00, 0x60, 0x03]);
//! assert_eq!(ty, DeviceType::Ecc608b);
//! assert_eq!(opcode_to_name(ty, ATCA_SIGN), Some("Sign"));
//! ```

mod constants;
mod device;
mod opcode;

pub use constants::*;
pub use device::*;
pub use opcode::*;
