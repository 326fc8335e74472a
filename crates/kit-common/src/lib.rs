//! Kit Protocol common types
//!
//! Types shared by every layer of the Kit Protocol stack: the wire status
//! byte, the last-error slot reported by `board:last_error()`, the
//! line-oriented diagnostic sink, and the hex helpers used to move payloads
//! between their ASCII and binary forms.
//!
//! # Example
//!
//! ```rust
//! use kit_common::{hex_decode, hex_encode, KitStatus};
//!
//! let bytes = hex_decode(b"0102AA").unwrap();
//! assert_eq!(bytes, vec![0x01, 0x02, 0xAA]);
//! assert_eq!(hex_encode(&bytes), "0102AA");
//! assert_eq!(u8::from(KitStatus::Success), 0x00);
//! ```

mod ascii_hex;
mod diagnostics;
mod last_error;
mod status;

pub use ascii_hex::*;
pub use diagnostics::*;
pub use last_error::*;
pub use status::*;
