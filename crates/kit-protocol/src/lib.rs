//! Kit Protocol interpreter
//!
//! Parses ASCII Kit Protocol messages, keeps track of the selected device,
//! dispatches each command to an integrator-supplied [`KitHandler`] and
//! serializes the result.
//!
//! # Protocol Overview
//!
//! A message has up to three sections separated by `:` and ends with `\n`:
//!
//! ```text
//! board:discover()
//! device(01):talk(0102)
//! device:physical:select(02)
//! device:physical:interface:swi
//! ```
//!
//! The first character of the target picks the family (`b` board, `d`
//! device, with `a`/`e`/`s`/`t` accepted as legacy device aliases). An
//! optional two-digit hex handle in the target selects a discovered device
//! for this and later messages. Command mnemonics are matched on short
//! prefixes (`v`, `f`, `di`, `d`, `g`, `l`, `a` for the board; `p`, `i`,
//! `se`, `s`, `mw`, `mr`, `w`, `r`, `t` for devices). Payloads are ASCII
//! hex.
//!
//! Responses are `SS(HEX)\n` or `SS()\n` where `SS` is the status byte.
//!
//! # Example
//!
//! ```
//! use kit_protocol::{Interpreter, InterpreterError, KitHandler};
//!
//! struct Board;
//! impl KitHandler for Board {}
//!
//! fn main() -> Result<(), InterpreterError> {
//!     let mut interp = Interpreter::builder().handler(Board).build()?;
//!     let response = interp.process(b"board:discover()\n");
//!     assert_eq!(&response[..], b"E1()\n");
//!     Ok(())
//! }
//! ```

mod codec;
mod command;
mod config;
mod error;
mod handler;
mod interpreter;
mod parser;
mod response;
mod session;
mod token;

pub use codec::*;
pub use command::*;
pub use config::*;
pub use error::*;
pub use handler::*;
pub use interpreter::*;
pub use parser::*;
pub use response::*;
pub use session::*;
pub use token::*;
