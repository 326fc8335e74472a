//! Command handler interface.
//!
//! Integrators implement [`KitHandler`] to give commands their meaning. Every
//! method has a default that answers `CommandNotSupported`, so a handler
//! only overrides what its board can do.
//!
//! Buffers are in/out: on entry `data` holds the decoded request payload,
//! on return it holds the response payload. For `board:version`,
//! `board:firmware`, `board:device` and `board:last_error` the returned
//! bytes are sent to the host as-is, with the message terminator appended
//! when missing (see [`crate::frame`]).

use kit_common::{DiagnosticSink, KitStatus, LastErrorSlot};
use kit_hal::Hal;

use crate::config::ProtocolConfig;
use crate::session::Session;

/// Interpreter state lent to a handler for one command.
pub struct HandlerContext<'a> {
    /// Transport dispatcher and discovered devices.
    pub hal: &'a mut Hal,
    /// Current device selection.
    pub session: &'a Session,
    /// Most recent interpreter failure.
    pub last_error: &'a LastErrorSlot,
    pub diagnostics: &'a mut dyn DiagnosticSink,
    pub config: &'a ProtocolConfig,
}

/// One method per dispatchable command.
#[allow(unused_variables)]
pub trait KitHandler: Send {
    fn board_get_version(&mut self, ctx: &mut HandlerContext<'_>, data: &mut Vec<u8>) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn board_get_firmware(&mut self, ctx: &mut HandlerContext<'_>, data: &mut Vec<u8>) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn board_get_device(
        &mut self,
        ctx: &mut HandlerContext<'_>,
        handle: u32,
        data: &mut Vec<u8>,
    ) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn board_get_devices(&mut self, ctx: &mut HandlerContext<'_>, data: &mut Vec<u8>) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    /// `enable` is true when the first payload byte is non-zero.
    fn board_discover(&mut self, ctx: &mut HandlerContext<'_>, enable: bool) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn board_get_last_error(&mut self, ctx: &mut HandlerContext<'_>, data: &mut Vec<u8>) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn board_application(
        &mut self,
        ctx: &mut HandlerContext<'_>,
        handle: u32,
        data: &mut Vec<u8>,
    ) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn board_polling(&mut self, ctx: &mut HandlerContext<'_>, enable: bool) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn device_idle(&mut self, ctx: &mut HandlerContext<'_>, handle: u32) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn device_sleep(&mut self, ctx: &mut HandlerContext<'_>, handle: u32) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn device_wake(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn device_receive(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn device_send(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn device_talk(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn device_mem_read(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        KitStatus::CommandNotSupported
    }

    fn device_mem_write(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        KitStatus::CommandNotSupported
    }
}
