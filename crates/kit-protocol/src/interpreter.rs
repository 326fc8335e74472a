//! The Kit Protocol interpreter.
//!
//! One [`Interpreter`] owns the session, the transport dispatcher and the
//! handler. Each complete message runs to completion: parse, apply
//! selection, dispatch, serialize.

use bytes::Bytes;
use kit_common::{
    DiagnosticSink, KitStatus, LastError, LastErrorSlot, NullSink, KIT_LOCATION_INTERPRETER_PARSE,
    KIT_PROGRAM_INTERPRETER,
};
use kit_hal::{DeviceInfo, Hal, PhysicalInterface};
use log::{debug, warn};

use crate::command::KitCommand;
use crate::config::ProtocolConfig;
use crate::error::{InterpreterError, InterpreterResult, ParseError};
use crate::handler::{HandlerContext, KitHandler};
use crate::parser::{parse_message, ParsedMessage};
use crate::response::{frame, serialize};
use crate::session::Session;

/// Outcome of one dispatched message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub command: KitCommand,
    /// Status reported by the handler, or by the interpreter itself for
    /// physical commands.
    pub status: KitStatus,
    /// Serialized response, terminator included.
    pub response: Bytes,
}

/// Builder for [`Interpreter`].
///
/// A handler is mandatory; everything else has a default.
pub struct InterpreterBuilder {
    handler: Option<Box<dyn KitHandler>>,
    hal: Hal,
    diagnostics: Box<dyn DiagnosticSink>,
    config: ProtocolConfig,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        InterpreterBuilder {
            handler: None,
            hal: Hal::new(),
            diagnostics: Box::new(NullSink),
            config: ProtocolConfig::default(),
        }
    }
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder::default()
    }

    pub fn handler<H: KitHandler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn boxed_handler(mut self, handler: Box<dyn KitHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn hal(mut self, hal: Hal) -> Self {
        self.hal = hal;
        self
    }

    pub fn diagnostics<S: DiagnosticSink + 'static>(mut self, sink: S) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    pub fn config(mut self, config: ProtocolConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the interpreter.
    ///
    /// Fails with [`InterpreterError::MissingHandler`] when no handler was
    /// given, or [`InterpreterError::InvalidConfig`] for bad delimiters.
    pub fn build(self) -> InterpreterResult<Interpreter> {
        let handler = self.handler.ok_or(InterpreterError::MissingHandler)?;
        self.config.validate()?;

        Ok(Interpreter {
            handler,
            hal: self.hal,
            session: Session::new(),
            last_error: LastErrorSlot::new(),
            diagnostics: self.diagnostics,
            config: self.config,
        })
    }
}

/// Stateful Kit Protocol interpreter.
pub struct Interpreter {
    handler: Box<dyn KitHandler>,
    hal: Hal,
    session: Session,
    last_error: LastErrorSlot,
    diagnostics: Box<dyn DiagnosticSink>,
    config: ProtocolConfig,
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    // ========================================================================
    // Message Handling
    // ========================================================================

    /// Check whether `buffer` holds a message terminator.
    pub fn message_complete(&self, buffer: &[u8]) -> bool {
        buffer.contains(&self.config.message_byte())
    }

    /// Largest payload accepted in one message, in hex characters.
    pub fn max_message_length(&self) -> usize {
        self.config.max_message_size
    }

    /// Interpret one message.
    ///
    /// Parse failures are recorded in the last-error slot and returned
    /// without invoking any handler. Handler statuses are passed through in
    /// the [`Reply`].
    pub fn handle_message(&mut self, message: &[u8]) -> InterpreterResult<Reply> {
        let parsed = match parse_message(message, &self.config) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.record_parse_error(message, &e);
                return Err(e.into());
            }
        };

        self.apply_selection(&parsed);

        let command = parsed.command;
        let mut data = parsed.payload;
        let status = self.dispatch(command, &mut data).normalized();
        if status == KitStatus::CommandNotSupported {
            data.clear();
        }
        debug!("{} -> {}", command, status);

        let response = serialize(command, status, &data, &self.config);
        if status.is_success() {
            self.last_error.clear();
        }

        Ok(Reply {
            command,
            status,
            response,
        })
    }

    /// Interpret one message and always produce a response.
    ///
    /// Errors are rendered as an empty frame carrying their status.
    pub fn process(&mut self, message: &[u8]) -> Bytes {
        match self.handle_message(message) {
            Ok(reply) => reply.response,
            Err(e) => frame(e.status(), &[], &self.config),
        }
    }

    fn record_parse_error(&mut self, message: &[u8], error: &ParseError) {
        warn!(
            "Invalid command: {:?}: {}",
            String::from_utf8_lossy(message).trim_end(),
            error
        );
        self.last_error.set(
            KIT_PROGRAM_INTERPRETER,
            KIT_LOCATION_INTERPRETER_PARSE,
            u8::from(KitStatus::CommandNotValid) as u32,
            error.to_string(),
        );
    }

    /// Apply the selection side effects of a parsed message, in message
    /// order: target handle, interface directive, physical select.
    fn apply_selection(&mut self, parsed: &ParsedMessage) {
        if let Some(handle) = parsed.target_handle {
            self.session
                .select_device(handle, &mut self.hal, self.diagnostics.as_mut());
        }
        if let Some(iface) = parsed.interface {
            debug!("Pending interface {}", iface);
            self.session.set_pending_interface(iface);
        }
        if let Some(index) = parsed.select_index {
            self.session
                .select_device(index, &mut self.hal, self.diagnostics.as_mut());
        }
    }

    fn dispatch(&mut self, command: KitCommand, data: &mut Vec<u8>) -> KitStatus {
        let handle = self.session.selected_handle();
        let flag = data.first().is_some_and(|&b| b != 0);
        let handler = self.handler.as_mut();
        let mut ctx = HandlerContext {
            hal: &mut self.hal,
            session: &self.session,
            last_error: &self.last_error,
            diagnostics: self.diagnostics.as_mut(),
            config: &self.config,
        };

        match command {
            KitCommand::BoardVersion => handler.board_get_version(&mut ctx, data),
            KitCommand::BoardFirmware => handler.board_get_firmware(&mut ctx, data),
            KitCommand::BoardGetDevice => handler.board_get_device(&mut ctx, handle, data),
            KitCommand::BoardGetDevices => handler.board_get_devices(&mut ctx, data),
            KitCommand::BoardDiscover => handler.board_discover(&mut ctx, flag),
            KitCommand::BoardGetLastError => handler.board_get_last_error(&mut ctx, data),
            KitCommand::BoardApplication => handler.board_application(&mut ctx, handle, data),
            KitCommand::BoardPolling => handler.board_polling(&mut ctx, flag),
            KitCommand::DeviceIdle => handler.device_idle(&mut ctx, handle),
            KitCommand::DeviceSleep => handler.device_sleep(&mut ctx, handle),
            KitCommand::DeviceWake => handler.device_wake(&mut ctx, handle, data),
            KitCommand::DeviceReceive => handler.device_receive(&mut ctx, handle, data),
            KitCommand::DeviceSend => handler.device_send(&mut ctx, handle, data),
            KitCommand::DeviceTalk => handler.device_talk(&mut ctx, handle, data),
            KitCommand::MemoryRead => handler.device_mem_read(&mut ctx, handle, data),
            KitCommand::MemoryWrite => handler.device_mem_write(&mut ctx, handle, data),
            KitCommand::Physical | KitCommand::PhysicalSelect => {
                data.clear();
                KitStatus::Success
            }
            KitCommand::Unknown => KitStatus::CommandNotValid,
        }
    }

    // ========================================================================
    // Selection and Discovery
    // ========================================================================

    /// Handle passed to device handlers.
    pub fn selected_device_handle(&self) -> u32 {
        self.session.selected_handle()
    }

    /// Select a device by handle, as `device(HH)` would.
    pub fn set_selected_device_handle(&mut self, handle: u32) -> Option<DeviceInfo> {
        self.session
            .select_device(handle, &mut self.hal, self.diagnostics.as_mut())
    }

    /// Rescan every bus, reporting each device to the diagnostic sink.
    pub fn discover(&mut self) -> Option<PhysicalInterface> {
        self.hal.discover(self.diagnostics.as_mut())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn last_error(&self) -> Option<&LastError> {
        self.last_error.get()
    }

    pub fn hal(&self) -> &Hal {
        &self.hal
    }

    pub fn hal_mut(&mut self) -> &mut Hal {
        &mut self.hal
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("hal", &self.hal)
            .field("session", &self.session)
            .field("last_error", &self.last_error)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
