//! Last-error slot.
//!
//! The interpreter records the program, location and code of the most recent
//! failure here; `board:last_error()` handlers read it back. A successfully
//! processed message clears it.

/// Program identifier for errors raised by the protocol interpreter.
pub const KIT_PROGRAM_INTERPRETER: u32 = 0x0000_0001;
/// Location identifier for message parsing inside the interpreter.
pub const KIT_LOCATION_INTERPRETER_PARSE: u32 = 0x0000_0001;

/// One recorded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    /// Program that raised the error.
    pub program: u32,
    /// Location within the program.
    pub location: u32,
    /// Status or error code.
    pub code: u32,
    /// Free-form description.
    pub message: String,
}

impl LastError {
    /// Serialize as program, location and code (big-endian) followed by the
    /// message bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.message.len());
        out.extend_from_slice(&self.program.to_be_bytes());
        out.extend_from_slice(&self.location.to_be_bytes());
        out.extend_from_slice(&self.code.to_be_bytes());
        out.extend_from_slice(self.message.as_bytes());
        out
    }
}

/// Holds at most one [`LastError`].
#[derive(Debug, Clone, Default)]
pub struct LastErrorSlot {
    error: Option<LastError>,
}

impl LastErrorSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        LastErrorSlot { error: None }
    }

    /// Record an error, replacing any previous one.
    pub fn set(&mut self, program: u32, location: u32, code: u32, message: impl Into<String>) {
        self.error = Some(LastError {
            program,
            location,
            code,
            message: message.into(),
        });
    }

    /// Clear the slot.
    pub fn clear(&mut self) {
        self.error = None;
    }

    /// Get the recorded error, if any.
    pub fn get(&self) -> Option<&LastError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let mut slot = LastErrorSlot::new();
        assert!(slot.get().is_none());

        slot.set(KIT_PROGRAM_INTERPRETER, KIT_LOCATION_INTERPRETER_PARSE, 0xE0, "bad target");
        let error = slot.get().expect("error recorded");
        assert_eq!(error.code, 0xE0);
        assert_eq!(error.message, "bad target");

        slot.clear();
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_to_bytes_layout() {
        let error = LastError {
            program: 1,
            location: 2,
            code: 0xE0,
            message: "x".to_string(),
        };
        assert_eq!(
            error.to_bytes(),
            vec![0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 0xE0, b'x']
        );
    }
}
