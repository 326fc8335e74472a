//! Protocol delimiters and limits.

use serde::{Deserialize, Serialize};

use crate::error::{InterpreterError, InterpreterResult};

/// Default message terminator.
pub const KIT_MESSAGE_DELIMITER: u8 = b'\n';
/// Default section separator.
pub const KIT_LAYER_DELIMITER: u8 = b':';
/// Default opening delimiter for handles, indices and payloads.
pub const KIT_DATA_BEGIN_DELIMITER: u8 = b'(';
/// Default closing delimiter for handles, indices and payloads.
pub const KIT_DATA_END_DELIMITER: u8 = b')';
/// Hex digits in a device handle.
pub const KIT_DEVICE_HANDLE_SIZE: usize = 2;
/// Hex digits in a physical-select device index.
pub const KIT_DEVICE_INDEX_SIZE: usize = 2;
/// Default payload capacity, in hex characters.
pub const KIT_MESSAGE_SIZE_MAX: usize = 2048;

/// Interpreter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Terminates every message and response.
    pub message_delimiter: char,
    /// Separates target, command and subcommand.
    pub layer_delimiter: char,
    pub data_begin_delimiter: char,
    pub data_end_delimiter: char,
    /// Accept `a`, `e`, `s` and `t` as aliases for the `device` target.
    pub legacy_targets: bool,
    /// Longest payload accepted, in hex characters.
    pub max_message_size: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        ProtocolConfig {
            message_delimiter: KIT_MESSAGE_DELIMITER as char,
            layer_delimiter: KIT_LAYER_DELIMITER as char,
            data_begin_delimiter: KIT_DATA_BEGIN_DELIMITER as char,
            data_end_delimiter: KIT_DATA_END_DELIMITER as char,
            legacy_targets: true,
            max_message_size: KIT_MESSAGE_SIZE_MAX,
        }
    }
}

impl ProtocolConfig {
    /// Check that the delimiters are distinct ASCII characters and the
    /// payload limit is non-zero.
    pub fn validate(&self) -> InterpreterResult<()> {
        let delimiters = self.delimiters_checked()?;
        for (i, a) in delimiters.iter().enumerate() {
            if delimiters[i + 1..].contains(a) {
                return Err(InterpreterError::InvalidConfig(format!(
                    "delimiter {:?} is used twice",
                    *a as char
                )));
            }
        }
        if self.max_message_size == 0 {
            return Err(InterpreterError::InvalidConfig(
                "max_message_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    fn delimiters_checked(&self) -> InterpreterResult<[u8; 4]> {
        let mut out = [0u8; 4];
        let chars = [
            self.message_delimiter,
            self.layer_delimiter,
            self.data_begin_delimiter,
            self.data_end_delimiter,
        ];
        for (slot, c) in out.iter_mut().zip(chars) {
            if !c.is_ascii() || c.is_ascii_alphanumeric() {
                return Err(InterpreterError::InvalidConfig(format!(
                    "delimiter {:?} must be ASCII punctuation or whitespace",
                    c
                )));
            }
            *slot = c as u8;
        }
        Ok(out)
    }

    /// Terminator as a byte.
    pub fn message_byte(&self) -> u8 {
        self.message_delimiter as u8
    }

    pub fn layer_byte(&self) -> u8 {
        self.layer_delimiter as u8
    }

    pub fn data_begin_byte(&self) -> u8 {
        self.data_begin_delimiter as u8
    }

    pub fn data_end_byte(&self) -> u8 {
        self.data_end_delimiter as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ProtocolConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.message_byte(), b'\n');
        assert_eq!(config.layer_byte(), b':');
    }

    #[test]
    fn test_duplicate_delimiter_rejected() {
        let config = ProtocolConfig {
            data_end_delimiter: ':',
            ..ProtocolConfig::default()
        };
        assert!(matches!(config.validate(), Err(InterpreterError::InvalidConfig(_))));
    }

    #[test]
    fn test_non_ascii_and_hex_delimiters_rejected() {
        let config = ProtocolConfig {
            layer_delimiter: 'é',
            ..ProtocolConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ProtocolConfig {
            data_begin_delimiter: 'a',
            ..ProtocolConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_payload_limit_rejected() {
        let config = ProtocolConfig {
            max_message_size: 0,
            ..ProtocolConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
