//! Kit Protocol status codes.
//!
//! Every response carries one status byte rendered as two uppercase hex
//! digits. The interpreter produces a handful of these itself; the rest are
//! passed through verbatim from transports and command handlers.

// ============================================================================
// Status Codes
// ============================================================================

/// Command completed successfully.
pub const KIT_STATUS_SUCCESS: u8 = 0x00;
/// CheckMac or Verify miscompare.
pub const KIT_STATUS_CHECKMAC_FAIL: u8 = 0x01;
/// Device could not parse the command.
pub const KIT_STATUS_PARSE_ERROR: u8 = 0x03;
/// ECC computation fault reported by the device.
pub const KIT_STATUS_ECC_FAULT: u8 = 0x05;
/// Device reported an execution error.
pub const KIT_STATUS_EXECUTION_ERROR: u8 = 0x0F;
/// Device answered the wake token.
pub const KIT_STATUS_WAKE_SUCCESS: u8 = 0x11;
/// Message was malformed and could not be interpreted.
pub const KIT_STATUS_COMMAND_NOT_VALID: u8 = 0xE0;
/// Message was well formed but no handler is bound for it.
pub const KIT_STATUS_COMMAND_NOT_SUPPORTED: u8 = 0xE1;
/// Caller supplied a null or malformed parameter.
pub const KIT_STATUS_INVALID_PARAM: u8 = 0xE2;
/// Device handle or index is not known.
pub const KIT_STATUS_INVALID_ID: u8 = 0xE3;
/// Buffer size does not match the operation.
pub const KIT_STATUS_INVALID_SIZE: u8 = 0xE4;
/// Response failed its CRC check.
pub const KIT_STATUS_RX_CRC_ERROR: u8 = 0xE5;
/// Receive failed.
pub const KIT_STATUS_RX_FAIL: u8 = 0xE6;
/// No response from the device.
pub const KIT_STATUS_RX_NO_RESPONSE: u8 = 0xE7;
/// Bus-level communication failure.
pub const KIT_STATUS_COMM_FAIL: u8 = 0xF0;
/// Operation timed out.
pub const KIT_STATUS_TIMEOUT: u8 = 0xF1;
/// Watchdog is about to expire; the device needs to sleep.
pub const KIT_STATUS_WATCHDOG_ABOUT_TO_EXPIRE: u8 = 0xEE;

/// Status carried in the first byte of every Kit Protocol response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KitStatus {
    /// Command completed successfully.
    Success,
    /// CheckMac or Verify miscompare.
    CheckmacFail,
    /// Device could not parse the command.
    ParseError,
    /// ECC computation fault.
    EccFault,
    /// Device execution error.
    ExecutionError,
    /// Device answered the wake token.
    WakeSuccess,
    /// Malformed message.
    CommandNotValid,
    /// No handler bound for the command.
    CommandNotSupported,
    /// Null or malformed parameter.
    InvalidParam,
    /// Unknown device handle or index.
    InvalidId,
    /// Wrong buffer size.
    InvalidSize,
    /// Response CRC mismatch.
    RxCrcError,
    /// Receive failed.
    RxFail,
    /// Device did not respond.
    RxNoResponse,
    /// Bus communication failure.
    CommFail,
    /// Operation timed out.
    Timeout,
    /// Watchdog about to expire.
    WatchdogAboutToExpire,
    /// Any other code, passed through unchanged.
    Other(u8),
}

impl KitStatus {
    /// Check if this status reports success.
    pub fn is_success(&self) -> bool {
        u8::from(*self) == KIT_STATUS_SUCCESS
    }

    /// Map `Other` codes that name a known status back onto its variant.
    pub fn normalized(self) -> KitStatus {
        KitStatus::from(u8::from(self))
    }
}

impl std::fmt::Display for KitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KitStatus::Success => write!(f, "success"),
            KitStatus::CheckmacFail => write!(f, "checkmac failed"),
            KitStatus::ParseError => write!(f, "device parse error"),
            KitStatus::EccFault => write!(f, "ECC fault"),
            KitStatus::ExecutionError => write!(f, "execution error"),
            KitStatus::WakeSuccess => write!(f, "wake success"),
            KitStatus::CommandNotValid => write!(f, "command not valid"),
            KitStatus::CommandNotSupported => write!(f, "command not supported"),
            KitStatus::InvalidParam => write!(f, "invalid parameter"),
            KitStatus::InvalidId => write!(f, "invalid id"),
            KitStatus::InvalidSize => write!(f, "invalid size"),
            KitStatus::RxCrcError => write!(f, "receive CRC error"),
            KitStatus::RxFail => write!(f, "receive failed"),
            KitStatus::RxNoResponse => write!(f, "no response"),
            KitStatus::CommFail => write!(f, "communication failure"),
            KitStatus::Timeout => write!(f, "timeout"),
            KitStatus::WatchdogAboutToExpire => write!(f, "watchdog about to expire"),
            KitStatus::Other(code) => write!(f, "status 0x{:02X}", code),
        }
    }
}

impl From<u8> for KitStatus {
    fn from(code: u8) -> Self {
        match code {
            KIT_STATUS_SUCCESS => KitStatus::Success,
            KIT_STATUS_CHECKMAC_FAIL => KitStatus::CheckmacFail,
            KIT_STATUS_PARSE_ERROR => KitStatus::ParseError,
            KIT_STATUS_ECC_FAULT => KitStatus::EccFault,
            KIT_STATUS_EXECUTION_ERROR => KitStatus::ExecutionError,
            KIT_STATUS_WAKE_SUCCESS => KitStatus::WakeSuccess,
            KIT_STATUS_COMMAND_NOT_VALID => KitStatus::CommandNotValid,
            KIT_STATUS_COMMAND_NOT_SUPPORTED => KitStatus::CommandNotSupported,
            KIT_STATUS_INVALID_PARAM => KitStatus::InvalidParam,
            KIT_STATUS_INVALID_ID => KitStatus::InvalidId,
            KIT_STATUS_INVALID_SIZE => KitStatus::InvalidSize,
            KIT_STATUS_RX_CRC_ERROR => KitStatus::RxCrcError,
            KIT_STATUS_RX_FAIL => KitStatus::RxFail,
            KIT_STATUS_RX_NO_RESPONSE => KitStatus::RxNoResponse,
            KIT_STATUS_COMM_FAIL => KitStatus::CommFail,
            KIT_STATUS_TIMEOUT => KitStatus::Timeout,
            KIT_STATUS_WATCHDOG_ABOUT_TO_EXPIRE => KitStatus::WatchdogAboutToExpire,
            _ => KitStatus::Other(code),
        }
    }
}

impl From<KitStatus> for u8 {
    fn from(status: KitStatus) -> Self {
        match status {
            KitStatus::Success => KIT_STATUS_SUCCESS,
            KitStatus::CheckmacFail => KIT_STATUS_CHECKMAC_FAIL,
            KitStatus::ParseError => KIT_STATUS_PARSE_ERROR,
            KitStatus::EccFault => KIT_STATUS_ECC_FAULT,
            KitStatus::ExecutionError => KIT_STATUS_EXECUTION_ERROR,
            KitStatus::WakeSuccess => KIT_STATUS_WAKE_SUCCESS,
            KitStatus::CommandNotValid => KIT_STATUS_COMMAND_NOT_VALID,
            KitStatus::CommandNotSupported => KIT_STATUS_COMMAND_NOT_SUPPORTED,
            KitStatus::InvalidParam => KIT_STATUS_INVALID_PARAM,
            KitStatus::InvalidId => KIT_STATUS_INVALID_ID,
            KitStatus::InvalidSize => KIT_STATUS_INVALID_SIZE,
            KitStatus::RxCrcError => KIT_STATUS_RX_CRC_ERROR,
            KitStatus::RxFail => KIT_STATUS_RX_FAIL,
            KitStatus::RxNoResponse => KIT_STATUS_RX_NO_RESPONSE,
            KitStatus::CommFail => KIT_STATUS_COMM_FAIL,
            KitStatus::Timeout => KIT_STATUS_TIMEOUT,
            KitStatus::WatchdogAboutToExpire => KIT_STATUS_WATCHDOG_ABOUT_TO_EXPIRE,
            KitStatus::Other(code) => code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_both_ways() {
        for code in [
            KIT_STATUS_SUCCESS,
            KIT_STATUS_COMMAND_NOT_VALID,
            KIT_STATUS_COMMAND_NOT_SUPPORTED,
            KIT_STATUS_INVALID_PARAM,
            KIT_STATUS_WAKE_SUCCESS,
        ] {
            assert_eq!(u8::from(KitStatus::from(code)), code);
        }
    }

    #[test]
    fn test_unknown_code_passes_through() {
        let status = KitStatus::from(0x7B);
        assert_eq!(status, KitStatus::Other(0x7B));
        assert_eq!(u8::from(status), 0x7B);
        assert_eq!(status.to_string(), "status 0x7B");
    }

    #[test]
    fn test_other_with_known_code() {
        assert!(KitStatus::Other(0x00).is_success());
        assert!(!KitStatus::Other(0x7B).is_success());
        assert_eq!(KitStatus::Other(0xE1).normalized(), KitStatus::CommandNotSupported);
        assert_eq!(KitStatus::Other(0x7B).normalized(), KitStatus::Other(0x7B));
    }
}
