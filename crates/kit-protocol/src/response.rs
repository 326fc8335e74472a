//! Response serialization.
//!
//! Responses have the form `SS(HEX)` or `SS()` followed by the message
//! terminator, where `SS` is the status byte in uppercase hex.

use bytes::{BufMut, Bytes, BytesMut};
use kit_common::{hex_encode, KitStatus};

use crate::command::KitCommand;
use crate::config::ProtocolConfig;

/// Build a framed response from a status and binary payload.
pub fn frame(status: KitStatus, payload: &[u8], config: &ProtocolConfig) -> Bytes {
    let mut out = BytesMut::with_capacity(payload.len() * 2 + 5);
    out.put_slice(format!("{:02X}", u8::from(status)).as_bytes());
    out.put_u8(config.data_begin_byte());
    out.put_slice(hex_encode(payload).as_bytes());
    out.put_u8(config.data_end_byte());
    out.put_u8(config.message_byte());
    out.freeze()
}

/// Serialize the outcome of a dispatched command.
///
/// `CommandNotSupported` always carries an empty payload. Board discover
/// and physical select are acknowledged with an empty payload. The
/// verbatim board commands pass the handler's bytes through, falling back
/// to an empty frame when the handler produced nothing. The terminator is
/// appended to verbatim bytes that lack it.
pub fn serialize(command: KitCommand, status: KitStatus, data: &[u8], config: &ProtocolConfig) -> Bytes {
    let status = status.normalized();
    if status == KitStatus::CommandNotSupported || command.acknowledges_empty() {
        return frame(status, &[], config);
    }
    if command.responds_verbatim() {
        if data.is_empty() {
            return frame(status, &[], config);
        }
        let terminator = config.message_byte();
        if data.last() == Some(&terminator) {
            return Bytes::copy_from_slice(data);
        }
        let mut out = BytesMut::with_capacity(data.len() + 1);
        out.put_slice(data);
        out.put_u8(terminator);
        return out.freeze();
    }
    frame(status, data, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame() {
        let config = ProtocolConfig::default();
        assert_eq!(frame(KitStatus::Success, &[0xAA], &config), Bytes::from_static(b"00(AA)\n"));
        assert_eq!(frame(KitStatus::CommandNotValid, &[], &config), Bytes::from_static(b"E0()\n"));
        assert_eq!(frame(KitStatus::Other(0x7B), &[0x01, 0x0F], &config), Bytes::from_static(b"7B(010F)\n"));
    }

    #[test]
    fn test_not_supported_drops_payload() {
        let config = ProtocolConfig::default();
        let out = serialize(KitCommand::DeviceTalk, KitStatus::CommandNotSupported, &[1, 2, 3], &config);
        assert_eq!(out, Bytes::from_static(b"E1()\n"));
        let out = serialize(KitCommand::BoardVersion, KitStatus::CommandNotSupported, b"junk", &config);
        assert_eq!(out, Bytes::from_static(b"E1()\n"));
    }

    #[test]
    fn test_empty_acknowledgements() {
        let config = ProtocolConfig::default();
        let out = serialize(KitCommand::BoardDiscover, KitStatus::Success, &[0x01], &config);
        assert_eq!(out, Bytes::from_static(b"00()\n"));
        let out = serialize(KitCommand::PhysicalSelect, KitStatus::Success, &[0x01], &config);
        assert_eq!(out, Bytes::from_static(b"00()\n"));
    }

    #[test]
    fn test_verbatim_commands() {
        let config = ProtocolConfig::default();
        let out = serialize(KitCommand::BoardVersion, KitStatus::Success, b"Kit 00(010203)\n", &config);
        assert_eq!(out, Bytes::from_static(b"Kit 00(010203)\n"));
        let out = serialize(KitCommand::BoardFirmware, KitStatus::ExecutionError, &[], &config);
        assert_eq!(out, Bytes::from_static(b"0F()\n"));
    }

    #[test]
    fn test_verbatim_gets_terminator() {
        let config = ProtocolConfig::default();
        let out = serialize(KitCommand::BoardVersion, KitStatus::Success, b"KIT 00(01)", &config);
        assert_eq!(out, Bytes::from_static(b"KIT 00(01)\n"));

        let config = ProtocolConfig {
            message_delimiter: ';',
            ..ProtocolConfig::default()
        };
        let out = serialize(KitCommand::BoardGetDevice, KitStatus::Success, b"ATECC608B 00()\n", &config);
        assert_eq!(out, Bytes::from_static(b"ATECC608B 00()\n;"));
    }

    #[test]
    fn test_other_not_supported_drops_payload() {
        let config = ProtocolConfig::default();
        let out = serialize(KitCommand::DeviceTalk, KitStatus::Other(0xE1), &[1, 2], &config);
        assert_eq!(out, Bytes::from_static(b"E1()\n"));
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let config = ProtocolConfig {
            message_delimiter: ';',
            ..ProtocolConfig::default()
        };
        let a = serialize(KitCommand::DeviceReceive, KitStatus::Success, &[0xDE, 0xAD], &config);
        let b = serialize(KitCommand::DeviceReceive, KitStatus::Success, &[0xDE, 0xAD], &config);
        assert_eq!(a, b);
        assert_eq!(a, Bytes::from_static(b"00(DEAD);"));
    }
}
