//! Decoded Kit Protocol commands.

/// Target family selected by the first section of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandFamily {
    Board,
    Device,
}

/// Every command a message can decode to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KitCommand {
    BoardVersion,
    BoardFirmware,
    BoardGetDevice,
    BoardGetDevices,
    BoardDiscover,
    BoardGetLastError,
    BoardApplication,
    /// Reserved: dispatched to handlers but no mnemonic decodes to it.
    BoardPolling,
    DeviceIdle,
    DeviceSleep,
    DeviceWake,
    DeviceReceive,
    DeviceSend,
    DeviceTalk,
    MemoryRead,
    MemoryWrite,
    /// `device:physical:<subcommand>` with an interface directive.
    Physical,
    PhysicalSelect,
    #[default]
    Unknown,
}

impl KitCommand {
    /// Decode a lowercase board mnemonic.
    pub fn from_board_mnemonic(mnemonic: &[u8]) -> KitCommand {
        match mnemonic {
            [b'v', ..] => KitCommand::BoardVersion,
            [b'f', ..] => KitCommand::BoardFirmware,
            [b'd', b'i', ..] => KitCommand::BoardDiscover,
            [b'd', ..] => KitCommand::BoardGetDevice,
            [b'g', ..] => KitCommand::BoardGetDevices,
            [b'l', ..] => KitCommand::BoardGetLastError,
            [b'a', ..] => KitCommand::BoardApplication,
            _ => KitCommand::Unknown,
        }
    }

    /// Decode a lowercase device mnemonic.
    pub fn from_device_mnemonic(mnemonic: &[u8]) -> KitCommand {
        match mnemonic {
            [b'p', ..] => KitCommand::Physical,
            [b'i', ..] => KitCommand::DeviceIdle,
            [b's', b'e', ..] => KitCommand::DeviceSend,
            [b's', ..] => KitCommand::DeviceSleep,
            [b'm', b'w', ..] => KitCommand::MemoryWrite,
            [b'm', b'r', ..] => KitCommand::MemoryRead,
            [b'w', ..] => KitCommand::DeviceWake,
            [b'r', ..] => KitCommand::DeviceReceive,
            [b't', ..] => KitCommand::DeviceTalk,
            _ => KitCommand::Unknown,
        }
    }

    /// Decode a lowercase mnemonic for the given family.
    pub fn from_mnemonic(family: CommandFamily, mnemonic: &[u8]) -> KitCommand {
        match family {
            CommandFamily::Board => KitCommand::from_board_mnemonic(mnemonic),
            CommandFamily::Device => KitCommand::from_device_mnemonic(mnemonic),
        }
    }

    /// Commands whose handler output is sent to the host verbatim.
    pub fn responds_verbatim(self) -> bool {
        matches!(
            self,
            KitCommand::BoardVersion
                | KitCommand::BoardFirmware
                | KitCommand::BoardGetDevice
                | KitCommand::BoardGetLastError
        )
    }

    /// Commands answered with an empty acknowledgement whatever the handler
    /// returned.
    pub fn acknowledges_empty(self) -> bool {
        matches!(self, KitCommand::BoardDiscover | KitCommand::PhysicalSelect)
    }

    /// Short name used in logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            KitCommand::BoardVersion => "board_version",
            KitCommand::BoardFirmware => "board_firmware",
            KitCommand::BoardGetDevice => "board_get_device",
            KitCommand::BoardGetDevices => "board_get_devices",
            KitCommand::BoardDiscover => "board_discover",
            KitCommand::BoardGetLastError => "board_get_last_error",
            KitCommand::BoardApplication => "board_application",
            KitCommand::BoardPolling => "board_polling",
            KitCommand::DeviceIdle => "device_idle",
            KitCommand::DeviceSleep => "device_sleep",
            KitCommand::DeviceWake => "device_wake",
            KitCommand::DeviceReceive => "device_receive",
            KitCommand::DeviceSend => "device_send",
            KitCommand::DeviceTalk => "device_talk",
            KitCommand::MemoryRead => "memory_read",
            KitCommand::MemoryWrite => "memory_write",
            KitCommand::Physical => "physical",
            KitCommand::PhysicalSelect => "physical_select",
            KitCommand::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for KitCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_prefixes() {
        assert_eq!(KitCommand::from_board_mnemonic(b"version"), KitCommand::BoardVersion);
        assert_eq!(KitCommand::from_board_mnemonic(b"discover"), KitCommand::BoardDiscover);
        assert_eq!(KitCommand::from_board_mnemonic(b"device"), KitCommand::BoardGetDevice);
        assert_eq!(KitCommand::from_board_mnemonic(b"d"), KitCommand::BoardGetDevice);
        assert_eq!(KitCommand::from_board_mnemonic(b"get_devices"), KitCommand::BoardGetDevices);
        assert_eq!(KitCommand::from_board_mnemonic(b"last_error"), KitCommand::BoardGetLastError);
        assert_eq!(KitCommand::from_board_mnemonic(b"zzz"), KitCommand::Unknown);
        assert_eq!(KitCommand::from_board_mnemonic(b""), KitCommand::Unknown);
    }

    #[test]
    fn test_device_prefixes() {
        assert_eq!(KitCommand::from_device_mnemonic(b"send"), KitCommand::DeviceSend);
        assert_eq!(KitCommand::from_device_mnemonic(b"sleep"), KitCommand::DeviceSleep);
        assert_eq!(KitCommand::from_device_mnemonic(b"s"), KitCommand::DeviceSleep);
        assert_eq!(KitCommand::from_device_mnemonic(b"mw"), KitCommand::MemoryWrite);
        assert_eq!(KitCommand::from_device_mnemonic(b"mr"), KitCommand::MemoryRead);
        assert_eq!(KitCommand::from_device_mnemonic(b"m"), KitCommand::Unknown);
        assert_eq!(KitCommand::from_device_mnemonic(b"mx"), KitCommand::Unknown);
        assert_eq!(KitCommand::from_device_mnemonic(b"talk"), KitCommand::DeviceTalk);
        assert_eq!(KitCommand::from_device_mnemonic(b"physical"), KitCommand::Physical);
    }

    #[test]
    fn test_response_shapes() {
        assert!(KitCommand::BoardVersion.responds_verbatim());
        assert!(!KitCommand::BoardGetDevices.responds_verbatim());
        assert!(KitCommand::BoardDiscover.acknowledges_empty());
        assert!(KitCommand::PhysicalSelect.acknowledges_empty());
        assert!(!KitCommand::DeviceTalk.acknowledges_empty());
    }
}
