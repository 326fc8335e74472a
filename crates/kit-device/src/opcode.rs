//! Opcode tables: command names, response sizes and execution delays.

use std::time::Duration;

use crate::constants::*;
use crate::device::DeviceType;

/// CryptoAuth command names.
const CA_OPCODE_NAMES: [(u8, &str); 22] = [
    (ATCA_AES, "AES"),
    (ATCA_CHECKMAC, "CheckMac"),
    (ATCA_COUNTER, "Counter"),
    (ATCA_DERIVE_KEY, "DeriveKey"),
    (ATCA_ECDH, "ECDH"),
    (ATCA_GENDIG, "GenDig"),
    (ATCA_GENKEY, "GenKey"),
    (ATCA_INFO, "Info"),
    (ATCA_KDF, "KDF"),
    (ATCA_LOCK, "Lock"),
    (ATCA_MAC, "MAC"),
    (ATCA_NONCE, "Nonce"),
    (ATCA_PRIVWRITE, "PrivWrite"),
    (ATCA_RANDOM, "Random"),
    (ATCA_READ, "Read"),
    (ATCA_SECUREBOOT, "SecureBoot"),
    (ATCA_SELFTEST, "SelfTest"),
    (ATCA_SIGN, "Sign"),
    (ATCA_SHA, "SHA"),
    (ATCA_UPDATE_EXTRA, "UpdateExtra"),
    (ATCA_VERIFY, "Verify"),
    (ATCA_WRITE, "Write"),
];

/// Trust Anchor command names.
const TA_OPCODE_NAMES: [(u8, &str); 27] = [
    (TA_AES, "AES"),
    (TA_AUTHORIZE, "Authorize"),
    (TA_COUNTER, "Counter"),
    (TA_CREATE, "Create"),
    (TA_DELETE, "Delete"),
    (TA_DEVUPDATE, "DevUpdate"),
    (TA_ECDH, "ECDH"),
    (TA_EXPORT, "Export"),
    (TA_FCCONFIG, "FCConfig"),
    (TA_IMPORT, "Import"),
    (TA_INFO, "Info"),
    (TA_KDF, "KDF"),
    (TA_KEYGEN, "GenKey"),
    (TA_LOCK, "Lock"),
    (TA_MAC, "MAC"),
    (TA_MANAGECERT, "ManageCert"),
    (TA_POWER, "Power"),
    (TA_RANDOM, "Random"),
    (TA_READ, "Read"),
    (TA_RSAENC, "RSAEnc"),
    (TA_SECUREBOOT, "SecureBoot"),
    (TA_SELFTEST, "SelfTest"),
    (TA_SEQUENCE, "Sequence"),
    (TA_SHA, "SHA"),
    (TA_SIGN, "Sign"),
    (TA_VERIFY, "Verify"),
    (TA_WRITE, "Write"),
];

fn opcode_table(device_type: DeviceType) -> &'static [(u8, &'static str)] {
    match device_type {
        ty if ty < DeviceType::Sha204 => &[],
        DeviceType::Aes132 | DeviceType::Aes132a => &[],
        DeviceType::Ta100 => &TA_OPCODE_NAMES,
        _ => &CA_OPCODE_NAMES,
    }
}

/// Name of an opcode in the instruction set of the given device type.
///
/// Returns `None` when the opcode is not in the device's table or the device
/// has no table at all.
pub fn opcode_to_name(device_type: DeviceType, opcode: u8) -> Option<&'static str> {
    opcode_table(device_type)
        .iter()
        .find(|(op, _)| *op == opcode)
        .map(|(_, name)| *name)
}

/// Expected response size (count, data and CRC) for a command.
///
/// Unknown opcodes answer with [`ATCA_RSP_SIZE_FALLBACK`] so callers can size
/// their receive buffer for the worst case.
pub fn response_size_for_opcode(opcode: u8, param1: u8) -> usize {
    match opcode {
        ATCA_CHECKMAC | ATCA_DERIVE_KEY | ATCA_GENDIG | ATCA_LOCK => ATCA_RSP_SIZE_MIN,
        ATCA_PAUSE | ATCA_PRIVWRITE | ATCA_UPDATE_EXTRA | ATCA_WRITE => ATCA_RSP_SIZE_MIN,
        ATCA_INFO => ATCA_RSP_SIZE_4,
        ATCA_HMAC | ATCA_MAC | ATCA_RANDOM => ATCA_RSP_SIZE_32,
        ATCA_SIGN => ATCA_RSP_SIZE_64,
        ATCA_VERIFY => ATCA_RSP_SIZE_MAX,
        ATCA_GENKEY if param1 & GENKEY_MODE_DIGEST != 0 => ATCA_RSP_SIZE_MIN,
        ATCA_GENKEY => ATCA_RSP_SIZE_64,
        ATCA_NONCE if param1 & NONCE_MODE_MASK == NONCE_MODE_PASSTHROUGH => ATCA_RSP_SIZE_MIN,
        ATCA_NONCE => ATCA_RSP_SIZE_32,
        ATCA_READ if param1 & READ_ZONE_32_FLAG != 0 => ATCA_RSP_SIZE_32,
        ATCA_READ => ATCA_RSP_SIZE_4,
        _ => ATCA_RSP_SIZE_FALLBACK,
    }
}

/// Expected response size for a raw command packet (count, opcode, param1, ...).
///
/// Packets too short to carry an opcode get the fallback size.
pub fn response_size_for_packet(packet: &[u8]) -> usize {
    match (packet.get(ATCA_OPCODE_IDX), packet.get(ATCA_PARAM1_IDX)) {
        (Some(&opcode), param1) => response_size_for_opcode(opcode, param1.copied().unwrap_or(0)),
        _ => ATCA_RSP_SIZE_FALLBACK,
    }
}

/// Time to wait after sending a command before polling for its response.
pub fn execution_delay_for_opcode(opcode: u8) -> Duration {
    let ms = match opcode {
        ATCA_COUNTER => EXEC_DELAY_COUNTER_MS,
        ATCA_DELETE => EXEC_DELAY_DELETE_MS,
        ATCA_GENKEY => EXEC_DELAY_GENKEY_MS,
        ATCA_INFO => EXEC_DELAY_INFO_MS,
        ATCA_LOCK => EXEC_DELAY_LOCK_MS,
        ATCA_NONCE => EXEC_DELAY_NONCE_MS,
        ATCA_READ => EXEC_DELAY_READ_MS,
        ATCA_SELFTEST => EXEC_DELAY_SELFTEST_MS,
        ATCA_SHA => EXEC_DELAY_SHA_MS,
        ATCA_SIGN => EXEC_DELAY_SIGN_MS,
        ATCA_WRITE => EXEC_DELAY_WRITE_MS,
        _ => EXEC_DELAY_DEFAULT_MS,
    };
    Duration::from_millis(ms)
}
