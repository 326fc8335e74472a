//! Device constants
//!
//! Identification bytes, opcodes, response sizes and execution delays for
//! the CryptoAuthentication device families addressed through the Kit
//! Protocol.

// ============================================================================
// Info Response Layout
// ============================================================================

/// Offset of the device identifier byte in an Info response.
pub const DEVICE_IDENTIFIER_LOCATION: usize = 1;
/// Offset of the part code byte in an Info response.
pub const DEVICE_PART_LOCATION: usize = 2;
/// Offset of the silicon revision byte in an Info response.
pub const DEVICE_REVISION_LOCATION: usize = 3;

// ============================================================================
// Device Identifiers
// ============================================================================

/// Product family and revision of the ECC204 generation.
pub const ECC_REV_NUM: u8 = 0x01;
/// Product family and revision of the SHA10x / RNG90 generation.
pub const SHA_REV_NUM: u8 = 0x02;

pub const ECC204_DEVICE_ID: u8 = 0x5A;
pub const ECC206_DEVICE_ID: u8 = 0x5E;
pub const TA010_DEVICE_ID: u8 = 0x6A;
pub const RNG90_DEVICE_ID: u8 = 0x4A;
pub const SHA104_DEVICE_ID: u8 = 0x3A;
pub const SHA105_DEVICE_ID: u8 = 0x3B;
pub const SHA106_DEVICE_ID: u8 = 0x3C;

// ============================================================================
// CryptoAuth Opcodes
// ============================================================================

pub const ATCA_PAUSE: u8 = 0x01;
pub const ATCA_READ: u8 = 0x02;
pub const ATCA_MAC: u8 = 0x08;
pub const ATCA_HMAC: u8 = 0x11;
pub const ATCA_WRITE: u8 = 0x12;
pub const ATCA_DELETE: u8 = 0x13;
pub const ATCA_GENDIG: u8 = 0x15;
pub const ATCA_NONCE: u8 = 0x16;
pub const ATCA_LOCK: u8 = 0x17;
pub const ATCA_RANDOM: u8 = 0x1B;
pub const ATCA_DERIVE_KEY: u8 = 0x1C;
pub const ATCA_UPDATE_EXTRA: u8 = 0x20;
pub const ATCA_COUNTER: u8 = 0x24;
pub const ATCA_CHECKMAC: u8 = 0x28;
pub const ATCA_INFO: u8 = 0x30;
pub const ATCA_GENKEY: u8 = 0x40;
pub const ATCA_SIGN: u8 = 0x41;
pub const ATCA_ECDH: u8 = 0x43;
pub const ATCA_VERIFY: u8 = 0x45;
pub const ATCA_PRIVWRITE: u8 = 0x46;
pub const ATCA_SHA: u8 = 0x47;
pub const ATCA_AES: u8 = 0x51;
pub const ATCA_KDF: u8 = 0x56;
pub const ATCA_SELFTEST: u8 = 0x77;
pub const ATCA_SECUREBOOT: u8 = 0x80;

// ============================================================================
// Trust Anchor Opcodes
// ============================================================================

pub const TA_AES: u8 = 0x80;
pub const TA_AUTHORIZE: u8 = 0x81;
pub const TA_COUNTER: u8 = 0x82;
pub const TA_CREATE: u8 = 0x83;
pub const TA_DELETE: u8 = 0x84;
pub const TA_DEVUPDATE: u8 = 0x85;
pub const TA_ECDH: u8 = 0x86;
pub const TA_EXPORT: u8 = 0x87;
pub const TA_FCCONFIG: u8 = 0x88;
pub const TA_IMPORT: u8 = 0x89;
pub const TA_INFO: u8 = 0x8A;
pub const TA_KDF: u8 = 0x8B;
pub const TA_KEYGEN: u8 = 0x8C;
pub const TA_LOCK: u8 = 0x8D;
pub const TA_MAC: u8 = 0x8E;
pub const TA_MANAGECERT: u8 = 0x8F;
pub const TA_POWER: u8 = 0x90;
pub const TA_RANDOM: u8 = 0x91;
pub const TA_READ: u8 = 0x92;
pub const TA_RSAENC: u8 = 0x93;
pub const TA_SECUREBOOT: u8 = 0x94;
pub const TA_SELFTEST: u8 = 0x95;
pub const TA_SEQUENCE: u8 = 0x96;
pub const TA_SHA: u8 = 0x97;
pub const TA_SIGN: u8 = 0x98;
pub const TA_VERIFY: u8 = 0x99;
pub const TA_WRITE: u8 = 0x9A;

// ============================================================================
// Command Packet Layout
// ============================================================================

/// Offset of the opcode in a command packet (after the count byte).
pub const ATCA_OPCODE_IDX: usize = 1;
/// Offset of param1 in a command packet.
pub const ATCA_PARAM1_IDX: usize = 2;

// ============================================================================
// Response Sizes (count + data + CRC)
// ============================================================================

/// Smallest response: count, status, CRC.
pub const ATCA_RSP_SIZE_MIN: usize = 4;
/// Response carrying four data bytes.
pub const ATCA_RSP_SIZE_4: usize = 7;
/// Response carrying 32 data bytes.
pub const ATCA_RSP_SIZE_32: usize = 35;
/// Response carrying 64 data bytes.
pub const ATCA_RSP_SIZE_64: usize = 67;
/// Largest fixed response.
pub const ATCA_RSP_SIZE_MAX: usize = 75;
/// Size assumed for an opcode with no entry in the table.
pub const ATCA_RSP_SIZE_FALLBACK: usize = 110;

/// GenKey mode bit: digest only, no public key returned.
pub const GENKEY_MODE_DIGEST: u8 = 0x08;
/// Nonce mode mask.
pub const NONCE_MODE_MASK: u8 = 0x03;
/// Nonce pass-through mode.
pub const NONCE_MODE_PASSTHROUGH: u8 = 0x03;
/// Read zone flag: 32-byte block instead of a 4-byte word.
pub const READ_ZONE_32_FLAG: u8 = 0x80;

// ============================================================================
// Execution Delays (milliseconds)
// ============================================================================

pub const EXEC_DELAY_COUNTER_MS: u64 = 20;
pub const EXEC_DELAY_DELETE_MS: u64 = 200;
pub const EXEC_DELAY_GENKEY_MS: u64 = 500;
pub const EXEC_DELAY_INFO_MS: u64 = 20;
pub const EXEC_DELAY_LOCK_MS: u64 = 80;
pub const EXEC_DELAY_NONCE_MS: u64 = 20;
pub const EXEC_DELAY_READ_MS: u64 = 40;
pub const EXEC_DELAY_SELFTEST_MS: u64 = 600;
pub const EXEC_DELAY_SHA_MS: u64 = 80;
pub const EXEC_DELAY_SIGN_MS: u64 = 500;
pub const EXEC_DELAY_WRITE_MS: u64 = 40;
/// Delay for opcodes with no table entry.
pub const EXEC_DELAY_DEFAULT_MS: u64 = 100;
