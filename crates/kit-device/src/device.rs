//! Device-type classification.
//!
//! Maps the identification bytes a device reports in its Info response to a
//! [`DeviceType`]. Every input yields a concrete type or
//! [`DeviceType::Unknown`]; nothing here fails.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Device family, ordered by generation.
///
/// The ordering matters: anything below [`DeviceType::Sha204`] has no
/// command-name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Unknown,
    Sha204,
    Sha204a,
    Aes132,
    Aes132a,
    Ecc108,
    Ecc108a,
    Ecc508a,
    Ecc608a,
    Ecc608b,
    Sha206a,
    Ta100,
    Ecc204,
    Ta010,
    Ecc206,
    Rng90,
    Sha104,
    Sha105,
    Sha106,
}

impl DeviceType {
    /// Every classified device type, in generation order.
    pub const ALL: [DeviceType; 18] = [
        DeviceType::Sha204,
        DeviceType::Sha204a,
        DeviceType::Aes132,
        DeviceType::Aes132a,
        DeviceType::Ecc108,
        DeviceType::Ecc108a,
        DeviceType::Ecc508a,
        DeviceType::Ecc608a,
        DeviceType::Ecc608b,
        DeviceType::Sha206a,
        DeviceType::Ta100,
        DeviceType::Ecc204,
        DeviceType::Ta010,
        DeviceType::Ecc206,
        DeviceType::Rng90,
        DeviceType::Sha104,
        DeviceType::Sha105,
        DeviceType::Sha106,
    ];
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", device_type_to_name(*self).unwrap_or("unknown"))
    }
}

// ============================================================================
// Classification Tables
// ============================================================================

/// One row of the identifier/revision classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDetails {
    pub device_type: DeviceType,
    pub identifier: u8,
    pub revision: u8,
}

/// Devices identified by an (identifier, revision) pair rather than a part
/// code.
pub const DEVICE_DETAILS: [DeviceDetails; 7] = [
    DeviceDetails { device_type: DeviceType::Ecc204, identifier: ECC204_DEVICE_ID, revision: ECC_REV_NUM },
    DeviceDetails { device_type: DeviceType::Ecc206, identifier: ECC206_DEVICE_ID, revision: ECC_REV_NUM },
    DeviceDetails { device_type: DeviceType::Ta010, identifier: TA010_DEVICE_ID, revision: ECC_REV_NUM },
    DeviceDetails { device_type: DeviceType::Rng90, identifier: RNG90_DEVICE_ID, revision: SHA_REV_NUM },
    DeviceDetails { device_type: DeviceType::Sha104, identifier: SHA104_DEVICE_ID, revision: SHA_REV_NUM },
    DeviceDetails { device_type: DeviceType::Sha105, identifier: SHA105_DEVICE_ID, revision: SHA_REV_NUM },
    DeviceDetails { device_type: DeviceType::Sha106, identifier: SHA106_DEVICE_ID, revision: SHA_REV_NUM },
];

const DEVICE_NAMES: [(DeviceType, &str); 18] = [
    (DeviceType::Sha204, "ATSHA204"),
    (DeviceType::Sha204a, "ATSHA204A"),
    (DeviceType::Aes132, "ATAES132"),
    (DeviceType::Aes132a, "ATAES132A"),
    (DeviceType::Ecc108, "ATECC108"),
    (DeviceType::Ecc108a, "ATECC108A"),
    (DeviceType::Ecc508a, "ATECC508A"),
    (DeviceType::Ecc608a, "ATECC608A"),
    (DeviceType::Ecc608b, "ATECC608B"),
    (DeviceType::Sha206a, "ATSHA206A"),
    (DeviceType::Ta100, "TA100"),
    (DeviceType::Ecc204, "ECC204"),
    (DeviceType::Ta010, "TA010"),
    (DeviceType::Ecc206, "ECC206"),
    (DeviceType::Rng90, "RNG90"),
    (DeviceType::Sha104, "SHA104"),
    (DeviceType::Sha105, "SHA105"),
    (DeviceType::Sha106, "SHA106"),
];

/// Part code reported by the identifier/revision families.
const PART_CODE_DETAILED: u8 = 0x20;

// ============================================================================
// Lookups
// ============================================================================

/// Classify a device from its identifier and revision bytes.
///
/// A revision of zero is always an ECC204: early ECC204 silicon reports no
/// revision.
pub fn classify_device(identifier: u8, revision: u8) -> DeviceType {
    if revision == 0x00 {
        return DeviceType::Ecc204;
    }

    DEVICE_DETAILS
        .iter()
        .find(|row| row.identifier == identifier && row.revision == revision)
        .map(|row| row.device_type)
        .unwrap_or(DeviceType::Unknown)
}

/// Classify a device from the four revision bytes of its Info response.
pub fn classify_from_info_bytes(info: [u8; 4]) -> DeviceType {
    let revision = info[DEVICE_REVISION_LOCATION];

    match info[DEVICE_PART_LOCATION] {
        0x00 if (0x07..=0x09).contains(&revision) => DeviceType::Sha204a,
        0x00 => DeviceType::Sha204,
        0x10 if (0x02..=0x06).contains(&revision) => DeviceType::Ecc108a,
        0x10 => DeviceType::Ecc108,
        0x50 => DeviceType::Ecc508a,
        0x60 if revision > 0x02 => DeviceType::Ecc608b,
        0x60 => DeviceType::Ecc608a,
        0x40 => DeviceType::Sha206a,
        PART_CODE_DETAILED => classify_device(info[DEVICE_IDENTIFIER_LOCATION], revision),
        _ => DeviceType::Unknown,
    }
}

/// Info revision bytes a device of the given type reports.
///
/// Returns `None` for types that are not identified through the Info
/// command (AES132, TA100 and Unknown).
pub fn revision_bytes(device_type: DeviceType) -> Option<[u8; 4]> {
    let bytes = match device_type {
        DeviceType::Sha204 => [0x00, 0x00, 0x00, 0x01],
        DeviceType::Sha204a => [0x00, 0x00, 0x00, 0x09],
        DeviceType::Ecc108 => [0x00, 0x00, 0x10, 0x01],
        DeviceType::Ecc108a => [0x00, 0x00, 0x10, 0x05],
        DeviceType::Ecc508a => [0x00, 0x00, 0x50, 0x00],
        DeviceType::Ecc608a => [0x00, 0x00, 0x60, 0x02],
        DeviceType::Ecc608b => [0x00, 0x00, 0x60, 0x03],
        DeviceType::Sha206a => [0x00, 0x00, 0x40, 0x00],
        DeviceType::Unknown | DeviceType::Aes132 | DeviceType::Aes132a | DeviceType::Ta100 => {
            return None
        }
        other => {
            let row = DEVICE_DETAILS.iter().find(|row| row.device_type == other)?;
            [0x00, row.identifier, PART_CODE_DETAILED, row.revision]
        }
    };
    Some(bytes)
}

/// Display name of a device type.
pub fn device_type_to_name(device_type: DeviceType) -> Option<&'static str> {
    DEVICE_NAMES
        .iter()
        .find(|(ty, _)| *ty == device_type)
        .map(|(_, name)| *name)
}

/// Check whether the device has an idle power state.
///
/// Devices without one must be put to sleep and woken instead.
pub fn supports_idle(device_type: DeviceType) -> bool {
    !matches!(
        device_type,
        DeviceType::Ecc204
            | DeviceType::Ta010
            | DeviceType::Sha104
            | DeviceType::Sha105
            | DeviceType::Sha106
            | DeviceType::Rng90
            | DeviceType::Ecc206
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_device_table_rows() {
        assert_eq!(classify_device(ECC206_DEVICE_ID, ECC_REV_NUM), DeviceType::Ecc206);
        assert_eq!(classify_device(RNG90_DEVICE_ID, SHA_REV_NUM), DeviceType::Rng90);
        assert_eq!(classify_device(SHA105_DEVICE_ID, SHA_REV_NUM), DeviceType::Sha105);
    }

    #[test]
    fn test_classify_device_zero_revision_is_ecc204() {
        assert_eq!(classify_device(0xFF, 0x00), DeviceType::Ecc204);
        assert_eq!(classify_device(SHA104_DEVICE_ID, 0x00), DeviceType::Ecc204);
    }

    #[test]
    fn test_classify_device_is_total() {
        for identifier in 0..=u8::MAX {
            for revision in 0..=u8::MAX {
                let ty = classify_device(identifier, revision);
                let expected_row = DEVICE_DETAILS
                    .iter()
                    .any(|row| row.identifier == identifier && row.revision == revision);
                if revision != 0 && !expected_row {
                    assert_eq!(ty, DeviceType::Unknown);
                }
            }
        }
    }

    #[test]
    fn test_classify_from_info_bytes_revision_ranges() {
        assert_eq!(classify_from_info_bytes([0, 0, 0x00, 0x06]), DeviceType::Sha204);
        assert_eq!(classify_from_info_bytes([0, 0, 0x00, 0x07]), DeviceType::Sha204a);
        assert_eq!(classify_from_info_bytes([0, 0, 0x00, 0x0A]), DeviceType::Sha204);
        assert_eq!(classify_from_info_bytes([0, 0, 0x10, 0x01]), DeviceType::Ecc108);
        assert_eq!(classify_from_info_bytes([0, 0, 0x10, 0x06]), DeviceType::Ecc108a);
        assert_eq!(classify_from_info_bytes([0, 0, 0x60, 0x02]), DeviceType::Ecc608a);
        assert_eq!(classify_from_info_bytes([0, 0, 0x60, 0x03]), DeviceType::Ecc608b);
        assert_eq!(classify_from_info_bytes([0, 0, 0x50, 0x77]), DeviceType::Ecc508a);
        assert_eq!(classify_from_info_bytes([0, 0, 0x40, 0x00]), DeviceType::Sha206a);
        assert_eq!(classify_from_info_bytes([0, 0, 0x33, 0x00]), DeviceType::Unknown);
    }

    #[test]
    fn test_classify_from_info_bytes_defers_to_identifier_table() {
        let info = [0x00, TA010_DEVICE_ID, 0x20, ECC_REV_NUM];
        assert_eq!(classify_from_info_bytes(info), DeviceType::Ta010);
        assert_eq!(classify_from_info_bytes([0x00, 0x11, 0x20, 0x05]), DeviceType::Unknown);
    }

    #[test]
    fn test_revision_bytes_classify_back() {
        for ty in DeviceType::ALL {
            if let Some(bytes) = revision_bytes(ty) {
                assert_eq!(classify_from_info_bytes(bytes), ty, "{:?}", ty);
            }
        }
        assert_eq!(revision_bytes(DeviceType::Ta100), None);
    }

    #[test]
    fn test_every_type_has_a_name() {
        for ty in DeviceType::ALL {
            assert!(device_type_to_name(ty).is_some());
        }
        assert_eq!(device_type_to_name(DeviceType::Unknown), None);
        assert_eq!(DeviceType::Ecc608b.to_string(), "ATECC608B");
    }

    #[test]
    fn test_supports_idle() {
        assert!(supports_idle(DeviceType::Ecc608b));
        assert!(supports_idle(DeviceType::Ta100));
        assert!(!supports_idle(DeviceType::Ecc204));
        assert!(!supports_idle(DeviceType::Rng90));
        assert!(!supports_idle(DeviceType::Sha106));
    }
}
