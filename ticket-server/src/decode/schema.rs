//! Positional schema for the upstream left-ticket record format.
//!
//! The upstream API returns each train as a single `|`-delimited string with
//! no field names. The indices below are a version-coupled contract with that
//! format; when the upstream schema drifts, this table is the only place that
//! changes.

/// Delimiter between fields in a raw record.
pub const FIELD_DELIMITER: char = '|';

/// Delimiter between tokens in the raw service-flag field.
pub const FLAG_DELIMITER: char = '#';

/// Minimum field count for a record to be considered well-formed.
pub const MIN_FIELDS: usize = 30;

/// Availability sentinel meaning "no seats / not offered".
pub const NO_SEATS: &str = "无";

/// Field positions of the named record attributes.
pub mod field {
    /// Opaque internal train identifier.
    pub const TRAIN_NO: usize = 2;
    /// Public-facing train number, e.g. "G123".
    pub const TRAIN_CODE: usize = 3;
    /// Departure station telecode.
    pub const FROM_STATION_CODE: usize = 6;
    /// Arrival station telecode.
    pub const TO_STATION_CODE: usize = 7;
    /// Local departure time of day, "HH:MM".
    pub const DEPARTURE_TIME: usize = 8;
    /// Local arrival time of day, "HH:MM".
    pub const ARRIVAL_TIME: usize = 9;
    /// Elapsed travel time, "HH:MM".
    pub const DURATION: usize = 10;
    /// `#`-delimited service-flag string. Absent on older records.
    pub const SERVICE_FLAGS: usize = 46;
}

/// One seat class in the availability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatClass {
    /// Field index carrying this class's availability.
    pub index: usize,
    /// Display name.
    pub name: &'static str,
    /// Short code used by the upstream booking flow.
    pub short_code: &'static str,
    /// Single-character seat type code.
    pub type_code: &'static str,
}

/// Seat classes in display order (premium classes first).
///
/// The order here determines the order of offers in a decoded record, not
/// the upstream field order.
pub const SEAT_CLASSES: &[SeatClass] = &[
    SeatClass { index: 32, name: "商务座", short_code: "swz", type_code: "9" },
    SeatClass { index: 31, name: "一等座", short_code: "zy", type_code: "M" },
    SeatClass { index: 30, name: "二等座", short_code: "ze", type_code: "O" },
    SeatClass { index: 21, name: "高级软卧", short_code: "gr", type_code: "6" },
    SeatClass { index: 23, name: "软卧", short_code: "rw", type_code: "4" },
    SeatClass { index: 33, name: "动卧", short_code: "srrb", type_code: "F" },
    SeatClass { index: 28, name: "硬卧", short_code: "yw", type_code: "3" },
    SeatClass { index: 24, name: "软座", short_code: "rz", type_code: "2" },
    SeatClass { index: 29, name: "硬座", short_code: "yz", type_code: "1" },
    SeatClass { index: 26, name: "无座", short_code: "wz", type_code: "W" },
];

/// Named service attributes recognized in the raw flag string.
pub const SERVICE_FLAGS: &[&str] = &[
    "智能动车组",
    "复兴号",
    "静音车厢",
    "温馨动卧",
    "动感号",
    "支持选铺",
    "老年优惠",
];

/// Smart EMU flag, referenced by the `S` category selector.
pub const FLAG_SMART_EMU: &str = "智能动车组";

/// Fuxing-class flag, referenced by the `F` category selector.
pub const FLAG_FUXING: &str = "复兴号";

/// Train-code prefixes per category selector.
///
/// The `O` ("other") selector is not listed: it is derived as "matches none
/// of these prefixes", so the two stay in sync by construction.
pub const CATEGORY_PREFIXES: &[(char, &[&str])] = &[
    ('G', &["G", "C"]),
    ('D', &["D"]),
    ('Z', &["Z"]),
    ('T', &["T"]),
    ('K', &["K"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_table_covers_ten_classes() {
        assert_eq!(SEAT_CLASSES.len(), 10);
    }

    #[test]
    fn seat_indices_within_wellformed_range() {
        // Every availability field sits past the named attributes but may
        // exceed MIN_FIELDS; the extractor treats missing fields as absent.
        for class in SEAT_CLASSES {
            assert!(class.index > field::DURATION, "{}", class.name);
        }
    }

    #[test]
    fn seat_type_codes_are_unique() {
        for (i, a) in SEAT_CLASSES.iter().enumerate() {
            for b in &SEAT_CLASSES[i + 1..] {
                assert_ne!(a.type_code, b.type_code);
            }
        }
    }

    #[test]
    fn selector_flags_are_in_vocabulary() {
        assert!(SERVICE_FLAGS.contains(&FLAG_SMART_EMU));
        assert!(SERVICE_FLAGS.contains(&FLAG_FUXING));
    }

    #[test]
    fn category_selectors_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for (selector, _) in CATEGORY_PREFIXES {
            assert!(seen.insert(*selector));
        }
    }
}
