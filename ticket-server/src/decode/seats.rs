//! Seat availability extraction.

use serde::Serialize;

use super::schema::{self, SeatClass};

/// One seat class's availability on a decoded ticket record.
///
/// `availability` is the raw upstream value: a numeric count, the token
/// `有` ("plentiful"), or a booking-state word. Classes with no value are
/// not emitted at all; absence means "not offered on this train", not zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatOffer {
    /// Display name of the seat class.
    pub seat_name: &'static str,

    /// Short code used by the upstream booking flow.
    pub short_code: &'static str,

    /// Single-character seat type code.
    pub seat_type_code: &'static str,

    /// Raw availability value.
    pub availability: String,

    /// Ticket price. Not decoded by this pipeline; always `null`.
    pub price: Option<String>,

    /// Discount rate. Not decoded by this pipeline; always `null`.
    pub discount: Option<String>,
}

/// Extract seat availability offers from a split record.
///
/// Walks the fixed seat-class table in display order and emits an offer for
/// every class whose field is present, non-empty, and not the `无` sentinel.
pub fn extract_seats(fields: &[&str]) -> Vec<SeatOffer> {
    schema::SEAT_CLASSES
        .iter()
        .filter_map(|class| offer_for(class, fields))
        .collect()
}

fn offer_for(class: &SeatClass, fields: &[&str]) -> Option<SeatOffer> {
    let value = fields.get(class.index).copied().unwrap_or("");
    if value.is_empty() || value == schema::NO_SEATS {
        return None;
    }

    Some(SeatOffer {
        seat_name: class.name,
        short_code: class.short_code,
        seat_type_code: class.type_code,
        availability: value.to_string(),
        price: None,
        discount: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A field array long enough to reach every seat index, all empty.
    fn empty_fields() -> Vec<&'static str> {
        vec![""; 40]
    }

    #[test]
    fn empty_fields_yield_no_offers() {
        assert!(extract_seats(&empty_fields()).is_empty());
    }

    #[test]
    fn second_class_count_emitted() {
        let mut fields = empty_fields();
        fields[30] = "3";

        let offers = extract_seats(&fields);
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].seat_name, "二等座");
        assert_eq!(offers[0].seat_type_code, "O");
        assert_eq!(offers[0].availability, "3");
        assert_eq!(offers[0].price, None);
        assert_eq!(offers[0].discount, None);
    }

    #[test]
    fn no_seats_sentinel_is_omitted() {
        let mut fields = empty_fields();
        fields[30] = "无";

        assert!(extract_seats(&fields).is_empty());
    }

    #[test]
    fn plentiful_token_passes_through_raw() {
        let mut fields = empty_fields();
        fields[32] = "有";

        let offers = extract_seats(&fields);
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].seat_name, "商务座");
        assert_eq!(offers[0].availability, "有");
    }

    #[test]
    fn offers_follow_table_order_not_field_order() {
        let mut fields = empty_fields();
        // Hard seat sits at a lower index than second class, but second
        // class comes first in the display table.
        fields[29] = "12";
        fields[30] = "5";

        let offers = extract_seats(&fields);
        let names: Vec<_> = offers.iter().map(|o| o.seat_name).collect();
        assert_eq!(names, vec!["二等座", "硬座"]);
    }

    #[test]
    fn short_record_misses_high_indices() {
        // Only 25 fields: business (32), first (31), second (30) etc. are
        // out of range; soft sleeper (23) and soft seat (24) are reachable.
        let mut fields = vec![""; 25];
        fields[23] = "8";
        fields[24] = "有";

        let offers = extract_seats(&fields);
        let names: Vec<_> = offers.iter().map(|o| o.seat_name).collect();
        assert_eq!(names, vec!["软卧", "软座"]);
    }

    #[test]
    fn all_classes_emitted_when_populated() {
        let mut fields = empty_fields();
        for class in schema::SEAT_CLASSES {
            fields[class.index] = "1";
        }

        let offers = extract_seats(&fields);
        assert_eq!(offers.len(), schema::SEAT_CLASSES.len());
    }
}
