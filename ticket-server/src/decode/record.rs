//! Ticket record decoding.
//!
//! Turns the upstream `|`-delimited record strings into typed
//! [`TicketRecord`]s. Decoding is total per batch: malformed records are
//! skipped with a warning and never fail the surrounding query.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use super::flags::extract_service_flags;
use super::schema::{self, field};
use super::seats::{SeatOffer, extract_seats};

/// Telecode → station display name, supplied per query by the caller.
pub type StationMap = HashMap<String, String>;

/// Error while decoding a single raw record.
///
/// Never escapes a batch decode; [`decode_batch`] recovers by skipping the
/// offending record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Record splits into fewer fields than the well-formed minimum.
    #[error("record has {got} fields, expected at least {min}")]
    TooShort { got: usize, min: usize },
}

/// One train's decoded itinerary and availability.
///
/// Serializes directly to the public JSON shape; field names follow the
/// downstream API contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    /// Opaque internal train identifier.
    pub train_no: String,

    /// Public-facing train number, e.g. "G123". The leading character(s)
    /// determine the train category.
    pub train_code: String,

    /// Local departure time of day.
    pub departure_time: String,

    /// Local arrival time of day.
    pub arrival_time: String,

    /// Elapsed travel time.
    pub duration: String,

    /// Departure station display name (telecode when unresolved).
    pub from_station: String,

    /// Arrival station display name (telecode when unresolved).
    pub to_station: String,

    /// Departure station telecode.
    pub from_station_code: String,

    /// Arrival station telecode.
    pub to_station_code: String,

    /// Seat availability offers, in seat-class display order.
    pub seat_availability: Vec<SeatOffer>,

    /// Named service attributes, set semantics.
    pub service_flags: Vec<String>,
}

/// Decode a batch of raw record strings.
///
/// Malformed records are dropped without failing the batch; truncated rows
/// are routine upstream. Output preserves the input order of the survivors.
/// [`decode_batch_logged`] adds an aggregate drop count at the query
/// boundary.
pub fn decode_batch(raw_records: &[String], stations: &StationMap) -> Vec<TicketRecord> {
    let mut tickets = Vec::with_capacity(raw_records.len());

    for raw in raw_records {
        match decode_record(raw, stations) {
            Ok(ticket) => tickets.push(ticket),
            Err(DecodeError::TooShort { .. }) => {}
        }
    }

    tickets
}

/// Decode a single raw record string.
pub fn decode_record(raw: &str, stations: &StationMap) -> Result<TicketRecord, DecodeError> {
    let fields: Vec<&str> = raw.split(schema::FIELD_DELIMITER).collect();

    if fields.len() < schema::MIN_FIELDS {
        return Err(DecodeError::TooShort {
            got: fields.len(),
            min: schema::MIN_FIELDS,
        });
    }

    let from_code = fields[field::FROM_STATION_CODE];
    let to_code = fields[field::TO_STATION_CODE];

    // Index 46 postdates the 30-field minimum; treat absence as "no flags".
    let raw_flags = fields.get(field::SERVICE_FLAGS).copied().unwrap_or("");

    Ok(TicketRecord {
        train_no: fields[field::TRAIN_NO].to_string(),
        train_code: fields[field::TRAIN_CODE].to_string(),
        departure_time: fields[field::DEPARTURE_TIME].to_string(),
        arrival_time: fields[field::ARRIVAL_TIME].to_string(),
        duration: fields[field::DURATION].to_string(),
        from_station: station_name(stations, from_code),
        to_station: station_name(stations, to_code),
        from_station_code: from_code.to_string(),
        to_station_code: to_code.to_string(),
        seat_availability: extract_seats(&fields),
        service_flags: extract_service_flags(raw_flags),
    })
}

/// Resolve a telecode to its display name, falling back to the telecode.
fn station_name(stations: &StationMap, telecode: &str) -> String {
    stations
        .get(telecode)
        .cloned()
        .unwrap_or_else(|| telecode.to_string())
}

/// Log-and-count wrapper used at the query boundary.
///
/// Same as [`decode_batch`] but reports how many records were dropped, so
/// the caller's log line can surface silent skips.
pub fn decode_batch_logged(raw_records: &[String], stations: &StationMap) -> Vec<TicketRecord> {
    let tickets = decode_batch(raw_records, stations);
    let dropped = raw_records.len() - tickets.len();
    if dropped > 0 {
        warn!(dropped, total = raw_records.len(), "skipped malformed ticket records");
    }
    tickets
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a raw record with 47 `|`-separated fields, applying overrides
    /// at the given indices.
    fn raw_record(overrides: &[(usize, &str)]) -> String {
        let mut fields = vec![String::new(); 47];
        fields[2] = "240000G10101".to_string();
        fields[3] = "G101".to_string();
        fields[6] = "VNP".to_string();
        fields[7] = "AOH".to_string();
        fields[8] = "08:00".to_string();
        fields[9] = "12:38".to_string();
        fields[10] = "04:38".to_string();
        for (index, value) in overrides {
            fields[*index] = (*value).to_string();
        }
        fields.join("|")
    }

    fn stations() -> StationMap {
        StationMap::from([
            ("VNP".to_string(), "北京南".to_string()),
            ("AOH".to_string(), "上海虹桥".to_string()),
        ])
    }

    #[test]
    fn decodes_named_fields() {
        let ticket = decode_record(&raw_record(&[]), &stations()).unwrap();

        assert_eq!(ticket.train_no, "240000G10101");
        assert_eq!(ticket.train_code, "G101");
        assert_eq!(ticket.departure_time, "08:00");
        assert_eq!(ticket.arrival_time, "12:38");
        assert_eq!(ticket.duration, "04:38");
        assert_eq!(ticket.from_station, "北京南");
        assert_eq!(ticket.to_station, "上海虹桥");
        assert_eq!(ticket.from_station_code, "VNP");
        assert_eq!(ticket.to_station_code, "AOH");
    }

    #[test]
    fn unresolved_telecode_falls_back_to_code() {
        let ticket = decode_record(&raw_record(&[]), &StationMap::new()).unwrap();

        assert_eq!(ticket.from_station, "VNP");
        assert_eq!(ticket.to_station, "AOH");
    }

    #[test]
    fn short_record_is_rejected() {
        let raw = "a|b|c|d";
        let err = decode_record(raw, &StationMap::new()).unwrap_err();
        assert_eq!(err, DecodeError::TooShort { got: 4, min: 30 });
    }

    #[test]
    fn exactly_thirty_fields_is_wellformed() {
        let raw = vec![""; 30].join("|");
        assert!(decode_record(&raw, &StationMap::new()).is_ok());
    }

    #[test]
    fn missing_flag_field_means_no_flags() {
        // 31 fields: index 46 does not exist.
        let raw = vec![""; 31].join("|");
        let ticket = decode_record(&raw, &StationMap::new()).unwrap();
        assert!(ticket.service_flags.is_empty());
    }

    #[test]
    fn batch_skips_short_records_without_failing() {
        let raws = vec![
            raw_record(&[]),
            "too|short".to_string(),
            raw_record(&[(3, "D202")]),
        ];

        let tickets = decode_batch(&raws, &stations());
        let codes: Vec<_> = tickets.iter().map(|t| t.train_code.as_str()).collect();
        assert_eq!(codes, vec!["G101", "D202"]);
    }

    #[test]
    fn batch_preserves_input_order() {
        let raws: Vec<String> = ["K511", "G1", "Z98", "1462"]
            .iter()
            .map(|code| raw_record(&[(3, code)]))
            .collect();

        let tickets = decode_batch(&raws, &stations());
        let codes: Vec<_> = tickets.iter().map(|t| t.train_code.as_str()).collect();
        assert_eq!(codes, vec!["K511", "G1", "Z98", "1462"]);
    }

    #[test]
    fn empty_batch_decodes_to_empty() {
        assert!(decode_batch(&[], &StationMap::new()).is_empty());
    }

    #[test]
    fn end_to_end_record_with_seats_and_flags() {
        let raw = raw_record(&[(3, "G123"), (30, "3"), (46, "智能动车组")]);
        let tickets = decode_batch(&[raw], &stations());

        assert_eq!(tickets.len(), 1);
        let ticket = &tickets[0];
        assert_eq!(ticket.train_code, "G123");
        assert_eq!(ticket.from_station, "北京南");

        let second = ticket
            .seat_availability
            .iter()
            .find(|o| o.seat_type_code == "O")
            .expect("second-class offer");
        assert_eq!(second.availability, "3");

        assert_eq!(ticket.service_flags, vec!["智能动车组"]);

        // The smart-EMU selector keeps the record; the Fuxing one drops it.
        use crate::decode::filter_by_category;
        assert_eq!(filter_by_category(&tickets, "S").len(), 1);
        assert!(filter_by_category(&tickets, "F").is_empty());
    }

    #[test]
    fn serializes_with_public_field_names() {
        let raw = raw_record(&[(30, "有"), (46, "复兴号")]);
        let ticket = decode_record(&raw, &stations()).unwrap();

        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["trainCode"], "G101");
        assert_eq!(json["fromStation"], "北京南");
        assert_eq!(json["toStationCode"], "AOH");
        assert_eq!(json["departureTime"], "08:00");
        assert_eq!(json["seatAvailability"][0]["seatName"], "二等座");
        assert_eq!(json["seatAvailability"][0]["price"], serde_json::Value::Null);
        assert_eq!(json["serviceFlags"][0], "复兴号");
    }
}
