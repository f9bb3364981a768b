//! Minimal dBASE III attribute table writer used by the Shapefile exporter.
//!
//! Only character (`C`) columns are supported. Values are stored as UTF-8
//! and announced through a `.cpg` sidecar.

use chrono::{Datelike, NaiveDate};

const VERSION: u8 = 0x03;
const HEADER_LEN: usize = 32;
const FIELD_DESCRIPTOR_LEN: usize = 32;
const HEADER_TERMINATOR: u8 = 0x0D;
const END_OF_FILE: u8 = 0x1A;
const RECORD_ACTIVE: u8 = b' ';
/// Field names are stored in 11 bytes, NUL padded
const FIELD_NAME_LEN: usize = 11;

/// Character column definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbfField {
    pub name: &'static str,
    pub length: u8,
}

/// Cut `value` to at most `max_bytes` bytes without splitting a character
pub fn truncate_utf8(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = max_bytes;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Bytes of one record: deletion flag followed by space padded columns
fn encode_record(fields: &[DbfField], values: &[&str], out: &mut Vec<u8>) {
    out.push(RECORD_ACTIVE);
    for (index, field) in fields.iter().enumerate() {
        let width = field.length as usize;
        let value = truncate_utf8(values.get(index).copied().unwrap_or(""), width);
        out.extend_from_slice(value.as_bytes());
        out.extend(std::iter::repeat_n(b' ', width - value.len()));
    }
}

/// Encode a complete `.dbf` file
pub fn encode(fields: &[DbfField], records: &[Vec<&str>], date: NaiveDate) -> Vec<u8> {
    let header_len = HEADER_LEN + FIELD_DESCRIPTOR_LEN * fields.len() + 1;
    let record_len = 1 + fields.iter().map(|f| f.length as usize).sum::<usize>();
    let mut out = Vec::with_capacity(header_len + record_len * records.len() + 1);

    out.push(VERSION);
    out.push((date.year() - 1900).clamp(0, 255) as u8);
    out.push(date.month() as u8);
    out.push(date.day() as u8);
    out.extend_from_slice(&(records.len() as u32).to_le_bytes());
    out.extend_from_slice(&(header_len as u16).to_le_bytes());
    out.extend_from_slice(&(record_len as u16).to_le_bytes());
    out.extend_from_slice(&[0u8; 20]);

    for field in fields {
        let mut name = [0u8; FIELD_NAME_LEN];
        let bytes = field.name.as_bytes();
        let len = bytes.len().min(FIELD_NAME_LEN - 1);
        name[..len].copy_from_slice(&bytes[..len]);
        out.extend_from_slice(&name);
        out.push(b'C');
        out.extend_from_slice(&[0u8; 4]);
        out.push(field.length);
        out.push(0);
        out.extend_from_slice(&[0u8; 14]);
    }
    out.push(HEADER_TERMINATOR);

    for values in records {
        encode_record(fields, values, &mut out);
    }
    out.push(END_OF_FILE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [DbfField; 2] = [
        DbfField { name: "name", length: 4 },
        DbfField { name: "poiid", length: 3 },
    ];

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode(&FIELDS, &[vec!["ab", "X1"]], date());
        assert_eq!(bytes[0], 0x03);
        assert_eq!(&bytes[1..4], &[124, 5, 17]);
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[8..10].try_into().unwrap()), 32 + 64 + 1);
        assert_eq!(u16::from_le_bytes(bytes[10..12].try_into().unwrap()), 1 + 4 + 3);
        assert_eq!(&bytes[32..36], b"name");
        assert_eq!(bytes[32 + 11], b'C');
        assert_eq!(bytes[32 + 16], 4);
        assert_eq!(bytes[96], 0x0D);
    }

    #[test]
    fn test_records_are_padded() {
        let bytes = encode(&FIELDS, &[vec!["ab", "X1"]], date());
        assert_eq!(&bytes[97..105], b" ab  X1 ");
        assert_eq!(*bytes.last().unwrap(), 0x1A);
        assert_eq!(bytes.len(), 97 + 8 + 1);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_utf8("hello", 3), "hel");
        assert_eq!(truncate_utf8("公园", 4), "公");
        assert_eq!(truncate_utf8("公园", 6), "公园");
        assert_eq!(truncate_utf8("", 2), "");
    }
}
