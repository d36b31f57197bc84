//! Parses the loose RFC-822-ish timestamps found in PO headers
//! (`POT-Creation-Date`, `PO-Revision-Date`) into a UTC instant so two
//! timestamps can be compared for recency.
//!
//! Invalid or placeholder strings (`YEAR-MO-DA HO:MI+ZONE`, empty) parse
//! to the Unix epoch, so any real timestamp always wins over a template
//! placeholder.

use std::sync::LazyLock;

use chrono::{FixedOffset, NaiveDate, TimeZone};
use regex::Regex;

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (\d{4})-(\d{1,2})-(\d{1,2})\s+
        (\d{1,2}):(\d{1,2})(?::\d{1,2})?\s*
        ([+-])(\d{2})(\d{2})
        ",
    )
    .expect("static timestamp pattern is valid")
});

/// Parses a header timestamp into seconds since the Unix epoch (UTC).
/// Returns `0` when the string doesn't match the expected shape.
pub(crate) fn parse_timestamp(text: &str) -> i64 {
    let Some(caps) = TIMESTAMP.captures(text) else {
        return 0;
    };

    let year: i32 = match caps[1].parse() {
        Ok(v) => v,
        Err(_) => return 0,
    };
    let month: u32 = match caps[2].parse() {
        Ok(v) => v,
        Err(_) => return 0,
    };
    let day: u32 = match caps[3].parse() {
        Ok(v) => v,
        Err(_) => return 0,
    };
    let hour: u32 = match caps[4].parse() {
        Ok(v) => v,
        Err(_) => return 0,
    };
    let minute: u32 = match caps[5].parse() {
        Ok(v) => v,
        Err(_) => return 0,
    };
    let sign = if &caps[6] == "-" { -1i32 } else { 1i32 };
    let offset_hours: i32 = match caps[7].parse() {
        Ok(v) => v,
        Err(_) => return 0,
    };
    let offset_minutes: i32 = match caps[8].parse() {
        Ok(v) => v,
        Err(_) => return 0,
    };

    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        return 0;
    };
    let Some(naive) = date.and_hms_opt(hour, minute, 0) else {
        return 0;
    };

    // A naive hours-only multiply drops the offset's minutes component;
    // compute sign * (HH*3600 + MM*60) instead.
    let offset_seconds = sign * (offset_hours * 3600 + offset_minutes * 60);
    let Some(offset) = FixedOffset::east_opt(offset_seconds) else {
        return 0;
    };

    match offset.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt.timestamp(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.timestamp(),
        chrono::LocalResult::None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_timestamp() {
        // 2013-12-11 11:30+0100 is 2013-12-11T10:30:00Z.
        let t = parse_timestamp("2013-12-11 11:30+0100");
        let expected = chrono::Utc
            .with_ymd_and_hms(2013, 12, 11, 10, 30, 0)
            .unwrap()
            .timestamp();
        assert_eq!(t, expected);
    }

    #[test]
    fn placeholder_parses_to_epoch() {
        assert_eq!(parse_timestamp("YEAR-MO-DA HO:MI+ZONE"), 0);
    }

    #[test]
    fn empty_parses_to_epoch() {
        assert_eq!(parse_timestamp(""), 0);
    }

    #[test]
    fn negative_offset_is_applied_with_correct_sign() {
        // 2013-12-11 05:00-0530 is 2013-12-11T10:30:00Z, same instant as
        // the +0100 case above: a naive hours-only multiply would not
        // reproduce this.
        let t = parse_timestamp("2013-12-11 05:00-0530");
        let expected = chrono::Utc
            .with_ymd_and_hms(2013, 12, 11, 10, 30, 0)
            .unwrap()
            .timestamp();
        assert_eq!(t, expected);
    }

    #[test]
    fn later_timestamp_compares_greater() {
        let earlier = parse_timestamp("2013-12-11 11:30+0100");
        let later = parse_timestamp("2013-12-11 11:40+0100");
        assert!(later > earlier);
    }
}
