//! Calendar date parsing for `date` fields.
//!
//! Only the ISO `YYYY-MM-DD` form is accepted. No timezone handling.

/// A validated calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    /// Parse and validate a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }

        let date = Self {
            year: parse_u16(&bytes[0..4])?,
            month: parse_u8(&bytes[5..7])?,
            day: parse_u8(&bytes[8..10])?,
        };
        date.is_valid().then_some(date)
    }

    fn is_valid(self) -> bool {
        (1..=12).contains(&self.month)
            && self.day != 0
            && self.day <= Self::days_in_month(self.year, self.month)
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let date = CalendarDate::parse("2024-06-15").unwrap();
        assert_eq!((date.year, date.month, date.day), (2024, 6, 15));
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!(CalendarDate::parse("2024-6-15").is_none());
        assert!(CalendarDate::parse("2024/06/15").is_none());
        assert!(CalendarDate::parse("2024-06-15T00:00:00Z").is_none());
        assert!(CalendarDate::parse("").is_none());
    }

    #[test]
    fn test_parse_rejects_invalid_days() {
        assert!(CalendarDate::parse("2024-13-01").is_none());
        assert!(CalendarDate::parse("2024-04-31").is_none());
        assert!(CalendarDate::parse("2024-06-00").is_none());
    }

    #[test]
    fn test_leap_years() {
        assert!(CalendarDate::parse("2024-02-29").is_some());
        assert!(CalendarDate::parse("2000-02-29").is_some()); // divisible by 400
        assert!(CalendarDate::parse("2023-02-29").is_none());
        assert!(CalendarDate::parse("1900-02-29").is_none()); // divisible by 100 but not 400
    }
}
