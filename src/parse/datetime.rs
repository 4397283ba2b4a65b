//! Date and time productions.

use std::str::from_utf8;

use abnf_core::streaming::{dquote, sp};
use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case, take_while_m_n},
    combinator::{map, value},
    sequence::{delimited, tuple},
};

use crate::decode::{IMAPErrorKind, IMAPParseError, IMAPResult};

/// ```abnf
/// date-time = DQUOTE
///              date-day-fixed "-" date-month "-" date-year SP
///              time SP
///              zone
///             DQUOTE
/// ```
///
/// The shape of `INTERNALDATE` values. An impossible calendar date is
/// fatal; the bytes matched the production, so no alternative applies.
pub fn date_time(input: &[u8]) -> IMAPResult<&[u8], DateTime<FixedOffset>> {
    let mut parser = delimited(
        dquote,
        tuple((
            date_day_fixed,
            tag(b"-"),
            date_month,
            tag(b"-"),
            date_year,
            sp,
            time,
            sp,
            zone,
        )),
        dquote,
    );

    let (remaining, (day, _, month, _, year, _, time, _, zone)) = parser(input)?;

    let date = NaiveDate::from_ymd_opt(year.into(), month.into(), day.into());

    match (date, time, zone) {
        (Some(date), Some(time), Some(zone)) => {
            let local = NaiveDateTime::new(date, time);

            if let LocalResult::Single(datetime) = zone.from_local_datetime(&local) {
                Ok((remaining, datetime))
            } else {
                Err(nom::Err::Failure(IMAPParseError {
                    input,
                    kind: IMAPErrorKind::BadDateTime,
                }))
            }
        }
        _ => Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::BadDateTime,
        })),
    }
}

/// `date-day-fixed = (SP DIGIT) / 2DIGIT`
///
/// Fixed-format version of `date-day`.
fn date_day_fixed(input: &[u8]) -> IMAPResult<&[u8], u16> {
    alt((
        map(tuple((sp, digit_n::<1>)), |(_, day)| day),
        digit_n::<2>,
    ))(input)
}

/// `date-month = "Jan" / "Feb" / "Mar" / "Apr" / "May" / "Jun" /
///               "Jul" / "Aug" / "Sep" / "Oct" / "Nov" / "Dec"`
fn date_month(input: &[u8]) -> IMAPResult<&[u8], u16> {
    alt((
        value(1, tag_no_case(b"Jan")),
        value(2, tag_no_case(b"Feb")),
        value(3, tag_no_case(b"Mar")),
        value(4, tag_no_case(b"Apr")),
        value(5, tag_no_case(b"May")),
        value(6, tag_no_case(b"Jun")),
        value(7, tag_no_case(b"Jul")),
        value(8, tag_no_case(b"Aug")),
        value(9, tag_no_case(b"Sep")),
        value(10, tag_no_case(b"Oct")),
        value(11, tag_no_case(b"Nov")),
        value(12, tag_no_case(b"Dec")),
    ))(input)
}

/// `date-year = 4DIGIT`
fn date_year(input: &[u8]) -> IMAPResult<&[u8], u16> {
    digit_n::<4>(input)
}

/// `time = 2DIGIT ":" 2DIGIT ":" 2DIGIT`
fn time(input: &[u8]) -> IMAPResult<&[u8], Option<NaiveTime>> {
    let mut parser = tuple((
        digit_n::<2>,
        tag(b":"),
        digit_n::<2>,
        tag(b":"),
        digit_n::<2>,
    ));

    let (remaining, (h, _, m, _, s)) = parser(input)?;

    Ok((
        remaining,
        NaiveTime::from_hms_opt(h.into(), m.into(), s.into()),
    ))
}

/// `zone = ("+" / "-") 4DIGIT`
fn zone(input: &[u8]) -> IMAPResult<&[u8], Option<FixedOffset>> {
    let mut parser = tuple((
        alt((value(1i32, tag(b"+")), value(-1i32, tag(b"-")))),
        digit_n::<2>,
        digit_n::<2>,
    ));

    let (remaining, (sign, hours, minutes)) = parser(input)?;

    let seconds = sign * (i32::from(hours) * 3600 + i32::from(minutes) * 60);

    Ok((remaining, FixedOffset::east_opt(seconds)))
}

/// An RFC 3339 timestamp, the `;EXPIRE=` form of authorised URLs,
/// e.g. `2026-08-01T12:00:00Z` or with a numeric offset.
pub fn timestamp(input: &[u8]) -> IMAPResult<&[u8], DateTime<FixedOffset>> {
    let mut parser = tuple((
        digit_n::<4>,
        tag(b"-"),
        digit_n::<2>,
        tag(b"-"),
        digit_n::<2>,
        tag_no_case(b"T"),
        digit_n::<2>,
        tag(b":"),
        digit_n::<2>,
        tag(b":"),
        digit_n::<2>,
        timestamp_offset,
    ));

    let (remaining, (year, _, month, _, day, _, hour, _, minute, _, second, offset)) =
        parser(input)?;

    let date = NaiveDate::from_ymd_opt(i32::from(year), month.into(), day.into());
    let time = NaiveTime::from_hms_opt(hour.into(), minute.into(), second.into());

    match (date, time, offset) {
        (Some(date), Some(time), Some(offset)) => {
            let local = NaiveDateTime::new(date, time);

            if let LocalResult::Single(datetime) = offset.from_local_datetime(&local) {
                Ok((remaining, datetime))
            } else {
                Err(nom::Err::Failure(IMAPParseError {
                    input,
                    kind: IMAPErrorKind::BadDateTime,
                }))
            }
        }
        _ => Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::BadDateTime,
        })),
    }
}

/// `time-offset = "Z" / (("+" / "-") 2DIGIT ":" 2DIGIT)`
fn timestamp_offset(input: &[u8]) -> IMAPResult<&[u8], Option<FixedOffset>> {
    alt((
        value(FixedOffset::east_opt(0), tag_no_case(b"Z")),
        map(
            tuple((
                alt((value(1i32, tag(b"+")), value(-1i32, tag(b"-")))),
                digit_n::<2>,
                tag(b":"),
                digit_n::<2>,
            )),
            |(sign, hours, _, minutes)| {
                FixedOffset::east_opt(sign * (i32::from(hours) * 3600 + i32::from(minutes) * 60))
            },
        ),
    ))(input)
}

/// Exactly `N` digits.
fn digit_n<const N: usize>(input: &[u8]) -> IMAPResult<&[u8], u16> {
    let (remaining, bytes) = take_while_m_n(N, N, |b: u8| b.is_ascii_digit())(input)?;

    // Safety: ASCII digits always parse; four digits fit u16.
    Ok((remaining, from_utf8(bytes).unwrap().parse().unwrap()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time() {
        let (rem, val) = date_time(b"\"01-Jul-2003 10:52:37 +0200\"x").unwrap();
        assert_eq!(rem, b"x");
        assert_eq!(val.to_rfc3339(), "2003-07-01T10:52:37+02:00");

        // Single-digit day with the leading-space form.
        let (_, val) = date_time(b"\" 1-Jul-2003 10:52:37 -0330\"").unwrap();
        assert_eq!(val.to_rfc3339(), "2003-07-01T10:52:37-03:30");

        // Feb 30 matches the production but is impossible.
        assert!(matches!(
            date_time(b"\"30-Feb-2003 10:52:37 +0000\""),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::BadDateTime,
                ..
            }))
        ));

        assert!(matches!(
            date_time(b"\"01-Jul-2003 10:5"),
            Err(nom::Err::Incomplete(_))
        ));
    }

    #[test]
    fn test_timestamp() {
        let (_, val) = timestamp(b"2026-08-01T12:00:00Z;").unwrap();
        assert_eq!(val.to_rfc3339(), "2026-08-01T12:00:00+00:00");

        let (_, val) = timestamp(b"2026-08-01T12:00:00+05:30;").unwrap();
        assert_eq!(val.to_rfc3339(), "2026-08-01T12:00:00+05:30");

        assert!(timestamp(b"2026-13-01T12:00:00Z;").is_err());
    }
}
