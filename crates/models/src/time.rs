//! Lenient serde helpers for the date/time shapes the backend and HTML inputs produce.
//!
//! The backend emits `2024-05-01T09:00:00` (sometimes with an offset), `<input type="datetime-local">`
//! posts `2024-05-01T09:00`, and time pickers post `09:00`. Everything is normalized to
//! naive wall-clock values and written back with seconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_OUT: &str = "%Y-%m-%dT%H:%M:%S";
const TIME_OUT: &str = "%H:%M:%S";

pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

macro_rules! lenient_serde {
    ($name:ident, $ty:ty, $parse:path, $fmt:expr, $what:literal) => {
        pub mod $name {
            use serde::{de::Error, Deserialize, Deserializer, Serializer};

            pub fn serialize<S: Serializer>(v: &$ty, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(&v.format($fmt).to_string())
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<$ty, D::Error> {
                let raw = String::deserialize(d)?;
                $parse(&raw).ok_or_else(|| D::Error::custom(format!(concat!("invalid ", $what, ": {}"), raw)))
            }

            pub mod option {
                use super::*;

                pub fn serialize<S: Serializer>(v: &Option<$ty>, s: S) -> Result<S::Ok, S::Error> {
                    match v {
                        Some(v) => super::serialize(v, s),
                        None => s.serialize_none(),
                    }
                }

                /// Missing, `null` and `""` all mean "not chosen yet".
                pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<$ty>, D::Error> {
                    let raw: Option<String> = Option::deserialize(d)?;
                    match raw.as_deref().map(str::trim) {
                        None | Some("") => Ok(None),
                        Some(s) => $parse(s)
                            .map(Some)
                            .ok_or_else(|| D::Error::custom(format!(concat!("invalid ", $what, ": {}"), s))),
                    }
                }
            }
        }
    };
}

lenient_serde!(clock, chrono::NaiveTime, crate::time::parse_time, crate::time::TIME_OUT, "time");
lenient_serde!(datetime, chrono::NaiveDateTime, crate::time::parse_datetime, crate::time::DATETIME_OUT, "datetime");
lenient_serde!(date, chrono::NaiveDate, crate::time::parse_date, "%Y-%m-%d", "date");

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Slot {
        #[serde(with = "clock")]
        at: NaiveTime,
        #[serde(default, with = "datetime::option")]
        from: Option<NaiveDateTime>,
    }

    #[test]
    fn accepts_short_time_and_writes_seconds() {
        let s: Slot = serde_json::from_str(r#"{"at":"08:30"}"#).unwrap();
        assert_eq!(s.at, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert!(s.from.is_none());
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["at"], "08:30:00");
    }

    #[test]
    fn empty_string_is_none() {
        let s: Slot = serde_json::from_str(r#"{"at":"08:30:00","from":""}"#).unwrap();
        assert!(s.from.is_none());
    }

    #[test]
    fn datetime_shapes() {
        let expect = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(parse_datetime("2024-05-01T09:00:00"), Some(expect));
        assert_eq!(parse_datetime("2024-05-01T09:00"), Some(expect));
        assert_eq!(parse_datetime("2024-05-01T09:00:00+07:00"), Some(expect));
        assert_eq!(parse_datetime("2024-05-01T09:00:00.000Z"), Some(expect));
        assert_eq!(
            parse_datetime("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert!(parse_datetime("tomorrow").is_none());
    }

    #[test]
    fn date_from_datetime() {
        assert_eq!(parse_date("2024-05-01T10:00:00"), NaiveDate::from_ymd_opt(2024, 5, 1));
    }
}
