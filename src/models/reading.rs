use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One station-hour observation.
///
/// Every measurement is optional: a missing cell in the source data stays
/// absent rather than collapsing to zero. The timestamp is derived from the
/// calendar fields when all four are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reading {
    pub station: String,

    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub timestamp: Option<NaiveDateTime>,

    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub so2: Option<f64>,
    pub no2: Option<f64>,
    pub co: Option<f64>,
    pub o3: Option<f64>,
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub dew_point: Option<f64>,
    pub rain: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl Reading {
    /// Fill `timestamp` from the calendar fields.
    ///
    /// Requires all of year/month/day/hour; an out-of-range calendar tuple
    /// (e.g. month 13) leaves the timestamp unset.
    pub fn derive_timestamp(&mut self) {
        if let (Some(year), Some(month), Some(day), Some(hour)) =
            (self.year, self.month, self.day, self.hour)
        {
            self.timestamp = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(hour, 0, 0));
        }
    }

    /// Calendar date of the observation, when a timestamp exists.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_timestamp_complete() {
        let mut reading = Reading {
            station: "Tiantan".to_string(),
            year: Some(2017),
            month: Some(2),
            day: Some(28),
            hour: Some(23),
            ..Default::default()
        };
        reading.derive_timestamp();

        let expected = NaiveDate::from_ymd_opt(2017, 2, 28)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        assert_eq!(reading.timestamp, Some(expected));
        assert_eq!(reading.date(), NaiveDate::from_ymd_opt(2017, 2, 28));
    }

    #[test]
    fn test_derive_timestamp_missing_field() {
        let mut reading = Reading {
            year: Some(2017),
            month: Some(2),
            day: Some(28),
            hour: None,
            ..Default::default()
        };
        reading.derive_timestamp();
        assert!(reading.timestamp.is_none());
        assert!(reading.date().is_none());
    }

    #[test]
    fn test_derive_timestamp_invalid_calendar() {
        let mut reading = Reading {
            year: Some(2017),
            month: Some(13),
            day: Some(1),
            hour: Some(0),
            ..Default::default()
        };
        reading.derive_timestamp();
        assert!(reading.timestamp.is_none());
    }
}
