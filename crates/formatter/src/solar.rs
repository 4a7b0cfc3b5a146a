//! Solar day/night classifier used by the time-series and glance profiles.
//!
//! A point is in daytime when the solar elevation is above the horizon at
//! the instant. Uses the standard NOAA low-precision solar position
//! approximation, which is more than accurate enough for a day/night split.

use time::OffsetDateTime;

/// True when the sun is above the horizon at the instant for the location.
pub fn is_daytime(latitude: f64, longitude: f64, epoch: i64) -> bool {
    solar_elevation(latitude, longitude, epoch) > 0.0
}

/// Solar elevation angle in degrees.
pub fn solar_elevation(latitude: f64, longitude: f64, epoch: i64) -> f64 {
    let utc = OffsetDateTime::from_unix_timestamp(epoch).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    let day_of_year = utc.ordinal() as f64;
    let hour = utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;

    // Fractional year, radians
    let gamma = 2.0 * std::f64::consts::PI / 365.0 * (day_of_year - 1.0 + (hour - 12.0) / 24.0);

    // Equation of time (minutes) and solar declination (radians)
    let eqtime = 229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin());
    let decl = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin();

    // True solar time in minutes, from UTC
    let time_offset = eqtime + 4.0 * longitude;
    let tst = hour * 60.0 + time_offset;
    let hour_angle = (tst / 4.0 - 180.0).to_radians();

    let lat = latitude.to_radians();
    let cos_zenith = lat.sin() * decl.sin() + lat.cos() * decl.cos() * hour_angle.cos();
    90.0 - cos_zenith.clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Date, Month, PrimitiveDateTime, Time};

    fn utc_epoch(year: i32, month: Month, day: u8, hour: u8) -> i64 {
        PrimitiveDateTime::new(
            Date::from_calendar_date(year, month, day).unwrap(),
            Time::from_hms(hour, 0, 0).unwrap(),
        )
        .assume_utc()
        .unix_timestamp()
    }

    #[test]
    fn noon_in_dc_is_day() {
        // 17:00 UTC is local noon-ish on the US east coast.
        let epoch = utc_epoch(2006, Month::April, 15, 17);
        assert!(is_daytime(38.99, -77.02, epoch));
    }

    #[test]
    fn midnight_in_dc_is_night() {
        // 05:00 UTC is local midnight on the US east coast.
        let epoch = utc_epoch(2006, Month::April, 15, 5);
        assert!(!is_daytime(38.99, -77.02, epoch));
    }
}
