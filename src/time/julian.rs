//! Julian dates and UTC-based time scales

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00 TT)
pub const J2000_JD: f64 = 2451545.0;

/// Offset between Julian Date and Modified Julian Date
pub const MJD_OFFSET: f64 = 2400000.5;

const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;
const SECONDS_PER_DAY: f64 = 86400.0;
const TT_MINUS_TAI_SECONDS: f64 = 32.184;
const UNIX_EPOCH_MJD: f64 = 40587.0;

// (year, month, TAI-UTC seconds) effective from the first day of that month.
const LEAP_SECONDS: [(i32, u32, f64); 28] = [
    (1972, 1, 10.0),
    (1972, 7, 11.0),
    (1973, 1, 12.0),
    (1974, 1, 13.0),
    (1975, 1, 14.0),
    (1976, 1, 15.0),
    (1977, 1, 16.0),
    (1978, 1, 17.0),
    (1979, 1, 18.0),
    (1980, 1, 19.0),
    (1981, 7, 20.0),
    (1982, 7, 21.0),
    (1983, 7, 22.0),
    (1985, 7, 23.0),
    (1988, 1, 24.0),
    (1990, 1, 25.0),
    (1991, 1, 26.0),
    (1992, 7, 27.0),
    (1993, 7, 28.0),
    (1994, 7, 29.0),
    (1996, 1, 30.0),
    (1997, 7, 31.0),
    (1999, 1, 32.0),
    (2006, 1, 33.0),
    (2009, 1, 34.0),
    (2012, 7, 35.0),
    (2015, 7, 36.0),
    (2017, 1, 37.0),
];

/// Compute the Julian Date (UTC) for a given timestamp.
/// Uses the standard Gregorian calendar to JD conversion.
pub fn julian_date_utc(t: DateTime<Utc>) -> f64 {
    let mut y = t.year();
    let mut m = t.month() as i32;
    let d = t.day() as i32;

    // Convert time of day to fraction of day
    let hour = t.hour() as f64;
    let minute = t.minute() as f64;
    let sec = t.second() as f64 + (t.nanosecond() as f64) * 1e-9_f64;
    let day_fraction = (hour + (minute + sec / 60.0) / 60.0) / 24.0;

    if m <= 2 {
        y -= 1;
        m += 12;
    }

    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    let jd0 = (365.25 * (y as f64 + 4716.0)).floor()
        + (30.6001 * ((m + 1) as f64)).floor()
        + d as f64
        + b
        - 1524.5;

    jd0 + day_fraction
}

/// Modified Julian Date (UTC), the index used by EOP tables.
pub fn modified_julian_date(t: DateTime<Utc>) -> f64 {
    julian_date_utc(t) - MJD_OFFSET
}

/// TAI-UTC in seconds from the built-in leap second table.
///
/// Instants before 1972 use the 1972 value; the pre-1972 rubber-second era
/// is not modeled.
pub fn tai_minus_utc(t: DateTime<Utc>) -> f64 {
    let key = (t.year(), t.month());
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(y, m, _)| (*y, *m) <= key)
        .map(|(_, _, dat)| *dat)
        .unwrap_or(LEAP_SECONDS[0].2)
}

/// TAI-UTC in seconds at a UTC Modified Julian Date.
pub fn tai_minus_utc_mjd(mjd: f64) -> f64 {
    let unix_seconds = (mjd - UNIX_EPOCH_MJD) * SECONDS_PER_DAY;
    match DateTime::<Utc>::from_timestamp(unix_seconds.floor() as i64, 0) {
        Some(t) => tai_minus_utc(t),
        None if mjd > UNIX_EPOCH_MJD => LEAP_SECONDS[LEAP_SECONDS.len() - 1].2,
        None => LEAP_SECONDS[0].2,
    }
}

/// Julian Date in Terrestrial Time.
pub fn julian_date_tt(t: DateTime<Utc>) -> f64 {
    julian_date_utc(t) + (tai_minus_utc(t) + TT_MINUS_TAI_SECONDS) / SECONDS_PER_DAY
}

/// Julian centuries of TT since J2000.0
pub fn julian_centuries_tt(t: DateTime<Utc>) -> f64 {
    (julian_date_tt(t) - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tai_minus_utc_at_mjd() {
        // 2017-01-01 is MJD 57754
        assert_eq!(tai_minus_utc_mjd(57753.99), 36.0);
        assert_eq!(tai_minus_utc_mjd(57754.0), 37.0);
        assert_eq!(tai_minus_utc_mjd(59075.5), 37.0);
        assert_eq!(tai_minus_utc_mjd(30000.0), 10.0);
    }

    #[test]
    fn test_julian_date_j2000_noon() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = julian_date_utc(t);
        assert!((jd - 2451545.0).abs() < 1e-9, "jd = {}", jd);
    }

    #[test]
    fn test_julian_date_unix_epoch() {
        let t = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert!((julian_date_utc(t) - 2440587.5).abs() < 1e-9);
        assert!((modified_julian_date(t) - 40587.0).abs() < 1e-9);
    }

    #[test]
    fn test_julian_date_leap_year_boundaries() {
        let leap_feb_28 = Utc.with_ymd_and_hms(2000, 2, 28, 12, 0, 0).unwrap();
        let leap_feb_29 = Utc.with_ymd_and_hms(2000, 2, 29, 12, 0, 0).unwrap();
        let leap_mar_01 = Utc.with_ymd_and_hms(2000, 3, 1, 12, 0, 0).unwrap();

        let jd_feb_28 = julian_date_utc(leap_feb_28);
        let jd_feb_29 = julian_date_utc(leap_feb_29);
        let jd_mar_01 = julian_date_utc(leap_mar_01);

        assert!((jd_feb_29 - jd_feb_28 - 1.0).abs() < 1e-9);
        assert!((jd_mar_01 - jd_feb_29 - 1.0).abs() < 1e-9);

        let non_leap_feb_28 = Utc.with_ymd_and_hms(1900, 2, 28, 12, 0, 0).unwrap();
        let non_leap_mar_01 = Utc.with_ymd_and_hms(1900, 3, 1, 12, 0, 0).unwrap();
        let diff = julian_date_utc(non_leap_mar_01) - julian_date_utc(non_leap_feb_28);
        assert!((diff - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_julian_date_century_boundaries() {
        let century_1900 = Utc.with_ymd_and_hms(1900, 1, 1, 12, 0, 0).unwrap();
        let century_2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();

        let expected_days = 36524.0;
        let actual_diff = julian_date_utc(century_2000) - julian_date_utc(century_1900);
        assert!(
            (actual_diff - expected_days).abs() < 1e-6,
            "Century difference should be {} days, got {}",
            expected_days,
            actual_diff
        );
    }

    #[test]
    fn test_julian_date_subsecond_resolution() {
        let t = Utc.with_ymd_and_hms(2020, 8, 14, 0, 0, 41).unwrap();
        let later = t + chrono::Duration::milliseconds(500);
        let diff_s = (julian_date_utc(later) - julian_date_utc(t)) * 86400.0;
        assert!((diff_s - 0.5).abs() < 1e-4, "diff = {} s", diff_s);
    }

    #[test]
    fn test_tai_minus_utc_table() {
        let early = Utc.with_ymd_and_hms(1969, 7, 20, 0, 0, 0).unwrap();
        assert_eq!(tai_minus_utc(early), 10.0);

        let before = Utc.with_ymd_and_hms(2016, 12, 31, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(tai_minus_utc(before), 36.0);
        assert_eq!(tai_minus_utc(after), 37.0);

        let mid_1992 = Utc.with_ymd_and_hms(1992, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(tai_minus_utc(mid_1992), 27.0);
    }

    #[test]
    fn test_julian_date_tt_offset() {
        let t = Utc.with_ymd_and_hms(2020, 8, 14, 0, 0, 41).unwrap();
        let offset_s = (julian_date_tt(t) - julian_date_utc(t)) * 86400.0;
        assert!((offset_s - 69.184).abs() < 1e-3, "TT-UTC = {} s", offset_s);
    }

    #[test]
    fn test_julian_centuries_tt_sign() {
        let t = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
        assert!(julian_centuries_tt(t) < 0.0);
        let t = Utc.with_ymd_and_hms(2050, 1, 1, 0, 0, 0).unwrap();
        assert!((julian_centuries_tt(t) - 0.5).abs() < 0.01);
    }
}
