//! Earth orientation parameter records and interpolation

use serde::{Deserialize, Serialize};

use crate::time::tai_minus_utc_mjd;

/// One daily EOP sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EopRecord {
    pub mjd: f64,
    /// Polar motion x (arcseconds)
    pub x_arcsec: f64,
    /// Polar motion y (arcseconds)
    pub y_arcsec: f64,
    /// UT1-UTC (seconds)
    pub dut1_seconds: f64,
}

/// EOP values at a specific instant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EopParameters {
    pub x_arcsec: f64,
    pub y_arcsec: f64,
    pub dut1_seconds: f64,
}

/// Time-ordered EOP samples owned by the caller and handed to the
/// high-precision service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EopTable {
    records: Vec<EopRecord>,
}

impl EopTable {
    /// Build a table, sorting by MJD and dropping duplicate days
    /// (the last sample for a day wins).
    pub fn new(mut records: Vec<EopRecord>) -> Self {
        records.retain(|r| r.mjd.is_finite());
        records.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
        let mut deduped: Vec<EopRecord> = Vec::with_capacity(records.len());
        for r in records {
            match deduped.last_mut() {
                Some(last) if last.mjd == r.mjd => *last = r,
                _ => deduped.push(r),
            }
        }
        Self { records: deduped }
    }

    pub fn records(&self) -> &[EopRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last MJD covered.
    pub fn span(&self) -> Option<(f64, f64)> {
        Some((self.records.first()?.mjd, self.records.last()?.mjd))
    }

    pub fn covers(&self, mjd: f64) -> bool {
        self.span()
            .is_some_and(|(first, last)| (first..=last).contains(&mjd))
    }

    /// Linearly interpolated parameters, or `None` outside coverage.
    ///
    /// DUT1 is interpolated as UT1-TAI, which is continuous, so a leap
    /// second between two samples does not smear into the result.
    pub fn at(&self, mjd: f64) -> Option<EopParameters> {
        if !self.covers(mjd) {
            return None;
        }
        let idx = self.records.partition_point(|r| r.mjd <= mjd);
        let hi = idx.min(self.records.len() - 1);
        let lo = idx.saturating_sub(1);
        let (a, b) = (&self.records[lo], &self.records[hi]);

        let span = b.mjd - a.mjd;
        let w = if span > 0.0 { (mjd - a.mjd) / span } else { 0.0 };
        let lerp = |p: f64, q: f64| p + (q - p) * w;

        Some(EopParameters {
            x_arcsec: lerp(a.x_arcsec, b.x_arcsec),
            y_arcsec: lerp(a.y_arcsec, b.y_arcsec),
            dut1_seconds: lerp(
                a.dut1_seconds - tai_minus_utc_mjd(a.mjd),
                b.dut1_seconds - tai_minus_utc_mjd(b.mjd),
            ) + tai_minus_utc_mjd(mjd),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mjd: f64, x: f64, y: f64, dut1: f64) -> EopRecord {
        EopRecord {
            mjd,
            x_arcsec: x,
            y_arcsec: y,
            dut1_seconds: dut1,
        }
    }

    #[test]
    fn test_table_sorts_and_dedupes() {
        let table = EopTable::new(vec![
            record(59076.0, 0.2, 0.3, -0.2),
            record(59075.0, 0.1, 0.3, -0.1),
            record(59076.0, 0.25, 0.35, -0.25),
            record(f64::NAN, 0.0, 0.0, 0.0),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.span(), Some((59075.0, 59076.0)));
        assert_eq!(table.records()[1].x_arcsec, 0.25);
    }

    #[test]
    fn test_interpolation_midpoint() {
        let table = EopTable::new(vec![
            record(59075.0, 0.1, 0.3, -0.1),
            record(59076.0, 0.2, 0.4, -0.2),
        ]);
        let p = table.at(59075.5).unwrap();
        assert!((p.x_arcsec - 0.15).abs() < 1e-12);
        assert!((p.y_arcsec - 0.35).abs() < 1e-12);
        assert!((p.dut1_seconds + 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_interpolation_endpoints() {
        let table = EopTable::new(vec![
            record(59075.0, 0.1, 0.3, -0.1),
            record(59076.0, 0.2, 0.4, -0.2),
        ]);
        assert_eq!(table.at(59075.0).unwrap().x_arcsec, 0.1);
        assert_eq!(table.at(59076.0).unwrap().x_arcsec, 0.2);
    }

    #[test]
    fn test_interpolation_across_leap_second() {
        // UT1-UTC jumps by +1 s at the 2017-01-01 leap second (MJD 57754)
        let table = EopTable::new(vec![
            record(57753.0, 0.0, 0.0, -0.40),
            record(57754.0, 0.0, 0.0, 0.59),
        ]);
        let p = table.at(57753.5).unwrap();
        assert!((p.dut1_seconds + 0.405).abs() < 1e-9, "dut1 = {}", p.dut1_seconds);
        assert!((table.at(57754.0).unwrap().dut1_seconds - 0.59).abs() < 1e-12);
    }

    #[test]
    fn test_outside_coverage() {
        let table = EopTable::new(vec![record(59075.0, 0.1, 0.3, -0.1)]);
        assert!(table.covers(59075.0));
        assert!(table.at(59075.0).is_some());
        assert!(table.at(59074.9).is_none());
        assert!(table.at(59075.1).is_none());
        assert!(EopTable::default().at(59075.0).is_none());
    }
}
