//! CelesTrak EOP CSV parsing

use anyhow::{Context, Result};

use super::types::{EopRecord, EopTable};

/// Parse the CelesTrak `EOP-All.csv` layout.
///
/// Columns are located by header name (`MJD`, `X`, `Y`, `UT1-UTC`) so extra
/// or reordered columns are tolerated.
pub fn parse_celestrak_csv(body: &str) -> Result<EopTable> {
    let mut lines = body
        .lines()
        .map(|l| l.trim_matches(|c| c == '\u{feff}' || c == '\r' || c == ' ')) // trim BOM/CRLF/space
        .enumerate()
        .filter(|(_, l)| !l.is_empty());

    let (_, header) = lines.next().context("empty EOP file")?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let column = |name: &str| {
        columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .with_context(|| format!("EOP header missing column {}", name))
    };
    let (mjd_col, x_col, y_col, dut1_col) =
        (column("MJD")?, column("X")?, column("Y")?, column("UT1-UTC")?);

    let mut records = Vec::new();
    for (idx, line) in lines {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let field = |col: usize, name: &str| -> Result<f64> {
            let raw = fields
                .get(col)
                .with_context(|| format!("line {}: missing {}", idx + 1, name))?;
            raw.parse::<f64>()
                .with_context(|| format!("line {}: invalid {} '{}'", idx + 1, name, raw))
        };
        records.push(EopRecord {
            mjd: field(mjd_col, "MJD")?,
            x_arcsec: field(x_col, "X")?,
            y_arcsec: field(y_col, "Y")?,
            dut1_seconds: field(dut1_col, "UT1-UTC")?,
        });
    }

    if records.is_empty() {
        anyhow::bail!("no EOP records found");
    }
    Ok(EopTable::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}DATE,MJD,X,Y,UT1-UTC,LOD,DPSI,DEPS,DX,DY,DAT,DATA_TYPE\r\n\
        2020-08-13,59074,0.211238,0.393400,-0.1869927,-0.0007458,-0.108958,-0.008004,0.000099,0.000122,37,O\r\n\
        2020-08-14,59075,0.213075,0.392428,-0.1865180,-0.0001616,-0.109046,-0.008225,0.000102,0.000125,37,O\r\n\
        \r\n\
        2020-08-15,59076,0.214804,0.391381,-0.1866766,0.0002766,-0.109165,-0.008316,0.000106,0.000128,37,O\r\n";

    #[test]
    fn test_parse_sample() {
        let table = parse_celestrak_csv(SAMPLE).expect("sample should parse");
        assert_eq!(table.len(), 3);
        assert_eq!(table.span(), Some((59074.0, 59076.0)));
        let r = table.records()[1];
        assert_eq!(r.x_arcsec, 0.213075);
        assert_eq!(r.y_arcsec, 0.392428);
        assert_eq!(r.dut1_seconds, -0.1865180);
    }

    #[test]
    fn test_reordered_columns() {
        let body = "MJD,UT1-UTC,Y,X\n59075,-0.18,0.39,0.21\n";
        let r = parse_celestrak_csv(body).unwrap().records()[0];
        assert_eq!(r.x_arcsec, 0.21);
        assert_eq!(r.dut1_seconds, -0.18);
    }

    #[test]
    fn test_missing_column_is_error() {
        let err = parse_celestrak_csv("DATE,MJD,X,Y\n2020-08-14,59075,0.2,0.3\n").unwrap_err();
        assert!(err.to_string().contains("UT1-UTC"), "{}", err);
    }

    #[test]
    fn test_bad_number_reports_line() {
        let body = "MJD,X,Y,UT1-UTC\n59075,0.2,0.3,-0.1\n59076,abc,0.3,-0.1\n";
        let err = parse_celestrak_csv(body).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{}", err);
    }

    #[test]
    fn test_header_only_is_error() {
        assert!(parse_celestrak_csv("MJD,X,Y,UT1-UTC\n").is_err());
        assert!(parse_celestrak_csv("").is_err());
    }
}
