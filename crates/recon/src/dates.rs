use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Date-only formats tried in order; first success wins. Day-first formats
/// come before month-first so ambiguous cells resolve the Latin way.
const TEXT_FORMATS: &[&str] = &[
    "%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%Y/%m/%d",
    "%d.%m.%Y", "%d %m %Y", "%Y%m%d", "%d/%m/%y", "%d-%m-%y",
];

const DATETIME_FORMATS: &[&str] = &["%d/%m/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Upper bound for spreadsheet serial dates (9999-12-31).
const MAX_SERIAL_DAYS: f64 = 2_958_465.0;

/// Resilient date interpreter shared by both ledgers.
///
/// Tries, in order: the fixed text formats, the datetime formats (time part
/// discarded), numeric interpretation (bare 1900–2100 integers as January 1
/// of that year, larger values as spreadsheet serial day counts), and
/// finally a lenient day-first split. Returns `None` instead of erroring:
/// an undated row is kept and only excluded from date-dependent steps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let val = raw.trim();
    if val.is_empty() {
        return None;
    }

    for fmt in TEXT_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(val, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(val, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(n) = val.parse::<f64>() {
        if (1900.0..=2100.0).contains(&n) && n.fract() == 0.0 {
            return NaiveDate::from_ymd_opt(n as i32, 1, 1);
        }
        if n > 1000.0 {
            return from_serial(n);
        }
        return None;
    }

    lenient_day_first(val)
}

/// Spreadsheet serial dates count days from 1899-12-30.
fn from_serial(days: f64) -> Option<NaiveDate> {
    if !days.is_finite() || days > MAX_SERIAL_DAYS {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(days.trunc() as i64))
}

/// Last-resort parse: split on the common separators and read the pieces
/// day-first, or year-first when the leading piece is four digits. Two-digit
/// years map to 2000+. Invalid calendar dates (e.g. 31/02/2024) fail here
/// too and the cell stays unparsed.
fn lenient_day_first(val: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = val
        .split(|c| matches!(c, '/' | '-' | '.' | ' '))
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }

    let nums: Vec<u32> = parts
        .iter()
        .map(|p| p.parse::<u32>().ok())
        .collect::<Option<_>>()?;

    let (d, m, y) = if parts[0].len() == 4 {
        (nums[2], nums[1], nums[0])
    } else {
        (nums[0], nums[1], nums[2])
    };
    let y = if y < 100 { 2000 + y } else { y };

    NaiveDate::from_ymd_opt(y as i32, m, d)
}
