use chrono::NaiveDate;

/// Parse a `M/D/YYYY` string as stored on prescriptions.
pub fn parse_slash_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('/');
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse the `YYYY-MM-DD` value a date input produces.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
