use chrono::{DateTime, Local, TimeZone};

/// Renders a timestamp the way `ctime` does, e.g. `Thu Jan  1 00:00:00 1970`
pub fn ctime<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%a %b %e %H:%M:%S %Y").to_string()
}

/// Converts a unix timestamp to local `ctime` text. `None` if chrono can't represent it.
pub fn local_ctime(unix_seconds: i64) -> Option<String> {
    let utc = DateTime::from_timestamp(unix_seconds, 0)?;

    Some(ctime(&utc.with_timezone(&Local)))
}
