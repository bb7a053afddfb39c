//! Field formatters for the status line and the summary block.
//!
//! Every helper is a pure function over integer counters, so callers can
//! format values straight out of a snapshot without intermediate
//! floating-point state. Byte counts use binary units with one truncated
//! decimal (`1.5Ki`); callers append whichever `B`/`B/s` suffix the field
//! calls for.

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

/// Timestamp layout for summary headers, e.g. `2026/08/23 14:05:09`.
const SUMMARY_TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]/[month padding:zero]/[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]"
);

/// Shown when the wall clock cannot be read or formatted.
const FALLBACK_TIMESTAMP: &str = "1970/01/01 00:00:00";

const ABBREV_UNITS: [&str; 4] = ["Ki", "Mi", "Gi", "Ti"];

/// Renders a byte count in binary units with one truncated decimal.
///
/// Values below `1024` stay plain (`"512"`); larger values carry a unit
/// prefix (`"1.5Ki"`, `"2.0Mi"`). The decimal truncates rather than
/// rounds, so `1535` bytes render as `"1.4Ki"`.
#[must_use]
pub fn abbrev_size(bytes: u64) -> String {
    if bytes < 1024 {
        return bytes.to_string();
    }
    let mut divisor: u128 = 1024;
    let mut unit = 0;
    while unit + 1 < ABBREV_UNITS.len() && u128::from(bytes) >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }
    let tenths = u128::from(bytes) * 10 / divisor;
    format!("{}.{}{}", tenths / 10, tenths % 10, ABBREV_UNITS[unit])
}

/// Renders a transfer speed as kibibytes per second with two decimals.
#[must_use]
pub fn speed_kib(bytes_per_second: u64) -> String {
    format!("{:.2}KiB/s", bytes_per_second as f64 / 1024.0)
}

/// Whole-number completion percentage, truncated toward zero.
///
/// Returns `None` when the total is zero, which the trackers use to mean
/// the final length is not yet known; callers omit the field rather than
/// print a bogus `0%`.
#[must_use]
pub fn percent(completed: u64, total: u64) -> Option<u64> {
    if total == 0 {
        return None;
    }
    let ratio = u128::from(completed) * 100 / u128::from(total);
    Some(u64::try_from(ratio).unwrap_or(u64::MAX))
}

/// Renders a duration as `h:mm:ss`, adding a day field past 24 hours.
#[must_use]
pub fn duration_hms(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if days > 0 {
        format!("{days}:{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{hours}:{minutes:02}:{secs:02}")
    }
}

/// Share ratio with one decimal, computed in integer tenths.
///
/// `2500` uploaded against `1000` downloaded renders as `"2.5"`; the
/// tenth truncates just like the other counters. Returns `None` while
/// nothing has been downloaded, since the ratio is undefined until then.
#[must_use]
pub fn upload_ratio(all_time_upload: u64, completed: u64) -> Option<String> {
    if completed == 0 {
        return None;
    }
    let tenths = u128::from(all_time_upload) * 10 / u128::from(completed);
    Some(format!("{}.{}", tenths / 10, tenths % 10))
}

/// Current wall-clock time for the summary header.
///
/// Prefers the local offset and falls back to UTC when the platform will
/// not disclose it. A formatting failure yields the Unix epoch so the
/// header never goes missing.
#[must_use]
pub fn local_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(SUMMARY_TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| FALLBACK_TIMESTAMP.to_string())
}
