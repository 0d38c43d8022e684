use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Get the local offset for `canonical_timezone`, logging and returning an error if the name is invalid.
pub fn must_get_local_offset(canonical_timezone: &str) -> Result<UtcOffset, Error> {
    get_local_offset(canonical_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {canonical_timezone}");
        Error::InvalidTimezoneError(canonical_timezone.to_owned())
    })
}

/// Format a UTC timestamp as a date and time in the local offset, e.g. "2025-01-31 14:05".
pub fn format_local_datetime(datetime: OffsetDateTime, local_offset: UtcOffset) -> String {
    let local = datetime.to_offset(local_offset);

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        local.year(),
        u8::from(local.month()),
        local.day(),
        local.hour(),
        local.minute()
    )
}

#[cfg(test)]
mod tests {
    use time::{UtcOffset, macros::datetime};

    use crate::Error;

    use super::{format_local_datetime, get_local_offset, must_get_local_offset};

    #[test]
    fn utc_has_zero_offset() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn invalid_timezone_is_error() {
        assert_eq!(
            must_get_local_offset("Not/AZone"),
            Err(Error::InvalidTimezoneError("Not/AZone".to_owned()))
        );
    }

    #[test]
    fn formats_in_local_offset() {
        let offset = UtcOffset::from_hms(13, 0, 0).unwrap();

        let got = format_local_datetime(datetime!(2025-01-31 12:05 UTC), offset);

        assert_eq!(got, "2025-02-01 01:05");
    }
}
