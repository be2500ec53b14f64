//! Rendering of call results inside log lines.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{FileInfo, FsError};

/// `ok`, or the error's message.
pub(crate) struct Outcome<'a>(Option<&'a FsError>);

pub(crate) fn outcome<T>(result: &Result<T, FsError>) -> Outcome<'_> {
    Outcome(result.as_ref().err())
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("ok"),
            Some(err) => fmt::Display::fmt(err, f),
        }
    }
}

/// `{descriptor}, ok` for a stat result, `-, error` for a failure.
pub(crate) struct Described<'a>(pub(crate) &'a Result<FileInfo, FsError>);

impl fmt::Display for Described<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Ok(info) => write!(f, "{info}, ok"),
            Err(err) => write!(f, "-, {err}"),
        }
    }
}

/// `[descr, descr], ok` for a directory listing, `-, error` for a failure.
pub(crate) struct Listing<'a>(pub(crate) &'a Result<Vec<FileInfo>, FsError>);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Ok(entries) => {
                f.write_str("[")?;
                for (i, info) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{info}")?;
                }
                f.write_str("], ok")
            }
            Err(err) => write!(f, "-, {err}"),
        }
    }
}

/// RFC 3339 UTC timestamp; times before the epoch fall back to `Debug`.
pub(crate) fn timestamp(time: SystemTime) -> String {
    let datetime = time.duration_since(UNIX_EPOCH).ok().and_then(|since| {
        let secs = i64::try_from(since.as_secs()).ok()?;
        DateTime::<Utc>::from_timestamp(secs, since.subsec_nanos())
    });
    match datetime {
        Some(datetime) => datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        None => format!("{time:?}"),
    }
}
