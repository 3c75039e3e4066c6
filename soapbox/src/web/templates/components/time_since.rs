use chrono::{Local, NaiveDateTime};
use lazy_static::lazy_static;
use maud::{PreEscaped, Render};
use timeago::{English, Formatter};

/// Relative "5 minutes ago" label for a complaint's submission time.
/// Timestamps are stored as local wall clock time without a zone.
pub(crate) struct TimeSince(pub(crate) NaiveDateTime);

impl Render for TimeSince {
    fn render(&self) -> maud::Markup {
        lazy_static! {
          static ref FORMATTER: Formatter<English> = Formatter::new();
        };
        let elapsed = Local::now()
            .naive_local()
            .signed_duration_since(self.0)
            .to_std()
            .unwrap_or_default();
        PreEscaped(FORMATTER.convert(elapsed))
    }
}
