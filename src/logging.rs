//! The log format used by the binary. Each event becomes one uncoloured line
//! of the form `LEVEL message`, e.g. `WARN Post 'x' missing post-date -
//! skipping`, so the output can be grepped by level.

use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

/// Formats an event as its bare level, a space, and its fields.
pub struct LevelPrefix;

impl<S, N> FormatEvent<S, N> for LevelPrefix
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{} ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Builds the subscriber for INFO and above, writing [`LevelPrefix`] lines to
/// `make_writer` with ANSI colouring disabled.
pub fn subscriber<W>(make_writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_writer(make_writer)
        .event_format(LevelPrefix)
        .finish()
}

/// Runs `f` with [`subscriber`] capturing into memory and returns what was
/// logged.
#[cfg(test)]
pub(crate) fn capture<F: FnOnce()>(f: F) -> String {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            io::Write::write(&mut *self.0.lock().unwrap(), buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    tracing::subscriber::with_default(subscriber(move || writer.clone()), f);
    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
