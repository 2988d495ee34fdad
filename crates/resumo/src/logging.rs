//! Console log output.
//!
//! [`ConsoleLayer`] formats each tracing event as
//! `HH:MM:SS LEVEL message {field=value, ...}` and writes it to stderr, so
//! stdout stays reserved for the summary itself.

use std::fmt::Debug;
use std::io::Write;
use std::sync::Mutex;

use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Map a `-v` count to the most verbose level that is shown.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the console layer as the global subscriber.
pub fn init(verbosity: u8) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(ConsoleLayer::stderr().with_filter(level_for_verbosity(verbosity)))
        .try_init()
}

/// A [`tracing_subscriber::Layer`] that writes one line per event.
pub struct ConsoleLayer {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleLayer {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let line = format_line(
            &Local::now().format("%H:%M:%S").to_string(),
            *event.metadata().level(),
            visitor,
        );

        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        // Nowhere left to report a failed log write.
        let _ = writeln!(out, "{line}");
    }
}

fn format_line(time: &str, level: Level, visitor: MessageVisitor) -> String {
    let MessageVisitor { message, fields } = visitor;
    let extras: Vec<String> = fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
    let body = match (message.is_empty(), extras.is_empty()) {
        (_, true) => message,
        (true, false) => extras.join(" "),
        (false, false) => format!("{message} {{{}}}", extras.join(", ")),
    };
    format!("{time} {:>5} {body}", level.as_str())
}

/// Collects the `message` field and any structured fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}
