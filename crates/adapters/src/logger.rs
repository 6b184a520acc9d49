//! `tracing`-backed logger adapter.

use reservation_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use serde_json::Value;

/// Target used for every forwarded event.
pub const LOG_TARGET: &str = "reservation";

/// Logger forwarding port events to the active `tracing` subscriber.
///
/// Structured fields are flattened into one JSON string field so the
/// subscriber decides the final layout.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    base_fields: LogFields,
}

impl TracingLogger {
    /// Create a logger with no base fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }
}

impl LoggerPort for TracingLogger {
    fn log(&self, event: LogEvent) {
        let mut fields = self.base_fields.clone();
        if let Some(extra) = event.fields {
            fields.extend(extra);
        }
        let fields = fields_to_json(&fields);
        let error = event.error.map(|error| error.to_string()).unwrap_or_default();
        let name = event.event.as_ref();
        let message = event.message.as_ref();

        match event.level {
            LogLevel::Debug => tracing::debug!(
                target: LOG_TARGET,
                event = name,
                fields = %fields,
                error = %error,
                "{message}"
            ),
            LogLevel::Info => tracing::info!(
                target: LOG_TARGET,
                event = name,
                fields = %fields,
                error = %error,
                "{message}"
            ),
            LogLevel::Warn => tracing::warn!(
                target: LOG_TARGET,
                event = name,
                fields = %fields,
                error = %error,
                "{message}"
            ),
            LogLevel::Error => tracing::error!(
                target: LOG_TARGET,
                event = name,
                fields = %fields,
                error = %error,
                "{message}"
            ),
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merged.extend(fields);
        Box::new(Self {
            base_fields: merged,
        })
    }
}

fn fields_to_json(fields: &LogFields) -> Value {
    let mut map = serde_json::Map::new();
    for (key, value) in fields {
        map.insert(key.to_string(), value.clone());
    }
    Value::Object(map)
}
