use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Minimum-severity threshold for the diagnostic logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl FromStr for Level {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            _ => Err(ClientError::Config(format!("unknown log level: {s}"))),
        }
    }
}

struct Inner {
    level: Level,
    sink: Box<dyn Write + Send>,
}

/// Leveled JSON-lines logger used by callers to report transport
/// outcomes. Level and sink live behind one mutex; reconfiguration swaps
/// them under the lock, so a concurrent log call sees either the old or
/// the new configuration, never a mix. Last writer wins, there is no
/// ordering promise between a racing `set_level` and a log call.
pub struct Logger {
    inner: Mutex<Inner>,
}

impl Logger {
    /// Logger writing to stdout.
    pub fn new(level: Level) -> Self {
        Self::with_sink(level, Box::new(io::stdout()))
    }

    pub fn with_sink(level: Level, sink: Box<dyn Write + Send>) -> Self {
        Self {
            inner: Mutex::new(Inner { level, sink }),
        }
    }

    pub fn set_level(&self, level: Level) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.level = level;
        }
    }

    pub fn set_sink(&self, sink: Box<dyn Write + Send>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.sink = sink;
        }
    }

    pub fn debug(&self, msg: &str, attrs: &[(&str, Value)]) {
        self.emit(Level::Debug, msg, None, attrs);
    }

    pub fn info(&self, msg: &str, attrs: &[(&str, Value)]) {
        self.emit(Level::Info, msg, None, attrs);
    }

    pub fn warn(&self, msg: &str, attrs: &[(&str, Value)]) {
        self.emit(Level::Warn, msg, None, attrs);
    }

    /// Logs at error severity. A present `cause` adds exactly one
    /// `error` attribute carrying its rendered text; `None` adds nothing.
    pub fn error(&self, msg: &str, cause: Option<&dyn std::error::Error>, attrs: &[(&str, Value)]) {
        self.emit(Level::Error, msg, cause, attrs);
    }

    fn emit(
        &self,
        level: Level,
        msg: &str,
        cause: Option<&dyn std::error::Error>,
        attrs: &[(&str, Value)],
    ) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if level < inner.level {
            return;
        }

        let mut fields = Map::new();
        fields.insert(
            "time".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        fields.insert("level".to_string(), Value::String(level.as_str().to_string()));
        fields.insert("msg".to_string(), Value::String(msg.to_string()));
        for (key, value) in attrs {
            fields.insert((*key).to_string(), value.clone());
        }
        if let Some(cause) = cause {
            fields.insert("error".to_string(), Value::String(cause.to_string()));
        }

        let line = Value::Object(fields).to_string();
        let _ = writeln!(inner.sink, "{line}");
    }
}
