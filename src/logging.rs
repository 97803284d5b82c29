//! Structured log lines: one JSON object per event.

use std::rc::Rc;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

/// Where formatted events end up.
pub trait LogSink {
    fn write(&self, level: LogLevel, payload: &serde_json::Value);
}

/// Stdout natively, the browser console in wasm.
pub struct StandardSink;

impl LogSink for StandardSink {
    fn write(&self, level: LogLevel, payload: &serde_json::Value) {
        emit(level, payload);
    }
}

#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    sink: Rc<dyn LogSink>,
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self::with_sink(min_level, Rc::new(StandardSink))
    }

    pub fn with_sink(min_level: LogLevel, sink: Rc<dyn LogSink>) -> Self {
        Self { min_level, sink }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if !self.enabled(level) {
            return;
        }

        self.sink
            .write(level, &format_event(now_unix_millis(), level, event, fields));
    }

    pub fn info(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Info, event, fields);
    }

    pub fn debug(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Debug, event, fields);
    }
}

fn format_event(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert("ts".to_string(), serde_json::Value::from(ts));
    payload.insert("level".to_string(), serde_json::Value::from(level.as_str()));
    payload.insert("event".to_string(), serde_json::Value::from(event));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, payload: &serde_json::Value) {
    println!("{payload}");
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, payload: &serde_json::Value) {
    let line = wasm_bindgen::JsValue::from_str(&payload.to_string());
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&line),
        LogLevel::Info => web_sys::console::info_1(&line),
    }
}
