use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::sync::Mutex;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEvent {
    pub ts: DateTime<Utc>,
    pub level: LogLevel,
    pub plan_id: Option<String>,
    pub section: Option<String>,
    pub log_dir: Option<String>,
    pub message: String,
    pub fields: HashMap<String, String>,
}

pub trait EventLogger: Send + Sync {
    fn log(&self, event: LogEvent);
}

#[derive(Default)]
pub struct NoopEventLogger;

impl EventLogger for NoopEventLogger {
    fn log(&self, _event: LogEvent) {}
}

pub type SharedEventLogger = Arc<dyn EventLogger>;

pub fn noop_logger() -> SharedEventLogger {
    Arc::new(NoopEventLogger)
}

/// Writes each event at or above `min_level` as one JSON line on stderr.
pub struct StderrEventLogger {
    min_level: LogLevel,
}

impl StderrEventLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl EventLogger for StderrEventLogger {
    fn log(&self, event: LogEvent) {
        if event.level < self.min_level {
            return;
        }
        if let Ok(line) = serde_json::to_string(&event) {
            eprintln!("{line}");
        }
    }
}

/// Forwards every event to each inner logger in order.
pub struct FanoutEventLogger {
    loggers: Vec<SharedEventLogger>,
}

impl FanoutEventLogger {
    pub fn new(loggers: Vec<SharedEventLogger>) -> Self {
        Self { loggers }
    }
}

impl EventLogger for FanoutEventLogger {
    fn log(&self, event: LogEvent) {
        if let Some((last, rest)) = self.loggers.split_last() {
            for logger in rest {
                logger.log(event.clone());
            }
            last.log(event);
        }
    }
}

/// Keeps the most recent events in memory and, when an event names a
/// `log_dir` and a `plan_id`, appends it to `<log_dir>/<plan_id>.events.jsonl`.
pub struct BufferedEventLogger {
    seq: AtomicU64,
    max_events: usize,
    max_events_per_plan: usize,
    state: Mutex<BufferedEventLoggerState>,
}

struct BufferedEventLoggerState {
    events: VecDeque<(u64, LogEvent)>,
    plan_events: HashMap<String, VecDeque<(u64, LogEvent)>>,
}

impl BufferedEventLogger {
    pub fn new(max_events: usize, max_events_per_plan: usize) -> Self {
        Self {
            seq: AtomicU64::new(0),
            max_events: max_events.max(1),
            max_events_per_plan: max_events_per_plan.max(1),
            state: Mutex::new(BufferedEventLoggerState {
                events: VecDeque::new(),
                plan_events: HashMap::new(),
            }),
        }
    }

    pub fn events_since(&self, last_seq: u64) -> (u64, Vec<LogEvent>) {
        let state = match self.state.lock() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut out = Vec::new();
        let mut new_last = last_seq;
        for (seq, ev) in state.events.iter() {
            if *seq > last_seq {
                out.push(ev.clone());
                new_last = new_last.max(*seq);
            }
        }
        (new_last, out)
    }

    pub fn plan_events_tail(&self, plan_id: &str, max: usize) -> Vec<LogEvent> {
        let state = match self.state.lock() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        let Some(q) = state.plan_events.get(plan_id) else {
            return Vec::new();
        };
        let skip = q.len().saturating_sub(max);
        q.iter().skip(skip).map(|(_, ev)| ev.clone()).collect()
    }

    fn event_path(event: &LogEvent) -> Option<PathBuf> {
        let log_dir = event.log_dir.as_ref()?;
        let plan_id = event.plan_id.as_ref()?;
        let safe = !plan_id.is_empty()
            && plan_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return None;
        }
        Some(Path::new(log_dir).join(format!("{plan_id}.events.jsonl")))
    }

    fn write_to_file(event: &LogEvent) {
        let Some(path) = Self::event_path(event) else {
            return;
        };
        let Some(parent) = path.parent() else {
            return;
        };
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        let line = line + "\n";
        let Ok(mut f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        else {
            return;
        };
        let _ = std::io::Write::write_all(&mut f, line.as_bytes());
    }
}

impl EventLogger for BufferedEventLogger {
    fn log(&self, event: LogEvent) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;

        Self::write_to_file(&event);

        let mut state = match self.state.lock() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.events.push_back((seq, event.clone()));
        while state.events.len() > self.max_events {
            state.events.pop_front();
        }

        if let Some(plan_id) = event.plan_id.clone() {
            let q = state.plan_events.entry(plan_id).or_default();
            q.push_back((seq, event));
            while q.len() > self.max_events_per_plan {
                q.pop_front();
            }
        }
    }
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            level,
            plan_id: None,
            section: None,
            log_dir: None,
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with_plan(mut self, plan_id: impl Into<String>) -> Self {
        self.plan_id = Some(plan_id.into());
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<String>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn with_field(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        self.fields.insert(k.into(), v.into());
        self
    }
}
