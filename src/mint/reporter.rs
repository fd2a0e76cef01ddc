// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scenario result reporting.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    /// Scenario does not apply to the server under test.
    #[serde(rename = "NA")]
    NotApplicable,
}

/// One reported scenario result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub name: String,
    pub function: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub args: Map<String, Value>,
    /// Milliseconds
    pub duration: u64,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogEntry {
    pub fn new(name: &str, function: &str, args: Map<String, Value>, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            function: function.to_string(),
            args,
            duration: duration.as_millis() as u64,
            status: Status::Pass,
            alert: None,
            message: None,
            error: None,
        }
    }

    pub fn failed(mut self, message: impl Into<String>, error: Option<String>) -> Self {
        self.status = Status::Fail;
        self.message = Some(message.into());
        self.error = error;
        self
    }

    pub fn not_applicable(mut self, alert: impl Into<String>) -> Self {
        self.status = Status::NotApplicable;
        self.alert = Some(alert.into());
        self
    }
}

/// Receives one entry per scenario.
pub trait TestReporter: Send + Sync {
    fn report(&self, entry: &LogEntry);
}

/// Writes every entry as one line of JSON.
pub struct JsonReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl JsonReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TestReporter for JsonReporter<W> {
    fn report(&self, entry: &LogEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(v) => v,
            Err(e) => {
                log::error!("unable to serialize result of {}: {e}", entry.function);
                return;
            }
        };
        let mut out = match self.out.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{line}") {
            log::error!("unable to write result of {}: {e}", entry.function);
        }
    }
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TestReporter for MemoryReporter {
    fn report(&self, entry: &LogEntry) {
        match self.entries.lock() {
            Ok(mut g) => g.push(entry.clone()),
            Err(poisoned) => poisoned.into_inner().push(entry.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_lines() {
        let reporter = JsonReporter::new(Vec::new());
        let mut args = Map::new();
        args.insert("bucketName".into(), json!("b"));
        reporter.report(&LogEntry::new(
            "minio-mint",
            "put_get_fixture",
            args,
            Duration::from_millis(12),
        ));
        reporter.report(
            &LogEntry::new("minio-mint", "kms_put_get", Map::new(), Duration::ZERO)
                .not_applicable("KMS is not enabled"),
        );

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(
            lines[0],
            json!({
                "name": "minio-mint",
                "function": "put_get_fixture",
                "args": {"bucketName": "b"},
                "duration": 12,
                "status": "PASS"
            })
        );
        assert_eq!(lines[1]["status"], "NA");
        assert_eq!(lines[1]["alert"], "KMS is not enabled");
        assert!(lines[1].get("args").is_none());
    }

    #[test]
    fn failure_round_trip() {
        let entry = LogEntry::new("minio-mint", "f", Map::new(), Duration::from_secs(1))
            .failed("checksum mismatch", Some("CRC32 mismatch".into()));
        let parsed: LogEntry = serde_json::from_str(&serde_json::to_string(&entry).unwrap()).unwrap();
        assert_eq!(parsed, entry);
        assert_eq!(parsed.status, Status::Fail);
    }
}
