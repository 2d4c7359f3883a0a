//! JSONL transcript writer for generation events.
//!
//! Each [`GenerationEvent`] becomes one JSON line: the payload fields plus
//! `type` and `timestamp`. The file is opened in append mode so one
//! transcript can span several sessions.

use lyricsmith_application::{GenerationEvent, GenerationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Generation logger that appends one JSON object per line.
pub struct JsonlGenerationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlGenerationLogger {
    /// Open (or create) the transcript at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: GenerationEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert("type".to_string(), Value::from(event.event_type));
        record.insert("timestamp".to_string(), Value::from(timestamp));
        Value::Object(record)
    }
}

impl GenerationLogger for JsonlGenerationLogger {
    fn log(&self, event: GenerationEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlGenerationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcripts/session.jsonl");
        let logger = JsonlGenerationLogger::open(&path).unwrap();

        logger.log(GenerationEvent::new(
            "lyrics_generated",
            serde_json::json!({ "mode": "new_song", "artist": "Drake", "history_id": 1 }),
        ));
        logger.log(GenerationEvent::new(
            "style_derived",
            serde_json::json!({ "style": "Pop, Synths" }),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "lyrics_generated");
        assert_eq!(records[0]["artist"], "Drake");
        assert_eq!(records[0]["history_id"], 1);
        assert!(records[0]["timestamp"].is_string());
        assert_eq!(records[1]["type"], "style_derived");
    }

    #[test]
    fn test_appends_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");

        for n in 0..2 {
            let logger = JsonlGenerationLogger::open(&path).unwrap();
            logger.log(GenerationEvent::new("run", serde_json::json!({ "n": n })));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["n"], 1);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        let logger = JsonlGenerationLogger::open(&path).unwrap();

        logger.log(GenerationEvent::new("note", serde_json::json!("just a string")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "just a string");
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlGenerationLogger::open(blocker.join("session.jsonl")).is_err());
    }
}
