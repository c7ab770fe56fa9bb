//! Streaming writer for flat hand records.
//!
//! One record per parsed hand, LF-terminated and flushed as it is written, so
//! a long export can be followed with `tail -f`. The `json` format wraps the
//! same records in a single array.

use chrono::NaiveDateTime;
use clap::ValueEnum;
use hhreplay_engine::HandReplay;
use hhreplay_engine::view::{HandMetadata, HandView};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::io_utils::ensure_parent_dir;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One replay view per line
    Jsonl,
    /// All replay views as one JSON array
    Json,
    /// One storage metadata record per line
    Metadata,
}

pub struct ViewWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    fallback: Option<NaiveDateTime>,
    written: usize,
}

impl ViewWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(
        path: P,
        format: OutputFormat,
        fallback: Option<NaiveDateTime>,
    ) -> std::io::Result<Self> {
        ensure_parent_dir(path.as_ref()).map_err(std::io::Error::other)?;
        let f = File::create(path)?;
        Ok(Self::new(BufWriter::new(f), format, fallback))
    }
}

impl<W: Write> ViewWriter<W> {
    /// `fallback` stands in for hands whose header has no timestamp.
    pub fn new(writer: W, format: OutputFormat, fallback: Option<NaiveDateTime>) -> Self {
        Self {
            writer,
            format,
            fallback,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write(&mut self, replay: &HandReplay) -> std::io::Result<()> {
        let line = match self.format {
            OutputFormat::Jsonl => {
                serde_json::to_string(&HandView::from_replay(replay, self.fallback))
            }
            OutputFormat::Json => {
                serde_json::to_string_pretty(&HandView::from_replay(replay, self.fallback))
            }
            OutputFormat::Metadata => {
                serde_json::to_string(&HandMetadata::from_replay(replay, self.fallback))
            }
        }
        .map_err(std::io::Error::other)?;

        if self.format == OutputFormat::Json {
            self.writer
                .write_all(if self.written == 0 { b"[\n" } else { b",\n" })?;
        }
        self.writer.write_all(line.as_bytes())?;
        if self.format != OutputFormat::Json {
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Closes the array for the `json` format and flushes. Returns the number
    /// of records written.
    pub fn finish(mut self) -> std::io::Result<usize> {
        if self.format == OutputFormat::Json {
            let tail: &[u8] = if self.written == 0 { b"[]\n" } else { b"\n]\n" };
            self.writer.write_all(tail)?;
        }
        self.writer.flush()?;
        Ok(self.written)
    }
}
