//! Frame rendering for poll outcomes
//!
//! Text frames look like:
//!
//! ```text
//! format_revision = 2, content_revision = 2
//! Parsing gpu_metrics_v2_2
//! average_socket_power: 150 W
//! average_cpu_power: 45.00 W
//! average_soc_power: 3.20 W
//! ```
//!
//! JSON frames are one object per line.
//!
//! A configured field the current table does not have is skipped quietly.
//! A field path that is malformed or indexes past the end of its array is a
//! configuration mistake: it is logged at `warn` the first time and at
//! `debug` on every later frame.

use gpumon_codec::{DecodeResult, DecodedSample, FieldPath, FieldValue};
use gpumon_config::{defaults, DisplayConfig, OutputFormat};
use gpumon_types::{ScaledValue, Unit};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

use crate::error::Result;
use crate::poller::PollOutcome;

#[derive(Debug)]
pub struct Renderer {
    clear_screen: bool,
    fields: Vec<String>,
    format: OutputFormat,
    warned_paths: Mutex<HashSet<String>>,
}

#[derive(Debug, Serialize)]
struct JsonFrame<'a> {
    format_revision: Option<u8>,
    content_revision: Option<u8>,
    variant: Option<&'a str>,
    stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct JsonValue {
    raw: u64,
    unit: Unit,
    value: f64,
}

impl From<&ScaledValue> for JsonValue {
    fn from(value: &ScaledValue) -> Self {
        Self {
            raw: value.raw,
            unit: value.unit,
            value: value.value(),
        }
    }
}

impl Renderer {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            clear_screen: display.clear_screen,
            fields: display.fields.clone(),
            format: display.format,
            warned_paths: Mutex::new(HashSet::new()),
        }
    }

    pub fn render(&self, outcome: &PollOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.render_text(outcome)),
            OutputFormat::Json => self.render_json(outcome),
        }
    }

    fn render_text(&self, outcome: &PollOutcome) -> String {
        let mut frame = String::new();
        if self.clear_screen {
            frame.push_str(defaults::display::CLEAR_SEQUENCE);
        }

        match outcome {
            PollOutcome::Fresh(sample) => self.write_sample(&mut frame, &sample.as_sample()),
            PollOutcome::Stale { error, last } => {
                if let Some((format_revision, content_revision)) = error.unknown_variant() {
                    let _ = writeln!(
                        frame,
                        "format_revision = {}, content_revision = {}",
                        format_revision, content_revision
                    );
                    let _ = writeln!(frame, "unsupported metrics table");
                    return frame;
                }
                match last {
                    Some(sample) => {
                        self.write_sample(&mut frame, &sample.as_sample());
                        let _ = writeln!(frame, "stale: {}", error);
                    }
                    None => {
                        let _ = writeln!(frame, "no sample: {}", error);
                    }
                }
            }
        }
        frame
    }

    /// Header lines plus one line per selected field
    pub fn write_sample(&self, frame: &mut String, sample: &DecodedSample<'_>) {
        let header = sample.header();
        let _ = writeln!(
            frame,
            "format_revision = {}, content_revision = {}",
            header.format_revision, header.content_revision
        );
        let _ = writeln!(frame, "Parsing {}", sample.variant().name);

        for (label, value) in self.selected(sample) {
            let _ = writeln!(frame, "{}: {}", label, join_elements(&value));
        }
    }

    fn render_json(&self, outcome: &PollOutcome) -> Result<String> {
        let (error, stale) = match outcome {
            PollOutcome::Fresh(_) => (None, false),
            PollOutcome::Stale { error, .. } => (Some(error), true),
        };

        let mut frame = JsonFrame {
            format_revision: None,
            content_revision: None,
            variant: None,
            stale,
            error: error.map(|e| e.to_string()),
            fields: serde_json::Map::new(),
        };

        if let Some((f, c)) = error.and_then(|e| e.unknown_variant()) {
            frame.format_revision = Some(f);
            frame.content_revision = Some(c);
        } else if let Some(owned) = outcome.sample() {
            let sample = owned.as_sample();
            frame.format_revision = Some(sample.header().format_revision);
            frame.content_revision = Some(sample.header().content_revision);
            frame.variant = Some(owned.variant().name);
            for (label, value) in self.selected(&sample) {
                let json = match &value {
                    FieldValue::Scalar(v) => serde_json::to_value(JsonValue::from(v))?,
                    FieldValue::Array(values) => serde_json::to_value(
                        values.iter().map(JsonValue::from).collect::<Vec<_>>(),
                    )?,
                };
                frame.fields.insert(label, json);
            }
        }

        let mut line = serde_json::to_string(&frame)?;
        line.push('\n');
        Ok(line)
    }

    /// Configured field paths, or the variant's default set when none are
    /// configured. Fields the variant does not have are skipped.
    fn selected(&self, sample: &DecodedSample<'_>) -> Vec<(String, FieldValue)> {
        if self.fields.is_empty() {
            return sample
                .variant()
                .default_display
                .iter()
                .filter_map(|name| sample.value(name).map(|value| (name.to_string(), value)))
                .collect();
        }

        self.fields
            .iter()
            .filter_map(|path| match lookup(sample, path) {
                Ok(value) => value.map(|value| (path.clone(), value)),
                Err(error) => {
                    let mut warned = self.warned_paths.lock().unwrap_or_else(PoisonError::into_inner);
                    if warned.insert(path.clone()) {
                        warn!("Skipping display field {:?} for {}: {}", path, sample.variant().name, error);
                    } else {
                        debug!("Skipping display field {:?}: {}", path, error);
                    }
                    None
                }
            })
            .collect()
    }
}

/// `Ok(None)` when the variant has no such field
fn lookup(sample: &DecodedSample<'_>, path: &str) -> DecodeResult<Option<FieldValue>> {
    let parsed = FieldPath::parse(path)?;
    Ok(match parsed.index {
        Some(index) => sample.element(&parsed.name, index)?.map(FieldValue::Scalar),
        None => sample.value(&parsed.name),
    })
}

fn join_elements(value: &FieldValue) -> String {
    value
        .elements()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
