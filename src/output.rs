use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use beatlane::{BeatKind, Chart};

#[derive(Serialize)]
struct ChartFile {
    duration_ms: f64,
    note_count: usize,
    notes: Vec<NoteRecord>,
}

#[derive(Serialize)]
struct NoteRecord {
    time_ms: f64,
    lane: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<BeatKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    intensity: Option<f64>,
}

pub fn render_json(chart: &Chart, pretty: bool, diagnostics: bool) -> Result<String> {
    let file = ChartFile {
        duration_ms: chart.duration_ms,
        note_count: chart.len(),
        notes: chart
            .notes()
            .iter()
            .map(|n| NoteRecord {
                time_ms: n.time_ms,
                lane: n.lane,
                kind: diagnostics.then_some(n.kind),
                intensity: diagnostics.then_some(n.intensity),
            })
            .collect(),
    };
    let json = if pretty {
        serde_json::to_string_pretty(&file)
    } else {
        serde_json::to_string(&file)
    };
    json.context("Failed to serialize chart")
}

/// Write to `path`, or stdout when `to_stdout` is set.
pub fn write_chart(json: &str, path: &Path, to_stdout: bool) -> Result<()> {
    if to_stdout {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", json).context("Failed to write chart to stdout")?;
        return Ok(());
    }
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    log::info!("Chart written to {}", path.display());
    Ok(())
}
