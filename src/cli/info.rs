use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[cfg(feature = "colorized_output")]
use console::style;

use trackmate::storage::read_table;
use trackmate::xml::{TrackMateDocument, TrackMateParser};
use trackmate::{FilterRule, SpotTable};

/// Summary of a TrackMate XML session
#[derive(Debug, Serialize)]
struct DocumentSummary {
    file: String,
    version: Option<String>,
    spatial_units: Option<String>,
    time_units: Option<String>,
    frames: usize,
    spots: usize,
    tracks: Option<usize>,
    filtered_tracks: Option<usize>,
    spot_features: Vec<String>,
    initial_filter: Option<String>,
    spot_filters: Vec<String>,
}

/// Summary of a Parquet or CSV spot table
#[derive(Debug, Serialize)]
struct TableSummary {
    file: String,
    version: Option<String>,
    spatial_units: Option<String>,
    time_units: Option<String>,
    spots: usize,
    labels: Option<usize>,
    columns: Vec<String>,
}

/// Display information about a TrackMate XML file or a spot table
pub fn run(file: PathBuf, tracks: bool, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let is_xml = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"));

    if is_xml {
        let summary = summarize_document(&file, tracks)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_document(&summary);
        }
    } else {
        let table = read_table(&file)
            .with_context(|| format!("Failed to read spot table: {}", file.display()))?;
        let summary = summarize_table(&file, &table);
        if json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_table(&summary);
        }
    }

    Ok(())
}

fn summarize_document(file: &Path, tracks: bool) -> Result<DocumentSummary> {
    let handle = File::open(file).context("Failed to open file")?;
    let doc: TrackMateDocument = TrackMateParser::new(BufReader::new(handle))
        .with_tracks(tracks)
        .parse()
        .with_context(|| format!("Failed to parse TrackMate XML: {}", file.display()))?;

    Ok(DocumentSummary {
        file: file.display().to_string(),
        version: doc.version.clone(),
        spatial_units: doc.spatial_units.clone(),
        time_units: doc.time_units.clone(),
        frames: doc.frames.len(),
        spots: doc.spot_count(),
        tracks: doc.tracks.as_ref().map(Vec::len),
        filtered_tracks: doc.filtered_track_ids.as_ref().map(Vec::len),
        spot_features: doc.feature_names().map(str::to_string).collect(),
        initial_filter: doc.initial_filter.as_ref().map(describe_filter),
        spot_filters: doc.spot_filters.iter().map(describe_filter).collect(),
    })
}

fn summarize_table(file: &Path, table: &SpotTable) -> TableSummary {
    let info = table.document_info();
    let labels = table.labels().ok().map(|labels| {
        labels
            .iter()
            .flatten()
            .collect::<HashSet<i64>>()
            .len()
    });

    TableSummary {
        file: file.display().to_string(),
        version: info.version,
        spatial_units: info.spatial_units,
        time_units: info.time_units,
        spots: table.num_rows(),
        labels,
        columns: table.column_names(),
    }
}

fn describe_filter(rule: &FilterRule) -> String {
    let op = if rule.is_above { ">" } else { "<" };
    format!("{} {} {}", rule.feature, op, rule.value)
}

fn heading(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        style(text).bold().cyan().to_string()
    }
    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}

fn label(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        style(text).bold().to_string()
    }
    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}

fn or_unset(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("<unset>")
}

fn print_document(summary: &DocumentSummary) {
    println!("{}", heading("TrackMate Session"));
    println!("{}", heading("================="));
    println!("{}: {}", label("File"), summary.file);
    println!("{}: {}", label("Version"), or_unset(&summary.version));
    println!(
        "{}: {} / {}",
        label("Units"),
        or_unset(&summary.spatial_units),
        or_unset(&summary.time_units)
    );
    println!();

    println!("{}", label("Spot Model:"));
    println!("  Frames: {}", summary.frames);
    println!("  Spots: {}", summary.spots);
    if let Some(tracks) = summary.tracks {
        println!("  Tracks: {}", tracks);
    }
    if let Some(retained) = summary.filtered_tracks {
        println!("  Retained tracks: {}", retained);
    }
    println!();

    println!("{}", label("Spot Filters:"));
    match &summary.initial_filter {
        Some(rule) => println!("  Initial: {}", rule),
        None => println!("  Initial: <none>"),
    }
    for rule in &summary.spot_filters {
        println!("  {}", rule);
    }
    println!();

    println!("{}", label("Spot Features:"));
    for (i, feature) in summary.spot_features.iter().enumerate() {
        println!("  {:3}. {}", i + 1, feature);
    }
}

fn print_table(summary: &TableSummary) {
    println!("{}", heading("Spot Table"));
    println!("{}", heading("=========="));
    println!("{}: {}", label("File"), summary.file);
    println!("{}: {}", label("Version"), or_unset(&summary.version));
    println!(
        "{}: {} / {}",
        label("Units"),
        or_unset(&summary.spatial_units),
        or_unset(&summary.time_units)
    );
    println!();

    println!("{}", label("Statistics:"));
    println!("  Spots: {}", summary.spots);
    match summary.labels {
        Some(labels) => println!("  Distinct labels: {}", labels),
        None => println!("  Distinct labels: <no label column>"),
    }
    println!();

    println!("{}", label("Columns:"));
    for (i, column) in summary.columns.iter().enumerate() {
        println!("  {:3}. {}", i + 1, column);
    }
}
