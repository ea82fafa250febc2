//! Measure command - perimeter and area of property boundaries.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use fdx_core::survey::{boundary_measurements, total_measurements, Coordinate, Measurement};

/// Arguments for the measure command.
#[derive(Args)]
pub struct MeasureArgs {
    /// JSON file holding an array of boundaries, each an array of [x, y] points
    #[arg(required = true)]
    input: PathBuf,
}

#[derive(Serialize)]
struct MeasureReport {
    boundaries: Vec<Measurement>,
    total: Measurement,
}

pub async fn run(args: MeasureArgs) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.input)?;
    let raw: Vec<Vec<[f64; 2]>> = serde_json::from_str(&content)?;

    let boundaries: Vec<Vec<Coordinate>> = raw
        .into_iter()
        .map(|points| points.into_iter().map(Coordinate::from).collect())
        .collect();

    let report = MeasureReport {
        boundaries: boundaries.iter().map(|b| boundary_measurements(b)).collect(),
        total: total_measurements(&boundaries),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
