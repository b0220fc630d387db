//! Fleet Track Symbol.
//!
//! Rendert einen Flotten-Snapshot als SVG mit einem Track-Symbol pro Fahrzeug.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fleet_track_symbol::{load_fleet_snapshot, render_svg_document, LatLng, SymbolOptions};

#[derive(Parser)]
#[command(name = "fleet-track-symbol")]
#[command(about = "Render vessel track symbols of a fleet snapshot as SVG", long_about = None)]
struct Args {
    /// Fleet snapshot (JSON)
    #[arg(long)]
    snapshot: PathBuf,

    /// Output SVG file
    #[arg(long)]
    output: PathBuf,

    /// Options file (TOML), defaults to fleet_track_symbol.toml next to the binary
    #[arg(long)]
    options: Option<PathBuf>,

    /// Zoom level, overrides the options file
    #[arg(long)]
    zoom: Option<f64>,

    /// Map center as "lat,lng", defaults to the mean vessel position
    #[arg(long, value_parser = parse_center, allow_hyphen_values = true)]
    center: Option<LatLng>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Write the effective options back to the options file
    #[arg(long)]
    save_options: bool,
}

fn parse_center(value: &str) -> Result<LatLng, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("erwartet \"lat,lng\", erhalten: {}", value))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("ungültige Breite '{}': {}", lat.trim(), e))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("ungültige Länge '{}': {}", lng.trim(), e))?;
    Ok(LatLng::new(lat, lng))
}

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Fleet Track Symbol v{} startet...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // Optionen aus TOML laden (oder Standardwerte)
    let options_path = args.options.clone().unwrap_or_else(SymbolOptions::config_path);
    let mut options = SymbolOptions::load_from_file(&options_path);
    apply_overrides(&mut options, &args);

    let snapshot = load_fleet_snapshot(&args.snapshot)?;
    log::info!("{} Fahrzeuge im Snapshot", snapshot.vessels.len());

    let fallback_center = snapshot.mean_position().unwrap_or(LatLng::new(0.0, 0.0));
    let view = options.to_view(fallback_center);
    let layer = snapshot.into_layer(view, &options.to_shape_options());

    let svg = render_svg_document(&layer, &options.style)?;
    std::fs::write(&args.output, svg)
        .with_context(|| format!("Fehler beim Schreiben: {}", args.output.display()))?;
    log::info!(
        "{} Symbole nach {} geschrieben",
        layer.len(),
        args.output.display()
    );

    if args.save_options {
        options.save_to_file(&options_path)?;
    }
    Ok(())
}

/// Überschreibt Optionen mit Kommandozeilen-Werten.
fn apply_overrides(options: &mut SymbolOptions, args: &Args) {
    if let Some(zoom) = args.zoom {
        options.view_zoom = zoom;
    }
    if let Some(center) = args.center {
        options.view_center = Some(center);
    }
    if let Some(width) = args.width {
        options.viewport_size[0] = width;
    }
    if let Some(height) = args.height {
        options.viewport_size[1] = height;
    }
}
