//! Flotten-Snapshot (JSON) → Track-Symbole.
//!
//! Das Format liefert Winkel in Grad und Geschwindigkeiten in Knoten; die
//! Umrechnung in Radiant bzw. m/s passiert hier.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{
    bearing_degrees, knots_to_meters_per_second, LatLng, ShapeOptions, TrackSymbol,
    TrackSymbolOptions, WebMercatorView,
};
use crate::render::SymbolLayer;

/// Letzter bekannter Zustand eines Fahrzeugs/Schiffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselState {
    /// Eindeutige ID (wird zur Symbol-ID)
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Aktuelle Position
    #[serde(default)]
    pub position: Option<LatLng>,
    /// Heading in Grad (ab Nord, im Uhrzeigersinn)
    #[serde(default)]
    pub heading: Option<f64>,
    /// Kurs über Grund in Grad (ab Nord, im Uhrzeigersinn)
    #[serde(default)]
    pub course: Option<f64>,
    /// Geschwindigkeit in Knoten
    #[serde(default)]
    pub speed: Option<f64>,
    /// Vorherige Position, dient als Kurs-Ersatz wenn `course` fehlt
    #[serde(default)]
    pub previous_position: Option<LatLng>,
}

impl VesselState {
    /// Kurs in Grad: gemeldet oder aus vorheriger → aktueller Position abgeleitet.
    pub fn effective_course_degrees(&self) -> Option<f64> {
        self.course.or_else(|| match (self.previous_position, self.position) {
            (Some(previous), Some(current)) if previous != current => {
                Some(bearing_degrees(previous, current))
            }
            _ => None,
        })
    }

    /// Baut ein Track-Symbol; schlägt fehl, wenn keine Position vorliegt.
    pub fn to_track_symbol(&self, shape_options: Option<ShapeOptions>) -> Result<TrackSymbol> {
        let options = TrackSymbolOptions {
            heading: self.heading.map(f64::to_radians),
            course: self.effective_course_degrees().map(f64::to_radians),
            speed: self.speed.map(knots_to_meters_per_second),
            shape_options,
        };
        TrackSymbol::try_new(self.position, options)
            .with_context(|| format!("Fahrzeug '{}' hat keine Position", self.id))
    }
}

/// Momentaufnahme der Flotte.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub vessels: Vec<VesselState>,
}

impl FleetSnapshot {
    /// Mittelwert aller bekannten Positionen, `None` ohne Positionen.
    pub fn mean_position(&self) -> Option<LatLng> {
        let positions: Vec<LatLng> = self.vessels.iter().filter_map(|v| v.position).collect();
        if positions.is_empty() {
            return None;
        }
        let n = positions.len() as f64;
        let (lat, lng) = positions
            .iter()
            .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
        Some(LatLng::new(lat / n, lng / n))
    }

    /// Erstellt einen Layer mit allen Fahrzeugen, die eine Position haben.
    ///
    /// Fahrzeuge ohne Position werden mit Warnung übersprungen.
    pub fn into_layer(self, view: WebMercatorView, shape_options: &ShapeOptions) -> SymbolLayer {
        let mut layer = SymbolLayer::new(view);
        for vessel in self.vessels {
            match vessel.to_track_symbol(Some(shape_options.clone())) {
                Ok(symbol) => {
                    if layer.attach(vessel.id.clone(), symbol).is_some() {
                        log::warn!("Doppelte Fahrzeug-ID '{}', ältere Daten ersetzt", vessel.id);
                    }
                }
                Err(e) => log::warn!("Fahrzeug übersprungen: {:#}", e),
            }
        }
        layer
    }
}

/// Parsed einen Flotten-Snapshot aus einem JSON-String
pub fn parse_fleet_snapshot(json_content: &str) -> Result<FleetSnapshot> {
    serde_json::from_str(json_content).context("Flotten-Snapshot ist kein gültiges JSON")
}

/// Lädt einen Flotten-Snapshot aus einer Datei
pub fn load_fleet_snapshot(path: &std::path::Path) -> Result<FleetSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Fehler beim Laden des Snapshots: {}", path.display()))?;
    parse_fleet_snapshot(&content)
        .with_context(|| format!("Fehler beim Parsen des Snapshots: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn vessel(id: &str) -> VesselState {
        VesselState {
            id: id.to_owned(),
            name: None,
            position: Some(LatLng::new(-23.0, -43.0)),
            heading: None,
            course: None,
            speed: None,
            previous_position: None,
        }
    }

    #[test]
    fn test_units_are_converted() {
        let mut state = vessel("a");
        state.heading = Some(90.0);
        state.course = Some(180.0);
        state.speed = Some(10.0);

        let symbol = state.to_track_symbol(None).unwrap();
        assert_relative_eq!(symbol.heading().unwrap(), PI / 2.0);
        assert_relative_eq!(symbol.course().unwrap(), PI);
        assert_relative_eq!(symbol.speed().unwrap(), 5.144_444, epsilon = 1e-6);
    }

    #[test]
    fn test_course_derived_from_previous_position() {
        let mut state = vessel("a");
        state.previous_position = Some(LatLng::new(-23.0, -43.1));
        assert_relative_eq!(state.effective_course_degrees().unwrap(), 90.0);

        state.course = Some(12.0);
        assert_eq!(state.effective_course_degrees(), Some(12.0));

        // Gleiche Position → keine Richtung ableitbar
        let mut parked = vessel("b");
        parked.previous_position = parked.position;
        assert_eq!(parked.effective_course_degrees(), None);
    }

    #[test]
    fn test_missing_position_is_error_with_vessel_id() {
        let mut state = vessel("ohne-position");
        state.position = None;
        let err = state.to_track_symbol(None).unwrap_err();
        assert!(format!("{:#}", err).contains("ohne-position"));
    }

    #[test]
    fn test_mean_position_ignores_missing() {
        let mut snapshot = FleetSnapshot {
            vessels: vec![vessel("a"), vessel("b"), vessel("c")],
        };
        snapshot.vessels[1].position = Some(LatLng::new(-21.0, -41.0));
        snapshot.vessels[2].position = None;
        assert_eq!(snapshot.mean_position(), Some(LatLng::new(-22.0, -42.0)));
        assert_eq!(FleetSnapshot::default().mean_position(), None);
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(parse_fleet_snapshot("{ vessels: ").is_err());
        let empty = parse_fleet_snapshot("{}").unwrap();
        assert!(empty.vessels.is_empty());
    }
}
