//! Symbol-Formen: Katalog, Shape-Sets und Auswahl nach Zoom-Level.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Standard-Symbolgröße in Pixeln.
pub const DEFAULT_SIZE: f64 = 24.0;
/// Standard-Vorlaufzeit der Leader-Linie in Sekunden.
pub const DEFAULT_LEADER_TIME: f64 = 60.0;

/// Standard-Umriss bei bekanntem Heading (Pfeilspitze zeigt entlang +x).
pub const DEFAULT_HEADING_SHAPE_POINTS: [[f64; 2]; 3] = [[0.75, 0.0], [-0.25, 0.3], [-0.25, -0.3]];
/// Standard-Umriss ohne Heading (Raute).
pub const DEFAULT_NOHEADING_SHAPE_POINTS: [[f64; 2]; 4] =
    [[0.3, 0.0], [0.0, 0.3], [-0.3, 0.0], [0.0, -0.3]];

/// Einheit, in der `length`/`breadth` einer Form interpretiert werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeUnits {
    /// Bildschirm-Pixel, unabhängig vom Zoom
    #[default]
    Pixels,
    /// Meter, skaliert mit dem Zoom
    Meters,
}

/// Umriss aus normalisierten Punkten (ca. -1..1) plus Skalierung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Normalisierte Umrisspunkte, +x = Bug-Richtung
    pub points: Vec<DVec2>,
    /// Skalierung entlang x (Länge)
    pub length: f64,
    /// Skalierung entlang y (Breite)
    pub breadth: f64,
    /// Optionaler Drehpunkt in normalisierten Koordinaten
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<DVec2>,
    #[serde(default)]
    pub units: ShapeUnits,
}

impl Shape {
    /// Pixel-Form mit gleicher Länge und Breite.
    pub fn pixels(points: &[[f64; 2]], size: f64) -> Self {
        Self {
            points: points.iter().copied().map(DVec2::from).collect(),
            length: size,
            breadth: size,
            center: None,
            units: ShapeUnits::Pixels,
        }
    }
}

/// Formenpaar für bekanntes und unbekanntes Heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSet {
    pub with_heading: Shape,
    pub without_heading: Shape,
}

impl ShapeSet {
    /// Standard-Formen in der gegebenen Pixelgröße.
    pub fn with_size(size: f64) -> Self {
        Self {
            with_heading: Shape::pixels(&DEFAULT_HEADING_SHAPE_POINTS, size),
            without_heading: Shape::pixels(&DEFAULT_NOHEADING_SHAPE_POINTS, size),
        }
    }

    /// Wählt die Form abhängig davon, ob ein Heading bekannt ist.
    pub fn select(&self, has_heading: bool) -> &Shape {
        if has_heading {
            &self.with_heading
        } else {
            &self.without_heading
        }
    }
}

impl Default for ShapeSet {
    fn default() -> Self {
        Self::with_size(DEFAULT_SIZE)
    }
}

/// Shape-Set, das ab einem Mindest-Zoom-Level gilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSetEntry {
    pub min_zoom_level: f64,
    pub shape_set: ShapeSet,
}

/// Form-Konfiguration eines Track-Symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeOptions {
    /// Vorlaufzeit der Leader-Linie in Sekunden
    #[serde(default = "default_leader_time")]
    pub leader_time: f64,
    /// Fallback, wenn kein Eintrag zum Zoom passt
    #[serde(default)]
    pub default_shape_set: ShapeSet,
    /// Zoomabhängige Shape-Sets. Die Auswahl setzt absteigende Sortierung nach
    /// `min_zoom_level` voraus, siehe [`ShapeOptions::normalize`].
    #[serde(default, deserialize_with = "deserialize_sorted_entries")]
    pub shape_set_entries: Vec<ShapeSetEntry>,
}

fn default_leader_time() -> f64 {
    DEFAULT_LEADER_TIME
}

fn sort_entries(entries: &mut [ShapeSetEntry]) {
    entries.sort_by(|a, b| b.min_zoom_level.total_cmp(&a.min_zoom_level));
}

fn deserialize_sorted_entries<'de, D>(deserializer: D) -> Result<Vec<ShapeSetEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let mut entries = Vec::<ShapeSetEntry>::deserialize(deserializer)?;
    sort_entries(&mut entries);
    Ok(entries)
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            leader_time: DEFAULT_LEADER_TIME,
            default_shape_set: ShapeSet::default(),
            shape_set_entries: Vec::new(),
        }
    }
}

impl ShapeOptions {
    /// Erstellt Optionen und sortiert die Einträge absteigend nach Zoom-Schwelle.
    pub fn new(
        leader_time: f64,
        default_shape_set: ShapeSet,
        shape_set_entries: Vec<ShapeSetEntry>,
    ) -> Self {
        let mut options = Self {
            leader_time,
            default_shape_set,
            shape_set_entries,
        };
        options.normalize();
        options
    }

    /// Sortiert die Einträge absteigend (stabil) nach `min_zoom_level`.
    pub fn normalize(&mut self) {
        sort_entries(&mut self.shape_set_entries);
    }

    /// Liefert das Shape-Set mit der höchsten Schwelle ≤ `zoom`, sonst den Default.
    ///
    /// Unabhängig von der gespeicherten Reihenfolge; bei gleicher Schwelle
    /// gewinnt der zuerst gespeicherte Eintrag.
    pub fn shape_set_for_zoom(&self, zoom: f64) -> &ShapeSet {
        self.shape_set_entries
            .iter()
            .filter(|entry| zoom >= entry.min_zoom_level)
            .fold(None::<&ShapeSetEntry>, |best, entry| match best {
                Some(current) if current.min_zoom_level >= entry.min_zoom_level => Some(current),
                _ => Some(entry),
            })
            .map(|entry| &entry.shape_set)
            .unwrap_or(&self.default_shape_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(min_zoom_level: f64, size: f64) -> ShapeSetEntry {
        ShapeSetEntry {
            min_zoom_level,
            shape_set: ShapeSet::with_size(size),
        }
    }

    #[test]
    fn test_shape_set_for_zoom_picks_highest_matching_threshold() {
        let set_a = ShapeSet::with_size(40.0);
        let set_b = ShapeSet::with_size(16.0);
        let options = ShapeOptions::new(
            DEFAULT_LEADER_TIME,
            ShapeSet::default(),
            vec![entry(10.0, 40.0), entry(5.0, 16.0)],
        );

        assert_eq!(options.shape_set_for_zoom(7.0), &set_b);
        assert_eq!(options.shape_set_for_zoom(12.0), &set_a);
        assert_eq!(options.shape_set_for_zoom(10.0), &set_a);
        assert_eq!(options.shape_set_for_zoom(2.0), &ShapeSet::default());
    }

    #[test]
    fn test_entries_are_sorted_descending_regardless_of_input_order() {
        let options = ShapeOptions::new(
            DEFAULT_LEADER_TIME,
            ShapeSet::default(),
            vec![entry(3.0, 8.0), entry(14.0, 64.0), entry(8.0, 24.0)],
        );
        let levels: Vec<f64> = options
            .shape_set_entries
            .iter()
            .map(|e| e.min_zoom_level)
            .collect();
        assert_eq!(levels, vec![14.0, 8.0, 3.0]);
        assert_eq!(options.shape_set_for_zoom(9.0), &ShapeSet::with_size(24.0));
    }

    #[test]
    fn test_shape_set_for_zoom_ignores_stored_order() {
        let options = ShapeOptions {
            shape_set_entries: vec![entry(5.0, 16.0), entry(10.0, 40.0), entry(10.0, 48.0)],
            ..ShapeOptions::default()
        };

        assert_eq!(options.shape_set_for_zoom(12.0), &ShapeSet::with_size(40.0));
        assert_eq!(options.shape_set_for_zoom(7.0), &ShapeSet::with_size(16.0));
        assert_eq!(options.shape_set_for_zoom(2.0), &ShapeSet::default());
    }

    #[test]
    fn test_empty_entries_fall_back_to_default() {
        let options = ShapeOptions::default();
        assert_eq!(options.shape_set_for_zoom(18.0), &options.default_shape_set);
    }

    #[test]
    fn test_select_by_heading() {
        let set = ShapeSet::default();
        assert_eq!(set.select(true).points.len(), 3);
        assert_eq!(set.select(false).points.len(), 4);
    }

    #[test]
    fn test_deserialized_entries_are_sorted() {
        let options: ShapeOptions = serde_json::from_str(
            r#"{
                "shape_set_entries": [
                    {"min_zoom_level": 4.0, "shape_set": {
                        "with_heading": {"points": [[1.0, 0.0]], "length": 8.0, "breadth": 8.0},
                        "without_heading": {"points": [[0.0, 1.0]], "length": 8.0, "breadth": 8.0}
                    }},
                    {"min_zoom_level": 12.0, "shape_set": {
                        "with_heading": {"points": [[1.0, 0.0]], "length": 48.0, "breadth": 48.0},
                        "without_heading": {"points": [[0.0, 1.0]], "length": 48.0, "breadth": 48.0}
                    }}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(options.leader_time, DEFAULT_LEADER_TIME);
        assert_eq!(options.shape_set_entries[0].min_zoom_level, 12.0);
        assert_eq!(options.shape_set_for_zoom(13.0).with_heading.length, 48.0);
        assert_eq!(options.shape_set_for_zoom(5.0).with_heading.length, 8.0);
    }

    #[test]
    fn test_shape_deserializes_with_default_units() {
        let shape: Shape = serde_json::from_str(
            r#"{"points": [[1.0, 0.0], [-1.0, 0.5]], "length": 30.0, "breadth": 10.0}"#,
        )
        .unwrap();
        assert_eq!(shape.units, ShapeUnits::Pixels);
        assert_eq!(shape.center, None);
        assert_eq!(shape.points[1], DVec2::new(-1.0, 0.5));

        let meters: ShapeUnits = serde_json::from_str(r#""meters""#).unwrap();
        assert_eq!(meters, ShapeUnits::Meters);
    }
}
