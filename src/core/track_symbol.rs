//! Track-Symbol: Fahrzeug-/Schiffs-Icon mit Heading, Kurs und Geschwindigkeit.
//!
//! Setter speichern nur den Wert und markieren einen Redraw-Wunsch. Die
//! Geometrie wird erst mit [`TrackSymbol::project`] gegen eine Karte berechnet;
//! das übernimmt normalerweise der besitzende `SymbolLayer`.

use anyhow::Result;
use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::bounds::PixelBounds;
use super::geo::{
    model_angle_to_view_angle, offset_lat_lng, relative_lat_lng, LatLng, LatLngBounds,
};
use super::projection::MapProjection;
use super::shape::{Shape, ShapeOptions, ShapeUnits};
use super::svg_path::compose_symbol_path;
use super::transform::transform_shape_points;

/// Benachrichtigung, die ein Symbol bei Zustandsänderungen einreiht.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SymbolEvent {
    /// Position wurde geändert
    Move { old_lat_lng: LatLng, lat_lng: LatLng },
}

/// Optionale Startwerte eines Track-Symbols.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackSymbolOptions {
    /// Heading (Radiant, ab Nord im Uhrzeigersinn)
    pub heading: Option<f64>,
    /// Kurs über Grund (Radiant, ab Nord im Uhrzeigersinn)
    pub course: Option<f64>,
    /// Geschwindigkeit (m/s)
    pub speed: Option<f64>,
    /// Form-Optionen, `None` = Standard-Formen
    pub shape_options: Option<ShapeOptions>,
}

/// Gegen eine Karte projizierte Geometrie eines Symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedGeometry {
    /// Umrisspunkte in Layer-Pixeln
    pub shape_points: Vec<DVec2>,
    /// Start- und Endpunkt der Leader-Linie in Layer-Pixeln
    pub leader_points: Option<[DVec2; 2]>,
    /// Bounding-Box über Umriss und Leader-Linie
    pub pixel_bounds: Option<PixelBounds>,
    /// Lat/Lng-Gegenstück zu `pixel_bounds`
    pub lat_lng_bounds: Option<LatLngBounds>,
}

impl ProjectedGeometry {
    /// SVG-Pfaddaten: geschlossener Umriss, optional offene Leader-Linie.
    pub fn path_data(&self) -> String {
        compose_symbol_path(
            &self.shape_points,
            self.leader_points.as_ref().map(|points| points.as_slice()),
        )
    }
}

/// Kartensymbol eines verfolgten Objekts.
#[derive(Debug, Clone)]
pub struct TrackSymbol {
    lat_lng: LatLng,
    heading: Option<f64>,
    course: Option<f64>,
    speed: Option<f64>,
    shape_options: ShapeOptions,

    geometry: Option<ProjectedGeometry>,
    redraw_requested: bool,
    events: Vec<SymbolEvent>,
}

impl TrackSymbol {
    /// Erstellt ein neues Symbol an der gegebenen Position.
    pub fn new(lat_lng: impl Into<LatLng>, options: TrackSymbolOptions) -> Self {
        let mut symbol = Self {
            lat_lng: lat_lng.into(),
            heading: options.heading,
            course: options.course,
            speed: options.speed,
            shape_options: ShapeOptions::default(),
            geometry: None,
            redraw_requested: true,
            events: Vec::new(),
        };
        symbol.apply_shape_options(options.shape_options);
        symbol
    }

    /// Wie [`TrackSymbol::new`], aber mit optionaler Position aus externen Daten.
    ///
    /// Fehlt die Position, schlägt die Erstellung sofort fehl.
    pub fn try_new(lat_lng: Option<LatLng>, options: TrackSymbolOptions) -> Result<Self> {
        let Some(lat_lng) = lat_lng else {
            anyhow::bail!("Track-Symbol benötigt eine Position (lat_lng fehlt)");
        };
        Ok(Self::new(lat_lng, options))
    }

    fn apply_shape_options(&mut self, shape_options: Option<ShapeOptions>) {
        let mut shape_options = shape_options.unwrap_or_default();
        shape_options.normalize();
        self.shape_options = shape_options;
    }

    // ── Setter ──────────────────────────────────────────────────────

    /// Setzt die Position und reiht ein `Move`-Event ein.
    ///
    /// Events bleiben bis [`TrackSymbol::take_events`] liegen; ein `SymbolLayer`
    /// entnimmt sie bei jedem Rendern.
    pub fn set_lat_lng(&mut self, lat_lng: impl Into<LatLng>) -> &mut Self {
        let old_lat_lng = self.lat_lng;
        self.lat_lng = lat_lng.into();
        self.events.push(SymbolEvent::Move {
            old_lat_lng,
            lat_lng: self.lat_lng,
        });
        self.request_redraw()
    }

    /// Setzt das Heading (Radiant, ab Nord im Uhrzeigersinn), `None` = unbekannt.
    pub fn set_heading(&mut self, heading: impl Into<Option<f64>>) -> &mut Self {
        self.heading = heading.into();
        self.request_redraw()
    }

    /// Setzt den Kurs über Grund (Radiant, ab Nord im Uhrzeigersinn).
    pub fn set_course(&mut self, course: impl Into<Option<f64>>) -> &mut Self {
        self.course = course.into();
        self.request_redraw()
    }

    /// Setzt die Geschwindigkeit (m/s).
    pub fn set_speed(&mut self, speed: impl Into<Option<f64>>) -> &mut Self {
        self.speed = speed.into();
        self.request_redraw()
    }

    /// Ersetzt die Form-Optionen, `None` = Standard-Formen.
    pub fn set_shape_options(&mut self, shape_options: Option<ShapeOptions>) -> &mut Self {
        self.apply_shape_options(shape_options);
        self.request_redraw()
    }

    fn request_redraw(&mut self) -> &mut Self {
        self.redraw_requested = true;
        self
    }

    // ── Getter ──────────────────────────────────────────────────────

    pub fn lat_lng(&self) -> LatLng {
        self.lat_lng
    }

    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    pub fn course(&self) -> Option<f64> {
        self.course
    }

    pub fn speed(&self) -> Option<f64> {
        self.speed
    }

    pub fn shape_options(&self) -> &ShapeOptions {
        &self.shape_options
    }

    /// Zuletzt projizierte Geometrie (`None` vor der ersten Projektion)
    pub fn geometry(&self) -> Option<&ProjectedGeometry> {
        self.geometry.as_ref()
    }

    /// Lat/Lng-Bounding-Box der letzten Projektion
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.geometry.as_ref().and_then(|g| g.lat_lng_bounds)
    }

    /// Pixel-Bounding-Box der letzten Projektion
    pub fn pixel_bounds(&self) -> Option<PixelBounds> {
        self.geometry.as_ref().and_then(|g| g.pixel_bounds)
    }

    /// Gibt zurück, ob seit der letzten Projektion ein Setter aufgerufen wurde.
    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// Entnimmt alle eingereihten Events.
    pub fn take_events(&mut self) -> Vec<SymbolEvent> {
        std::mem::take(&mut self.events)
    }

    /// Form für den gegebenen Zoom-Level, abhängig davon ob ein Heading bekannt ist.
    pub fn shape_for_zoom(&self, zoom: f64) -> &Shape {
        self.shape_options
            .shape_set_for_zoom(zoom)
            .select(self.heading.is_some())
    }

    // ── Projektion ─────────────────────────────────────────────────

    /// Berechnet Umriss, Leader-Linie und Bounding-Boxen gegen die Karte.
    pub fn project(&mut self, map: &impl MapProjection) -> &ProjectedGeometry {
        let shape_points = self.projected_shape_points(map);
        let leader_points = self.leader_points(map);

        let pixel_bounds = PixelBounds::from_points(
            shape_points
                .iter()
                .chain(leader_points.iter().flat_map(|points| points.iter())),
        );
        let lat_lng_bounds = pixel_bounds.map(|bounds| {
            LatLngBounds::new(
                map.layer_point_to_lat_lng(bounds.bottom_left()),
                map.layer_point_to_lat_lng(bounds.top_right()),
            )
        });

        self.redraw_requested = false;
        self.geometry.insert(ProjectedGeometry {
            shape_points,
            leader_points,
            pixel_bounds,
            lat_lng_bounds,
        })
    }

    /// SVG-Pfaddaten der letzten Projektion (`None` vor der ersten Projektion).
    pub fn path_data(&self) -> Option<String> {
        self.geometry.as_ref().map(ProjectedGeometry::path_data)
    }

    /// Projiziert neu und liefert die SVG-Pfaddaten.
    pub fn redraw(&mut self, map: &impl MapProjection) -> String {
        self.project(map).path_data()
    }

    fn projected_shape_points(&self, map: &impl MapProjection) -> Vec<DVec2> {
        let shape = self.shape_for_zoom(map.zoom());
        let points = transform_shape_points(shape, self.heading);
        match shape.units {
            ShapeUnits::Pixels => {
                let origin = map.lat_lng_to_layer_point(self.lat_lng);
                points.into_iter().map(|point| origin + point).collect()
            }
            ShapeUnits::Meters => points
                .into_iter()
                .map(|point| {
                    map.lat_lng_to_layer_point(offset_lat_lng(self.lat_lng, point.x, point.y))
                })
                .collect(),
        }
    }

    fn leader_points(&self, map: &impl MapProjection) -> Option<[DVec2; 2]> {
        let (course, speed) = (self.course?, self.speed?);
        let angle = model_angle_to_view_angle(course);
        let leader_length = speed * self.shape_options.leader_time;
        let end = relative_lat_lng(self.lat_lng, leader_length, angle);
        Some([
            map.lat_lng_to_layer_point(self.lat_lng),
            map.lat_lng_to_layer_point(end),
        ])
    }
}
