//! Projektions-Oberfläche der Karte und sphärische Web-Mercator-Ansicht.
//!
//! Layer-Punkte sind Welt-Pixel abzüglich eines Pixel-Ursprungs, der beim
//! Setzen der Ansicht festgelegt wird (linke obere Ecke des Viewports).

use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI};

use super::bounds::PixelBounds;
use super::geo::{LatLng, LatLngBounds};

/// Erdradius der sphärischen Mercator-Projektion (EPSG:3857) in Metern.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;
/// Maximale darstellbare Breite der Web-Mercator-Projektion.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;
/// Kachelgröße in Pixeln bei Zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Von einer Karte bereitgestellte Projektion zwischen Lat/Lng und Layer-Pixeln.
pub trait MapProjection {
    /// Aktueller Zoom-Level
    fn zoom(&self) -> f64;

    /// Lat/Lng → Layer-Pixel
    fn lat_lng_to_layer_point(&self, lat_lng: LatLng) -> DVec2;

    /// Layer-Pixel → Lat/Lng
    fn layer_point_to_lat_lng(&self, point: DVec2) -> LatLng;
}

/// Kartenansicht mit Mittelpunkt, Zoom und Viewport-Größe.
#[derive(Debug, Clone)]
pub struct WebMercatorView {
    center: LatLng,
    zoom: f64,
    viewport_size: DVec2,
    pixel_origin: DVec2,
}

impl WebMercatorView {
    /// Minimaler Zoom-Level.
    pub const ZOOM_MIN: f64 = 0.0;
    /// Maximaler Zoom-Level.
    pub const ZOOM_MAX: f64 = 22.0;

    /// Erstellt eine neue Ansicht
    pub fn new(center: LatLng, zoom: f64, viewport_size: DVec2) -> Self {
        let mut view = Self {
            center,
            zoom: 0.0,
            viewport_size,
            pixel_origin: DVec2::ZERO,
        };
        view.set_view(center, zoom);
        view
    }

    /// Setzt Mittelpunkt und Zoom und berechnet den Pixel-Ursprung neu.
    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.zoom = zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
        self.pixel_origin = (project(center, self.zoom) - self.viewport_size / 2.0).round();
    }

    /// Ändert nur den Zoom-Level (Mittelpunkt bleibt)
    pub fn set_zoom(&mut self, zoom: f64) {
        self.set_view(self.center, zoom);
    }

    /// Ändert die Viewport-Größe (Mittelpunkt bleibt)
    pub fn resize(&mut self, viewport_size: DVec2) {
        self.viewport_size = viewport_size;
        self.set_view(self.center, self.zoom);
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn viewport_size(&self) -> DVec2 {
        self.viewport_size
    }

    /// Welt-Pixel der linken oberen Viewport-Ecke
    pub fn pixel_origin(&self) -> DVec2 {
        self.pixel_origin
    }

    /// Sichtbarer Bereich in Layer-Pixeln.
    ///
    /// Durch die Rundung des Pixel-Ursprungs kann der Bereich um bis zu einen
    /// halben Pixel gegenüber `[0, viewport_size]` verschoben sein.
    pub fn viewport_layer_bounds(&self) -> PixelBounds {
        let top_left = project(self.center, self.zoom) - self.viewport_size / 2.0
            - self.pixel_origin;
        PixelBounds {
            min: top_left,
            max: top_left + self.viewport_size,
        }
    }

    /// Sichtbarer Bereich als Lat/Lng-Rechteck
    pub fn viewport_lat_lng_bounds(&self) -> LatLngBounds {
        let bounds = self.viewport_layer_bounds();
        LatLngBounds::new(
            self.layer_point_to_lat_lng(bounds.bottom_left()),
            self.layer_point_to_lat_lng(bounds.top_right()),
        )
    }
}

impl MapProjection for WebMercatorView {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn lat_lng_to_layer_point(&self, lat_lng: LatLng) -> DVec2 {
        project(lat_lng, self.zoom) - self.pixel_origin
    }

    fn layer_point_to_lat_lng(&self, point: DVec2) -> LatLng {
        unproject(point + self.pixel_origin, self.zoom)
    }
}

/// Weltgröße in Pixeln bei gegebenem Zoom.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2.0_f64.powf(zoom)
}

/// Lat/Lng → Welt-Pixel (Ursprung oben links bei 180°W / 85.05°N).
pub fn project(lat_lng: LatLng, zoom: f64) -> DVec2 {
    let lat = lat_lng.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin = lat.to_radians().sin();
    let x = EARTH_RADIUS_M * lat_lng.lng.to_radians();
    let y = EARTH_RADIUS_M * ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;

    let scale = 0.5 / (PI * EARTH_RADIUS_M);
    DVec2::new(scale * x + 0.5, -scale * y + 0.5) * world_size(zoom)
}

/// Welt-Pixel → Lat/Lng (Umkehrung von [`project`]).
pub fn unproject(point: DVec2, zoom: f64) -> LatLng {
    let scale = 0.5 / (PI * EARTH_RADIUS_M);
    let normalized = point / world_size(zoom);
    let x = (normalized.x - 0.5) / scale;
    let y = (normalized.y - 0.5) / -scale;

    LatLng::new(
        (2.0 * (y / EARTH_RADIUS_M).exp().atan() - FRAC_PI_2).to_degrees(),
        (x / EARTH_RADIUS_M).to_degrees(),
    )
}
