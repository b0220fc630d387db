//! Geografische Grundtypen und Meter↔Grad-Umrechnungen.
//!
//! Winkel im Modell sind Radiant, im Uhrzeigersinn ab Nord. Im View-Raum gilt
//! +x = Ost, +y = Süd (Bildschirm-Konvention, y nach unten).

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Erdumfang am Äquator in Metern.
pub const EARTH_CIRCUMFERENCE_M: f64 = 40_075_017.0;

/// Meter pro Seemeile.
const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Geografische Position in Grad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LatLngRepr")]
pub struct LatLng {
    /// Breitengrad (Grad, Nord positiv)
    pub lat: f64,
    /// Längengrad (Grad, Ost positiv)
    pub lng: f64,
}

/// Akzeptiert sowohl `[lat, lng]` als auch `{ "lat": .., "lng": .. }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LatLngRepr {
    Pair([f64; 2]),
    Object { lat: f64, lng: f64 },
}

impl From<LatLngRepr> for LatLng {
    fn from(repr: LatLngRepr) -> Self {
        match repr {
            LatLngRepr::Pair([lat, lng]) => Self { lat, lng },
            LatLngRepr::Object { lat, lng } => Self { lat, lng },
        }
    }
}

impl LatLng {
    /// Erstellt eine neue Position
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Achsenparalleles Lat/Lng-Rechteck (Südwest- und Nordost-Ecke).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    /// Südwest-Ecke
    pub south_west: LatLng,
    /// Nordost-Ecke
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Erstellt Bounds aus zwei beliebigen Ecken.
    pub fn new(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// Prüft, ob eine Position innerhalb (inklusive Rand) liegt.
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }

    /// Prüft, ob sich zwei Rechtecke überlappen oder berühren.
    pub fn intersects(&self, other: &LatLngBounds) -> bool {
        self.south_west.lat <= other.north_east.lat
            && self.north_east.lat >= other.south_west.lat
            && self.south_west.lng <= other.north_east.lng
            && self.north_east.lng >= other.south_west.lng
    }

    /// Mittelpunkt des Rechtecks
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

/// Rechnet eine Nord-Süd-Distanz (m) in Breitengrad-Differenz um.
pub fn meters_to_latitude_degrees(distance: f64) -> f64 {
    distance / EARTH_CIRCUMFERENCE_M * 360.0
}

/// Rechnet eine Ost-West-Distanz (m) in Längengrad-Differenz auf gegebener Breite um.
///
/// Bei ±90° geht `cos` gegen 0 und das Ergebnis gegen unendlich; nicht abgefangen.
pub fn meters_to_longitude_degrees(distance: f64, at_latitude_degrees: f64) -> f64 {
    meters_to_latitude_degrees(distance) / at_latitude_degrees.to_radians().cos()
}

/// Wandelt einen Modellwinkel (ab Nord, im Uhrzeigersinn) in einen View-Winkel
/// (ab Ost, im Uhrzeigersinn bei y nach unten) um.
pub fn model_angle_to_view_angle(angle: f64) -> f64 {
    angle - FRAC_PI_2
}

/// Verschiebt eine Position um einen Meter-Offset im View-Raum (+x Ost, +y Süd).
///
/// Die Längengrad-Skalierung bezieht sich auf die Breite von `origin`.
pub fn offset_lat_lng(origin: LatLng, dx_m: f64, dy_m: f64) -> LatLng {
    LatLng::new(
        origin.lat - meters_to_latitude_degrees(dy_m),
        origin.lng + meters_to_longitude_degrees(dx_m, origin.lat),
    )
}

/// Position in `distance` Metern Entfernung entlang eines View-Winkels.
pub fn relative_lat_lng(origin: LatLng, distance: f64, view_angle: f64) -> LatLng {
    offset_lat_lng(
        origin,
        distance * view_angle.cos(),
        distance * view_angle.sin(),
    )
}

/// Planare Peilung von `from` nach `to` in Grad, normalisiert auf [0, 360).
///
/// Rechnet direkt in Grad-Differenzen ohne Breitenkorrektur; reicht für die
/// Richtung zwischen zwei aufeinanderfolgenden Track-Positionen.
pub fn bearing_degrees(from: LatLng, to: LatLng) -> f64 {
    let theta = (to.lng - from.lng).atan2(to.lat - from.lat).to_degrees();
    if theta < 0.0 { theta + 360.0 } else { theta }
}

/// Knoten → Meter pro Sekunde.
pub fn knots_to_meters_per_second(knots: f64) -> f64 {
    knots * METERS_PER_NAUTICAL_MILE / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_latitude_degrees_for_quarter_circumference() {
        assert_relative_eq!(
            meters_to_latitude_degrees(EARTH_CIRCUMFERENCE_M / 4.0),
            90.0
        );
        assert_relative_eq!(meters_to_latitude_degrees(0.0), 0.0);
    }

    #[test]
    fn test_longitude_degrees_grow_with_latitude() {
        let at_equator = meters_to_longitude_degrees(1000.0, 0.0);
        let at_60 = meters_to_longitude_degrees(1000.0, 60.0);
        assert_relative_eq!(at_equator, meters_to_latitude_degrees(1000.0));
        // cos(60°) = 0.5 → doppelte Grad-Differenz
        assert_relative_eq!(at_60, at_equator * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_view_angle_of_north_points_up() {
        assert_relative_eq!(model_angle_to_view_angle(0.0), -PI / 2.0);
        assert_relative_eq!(model_angle_to_view_angle(PI / 2.0), 0.0);
    }

    #[test]
    fn test_relative_lat_lng_north_and_east() {
        let origin = LatLng::new(10.0, 20.0);

        let north = relative_lat_lng(origin, 1000.0, model_angle_to_view_angle(0.0));
        assert!(north.lat > origin.lat);
        assert_relative_eq!(north.lng, origin.lng, epsilon = 1e-12);

        let east = relative_lat_lng(origin, 1000.0, model_angle_to_view_angle(PI / 2.0));
        assert!(east.lng > origin.lng);
        assert_relative_eq!(east.lat, origin.lat, epsilon = 1e-12);
    }

    #[test]
    fn test_bearing_degrees_quadrants() {
        let origin = LatLng::new(0.0, 0.0);
        assert_relative_eq!(bearing_degrees(origin, LatLng::new(1.0, 0.0)), 0.0);
        assert_relative_eq!(bearing_degrees(origin, LatLng::new(0.0, 1.0)), 90.0);
        assert_relative_eq!(bearing_degrees(origin, LatLng::new(-1.0, 0.0)), 180.0);
        assert_relative_eq!(bearing_degrees(origin, LatLng::new(0.0, -1.0)), 270.0);
    }

    #[test]
    fn test_knots_to_meters_per_second() {
        assert_relative_eq!(knots_to_meters_per_second(1.0), 0.514_444, epsilon = 1e-6);
        assert_relative_eq!(knots_to_meters_per_second(0.0), 0.0);
    }

    #[test]
    fn test_lat_lng_deserializes_pair_and_object() {
        let pair: LatLng = serde_json::from_str("[52.5, 13.4]").unwrap();
        let object: LatLng = serde_json::from_str(r#"{"lat": 52.5, "lng": 13.4}"#).unwrap();
        assert_eq!(pair, object);
    }

    #[test]
    fn test_bounds_contains_and_intersects() {
        let a = LatLngBounds::new(LatLng::new(1.0, 1.0), LatLng::new(-1.0, -1.0));
        assert_eq!(a.south_west, LatLng::new(-1.0, -1.0));
        assert!(a.contains(LatLng::new(0.0, 0.5)));
        assert!(!a.contains(LatLng::new(2.0, 0.0)));

        let b = LatLngBounds::new(LatLng::new(0.5, 0.5), LatLng::new(3.0, 3.0));
        let c = LatLngBounds::new(LatLng::new(5.0, 5.0), LatLng::new(6.0, 6.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.center(), LatLng::new(0.0, 0.0));
    }
}
