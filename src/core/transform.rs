//! Reine Transformations-Funktionen für Symbol-Umrisse.
//!
//! Kennt weder Karte noch Projektion, nur Form und Heading.

use glam::{DAffine2, DVec2};

use super::geo::model_angle_to_view_angle;
use super::shape::Shape;

/// Baut die Affin-Matrix `R(heading) · T(-center) · S(length, breadth)`.
///
/// Auf einen Punkt wirkt zuerst die Skalierung, dann die Verschiebung um den
/// negativen Drehpunkt, zuletzt die Rotation. Ohne Heading keine Rotation.
pub fn shape_matrix(shape: &Shape, heading: Option<f64>) -> DAffine2 {
    let mut matrix = DAffine2::IDENTITY;
    if let Some(heading) = heading {
        matrix = matrix * DAffine2::from_angle(model_angle_to_view_angle(heading));
    }
    if let Some(center) = shape.center {
        matrix = matrix * DAffine2::from_translation(-center);
    }
    matrix * DAffine2::from_scale(DVec2::new(shape.length, shape.breadth))
}

/// Wendet [`shape_matrix`] auf alle Umrisspunkte an.
///
/// Ergebnis liegt noch in der Einheit der Form (Pixel oder Meter) relativ zur Position.
pub fn transform_shape_points(shape: &Shape, heading: Option<f64>) -> Vec<DVec2> {
    let matrix = shape_matrix(shape, heading);
    shape
        .points
        .iter()
        .map(|point| matrix.transform_point2(*point))
        .collect()
}
