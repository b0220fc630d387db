//! Core-Domänentypen: Geo-Mathematik, Projektion, Formen und Track-Symbol.

pub mod bounds;
pub mod geo;
pub mod projection;
pub mod shape;
pub mod svg_path;
/// Track-Symbol-Entität
///
/// Hält Position, Heading, Kurs und Geschwindigkeit und berechnet daraus
/// Umriss, Leader-Linie und Bounding-Boxen gegen eine `MapProjection`.
pub mod track_symbol;
pub mod transform;

pub use bounds::PixelBounds;
pub use geo::{
    bearing_degrees, knots_to_meters_per_second, meters_to_latitude_degrees,
    meters_to_longitude_degrees, model_angle_to_view_angle, LatLng, LatLngBounds,
    EARTH_CIRCUMFERENCE_M,
};
pub use projection::{MapProjection, WebMercatorView};
pub use shape::{Shape, ShapeOptions, ShapeSet, ShapeSetEntry, ShapeUnits};
pub use svg_path::{compose_symbol_path, to_svg_path};
pub use track_symbol::{ProjectedGeometry, SymbolEvent, TrackSymbol, TrackSymbolOptions};
pub use transform::{shape_matrix, transform_shape_points};
