//! Fleet Track Symbol Library.
//! Geometrie und Projektion von Fahrzeug-Symbolen (Umriss + Leader-Linie)
//! als Library exportiert für Tests und Wiederverwendung.

pub mod core;
pub mod render;
pub mod shared;
pub mod snapshot;

pub use core::{
    LatLng, LatLngBounds, MapProjection, PixelBounds, Shape, ShapeOptions, ShapeSet,
    ShapeSetEntry, ShapeUnits, SymbolEvent, TrackSymbol, TrackSymbolOptions, WebMercatorView,
};
pub use render::{render_svg_document, SymbolLayer};
pub use shared::{SymbolOptions, SymbolStyle};
pub use snapshot::{load_fleet_snapshot, parse_fleet_snapshot, FleetSnapshot, VesselState};
