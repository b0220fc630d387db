//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die sowohl vom Binary (Ansicht, Formen)
//! als auch vom SVG-Export (Stil) gelesen werden.

pub mod options;

pub use options::{SymbolOptions, SymbolStyle, ZoomSymbolSize};
