//! Rendering-Oberfläche für Track-Symbole und SVG-Export.

mod svg_document;
mod symbol_layer;

pub use svg_document::render_svg_document;
pub use symbol_layer::{SymbolLayer, SymbolMut};
