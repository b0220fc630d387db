//! SVG-Export eines kompletten Symbol-Layers.

use anyhow::Result;
use std::fmt::Write;

use super::symbol_layer::SymbolLayer;
use crate::shared::SymbolStyle;

/// Rendert alle sichtbaren Symbole als eigenständiges SVG-Dokument.
///
/// Der `viewBox` entspricht dem Viewport in Layer-Pixeln.
pub fn render_svg_document(layer: &SymbolLayer, style: &SymbolStyle) -> Result<String> {
    let viewport = layer.view().viewport_layer_bounds();
    let size = viewport.size();

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="{} {} {} {}">"#,
        size.x, size.y, viewport.min.x, viewport.min.y, size.x, size.y
    )?;

    if let Some(background) = &style.background_color {
        writeln!(
            svg,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            viewport.min.x,
            viewport.min.y,
            size.x,
            size.y,
            escape_attribute(background)
        )?;
    }

    writeln!(
        svg,
        r#"  <g fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}" stroke-linejoin="round">"#,
        escape_attribute(&style.fill_color),
        style.fill_opacity,
        escape_attribute(&style.stroke_color),
        style.stroke_width
    )?;

    let mut rendered = 0usize;
    for id in layer.visible_ids() {
        let Some(path) = layer.path(id) else {
            continue;
        };
        writeln!(
            svg,
            r#"    <path id="{}" d="{}"/>"#,
            escape_attribute(id),
            path
        )?;
        rendered += 1;
    }

    writeln!(svg, "  </g>")?;
    writeln!(svg, "</svg>")?;

    log::debug!("SVG-Dokument mit {} von {} Symbolen", rendered, layer.len());
    Ok(svg)
}

/// Maskiert Zeichen, die in einem XML-Attribut nicht roh stehen dürfen.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
