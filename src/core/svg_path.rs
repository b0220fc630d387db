//! SVG-Pfaddaten (`d`-Attribut) aus Pixel-Punkten.

use glam::DVec2;

/// Erzeugt `M x y L x y ...`, optional mit abschließendem `Z`.
///
/// Leere Punktliste ergibt einen leeren String.
pub fn to_svg_path(points: &[DVec2], close: bool) -> String {
    let mut path = String::new();
    for (i, point) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        if !path.is_empty() {
            path.push(' ');
        }
        path.push_str(&format!("{} {} {}", command, point.x, point.y));
    }
    if close && !path.is_empty() {
        path.push_str(" Z");
    }
    path
}

/// Kombiniert geschlossenen Umriss und offene Leader-Linie zu einem Pfad.
pub fn compose_symbol_path(shape_points: &[DVec2], leader_points: Option<&[DVec2]>) -> String {
    let mut path = to_svg_path(shape_points, true);
    if let Some(leader) = leader_points {
        let leader_path = to_svg_path(leader, false);
        if !leader_path.is_empty() {
            if !path.is_empty() {
                path.push(' ');
            }
            path.push_str(&leader_path);
        }
    }
    path
}
