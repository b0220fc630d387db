/// Integration-Tests: Snapshot + Optionen → Layer → SVG
use approx::assert_relative_eq;
use fleet_track_symbol::{
    parse_fleet_snapshot, render_svg_document, LatLng, SymbolLayer, SymbolOptions,
};
use std::path::Path;

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_options() -> SymbolOptions {
    SymbolOptions::load_from_file(&fixture_path("symbol_options.toml"))
}

fn build_layer() -> SymbolLayer {
    let options = load_options();
    let snapshot =
        parse_fleet_snapshot(include_str!("fixtures/fleet_snapshot.json")).unwrap();
    let view = options.to_view(snapshot.mean_position().unwrap());
    snapshot.into_layer(view, &options.to_shape_options())
}

#[test]
fn test_options_fixture_is_loaded() {
    let options = load_options();

    assert_relative_eq!(options.leader_time_s, 120.0);
    assert_relative_eq!(options.view_zoom, 12.0);
    assert_eq!(options.view_center, Some(LatLng::new(-22.9, -43.15)));
    assert_eq!(options.zoom_symbol_sizes.len(), 2);
    assert_eq!(options.style.background_color.as_deref(), Some("#e6f0ff"));
}

#[test]
fn test_parse_snapshot_accepts_both_position_forms() {
    let snapshot =
        parse_fleet_snapshot(include_str!("fixtures/fleet_snapshot.json")).unwrap();

    assert_eq!(snapshot.vessels.len(), 4);
    assert_eq!(
        snapshot.vessels[1].position,
        Some(LatLng::new(-22.91, -43.14))
    );
    assert_eq!(snapshot.vessels[2].position, None);
    assert_eq!(snapshot.vessels[0].name.as_deref(), Some("MS Nordlicht"));
}

#[test]
fn test_vessel_without_position_is_skipped() {
    let layer = build_layer();

    assert_eq!(layer.len(), 3);
    assert!(layer.symbol("ohne-ortung").is_none());
    assert!(layer.symbol("nordlicht").is_some());
}

#[test]
fn test_zoom_dependent_symbol_size_from_options() {
    let layer = build_layer();
    let symbol = layer.symbol("nordlicht").unwrap();

    // Zoom 12 ≥ 11 → größte passende Stufe
    assert_relative_eq!(symbol.shape_for_zoom(12.0).length, 30.0);
    assert_relative_eq!(symbol.shape_for_zoom(9.0).length, 16.0);
    assert_relative_eq!(symbol.shape_for_zoom(5.0).length, 20.0);
}

#[test]
fn test_leader_line_from_reported_and_derived_course() {
    let layer = build_layer();

    // Umriss + Leader-Linie
    assert_eq!(layer.path("nordlicht").unwrap().matches('M').count(), 2);
    assert_eq!(layer.path("ankerplatz-7").unwrap().matches('M').count(), 2);
    // Ohne Kurs und Geschwindigkeit nur der Umriss
    assert_eq!(layer.path("hochsee").unwrap().matches('M').count(), 1);

    // Abgeleiteter Kurs zeigt nach Norden → Leader-Ende liegt oberhalb
    let geometry = layer.symbol("ankerplatz-7").unwrap().geometry().unwrap();
    let [start, end] = geometry.leader_points.unwrap();
    assert!(end.y < start.y);
    assert_relative_eq!(end.x, start.x, epsilon = 1e-6);
}

#[test]
fn test_svg_document_contains_visible_vessels_only() {
    let options = load_options();
    let layer = build_layer();
    let svg = render_svg_document(&layer, &options.style).unwrap();

    assert!(svg.contains(r#"<path id="nordlicht""#));
    assert!(svg.contains(r#"<path id="ankerplatz-7""#));
    assert!(!svg.contains(r#"id="hochsee""#));
    assert!(svg.contains(r##"fill="#ff8800""##));
    assert!(svg.contains("<rect"));
    assert!(svg.contains(r#"width="800" height="600""#));
}
