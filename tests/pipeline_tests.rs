use regionmap::prelude::*;

/// End-to-end checks of one layout pass: projection, correction,
/// tessellation and labels as a host would see them
#[cfg(test)]
mod pipeline_tests {
    use super::*;

    const NODES: &str = r#"[
        {"id": "sma", "label": "Åarjelsaemien", "anchor": {"lon": 14.0, "lat": 64.0}},
        {"id": "sju", "label": "Ubmejesámiengiella", "anchor": {"lon": 17.5, "lat": 65.5}, "slot": "left"},
        {"id": "smj", "label": "Julevsámegiella", "anchor": {"lon": 17.0, "lat": 67.3}, "slot": "right"},
        {"id": "sme", "label": "Davvisámegiella", "anchor": {"lon": 23.5, "lat": 69.3}, "slot": "bottom"},
        {"id": "fkv", "label": "Kvääni", "anchor": {"lon": 26.0, "lat": 70.2}, "link": "/kven"}
    ]"#;

    fn ring(lon: f64, lat: f64, radius: f64, points: usize) -> Vec<GeoPoint> {
        (0..=points)
            .map(|i| {
                let angle = i as f64 / points as f64 * std::f64::consts::TAU;
                GeoPoint::new(lon + radius * angle.cos(), lat + radius * angle.sin() / 2.0)
            })
            .collect()
    }

    fn region(id: &str, lon: f64, lat: f64, radius: f64) -> Region {
        Region::new(id, vec![GeoPolygon::new(vec![ring(lon, lat, radius, 80)])])
    }

    fn build(viewport: Viewport) -> MapSession {
        MapBuilder::new()
            .with_viewport(viewport)
            .with_region(region("NO", 12.0, 64.0, 5.0))
            .with_region(region("FO", -7.0, 62.0, 0.3))
            .with_region(region("GL", -40.0, 72.0, 6.0))
            .with_nodes(Node::list_from_json(NODES).unwrap())
            .build()
            .unwrap()
    }

    /// Test that the fitted window lands inside the viewport
    #[test]
    fn test_projection_fits_viewport() {
        for (width, height) in [(800.0, 1200.0), (1600.0, 400.0), (320.0, 320.0)] {
            let viewport = Viewport::new(width, height);
            let config = ProjectionConfig::default();
            let projection = Projection::from_config(&config, &viewport);

            let corners = config.bounds.fit_corners();
            let projected: Vec<Point> = corners.iter().map(|c| projection.project(c)).collect();
            let fitted = Bounds::from_points(projected.iter()).unwrap();

            assert!(fitted.min.x >= -1.0 && fitted.min.y >= -1.0);
            assert!(fitted.max.x <= width + 1.0 && fitted.max.y <= height + 1.0);
            let touches_x = (fitted.width() - width).abs() < 1.0;
            let touches_y = (fitted.height() - height).abs() < 1.0;
            assert!(
                touches_x || touches_y,
                "fitted {:?} does not touch {}x{}",
                fitted,
                width,
                height
            );
        }
    }

    /// Test that corrected regions are computed once per session
    #[test]
    fn test_correction_runs_once_per_region() {
        let mut session = build(Viewport::new(800.0, 1200.0));
        for width in [400.0, 900.0, 1200.0] {
            session.resize(Viewport::new(width, width * 1.5));
        }
        assert_eq!(session.layout_passes(), 4);
        // NO has no correction entry
        assert_eq!(session.regions().corrections_applied(), 2);

        let raw = session.regions().raw("FO").unwrap();
        let corrected = session.regions().geometry("FO").unwrap();
        assert_ne!(raw, corrected);
        let correction = CorrectionTable::default().get("FO").copied().unwrap();
        assert_ne!(&correction.apply(corrected), corrected);
    }

    /// Test that every sampled point belongs to its nearest node's cell only
    #[test]
    fn test_cells_partition_viewport() {
        let session = build(Viewport::new(800.0, 1200.0));
        let layout = session.layout().unwrap();
        let positions = &layout.positions;

        for ix in 0..20 {
            for iy in 0..30 {
                let point = Point::new(ix as f64 * 40.0 + 7.0, iy as f64 * 40.0 + 3.0);
                let mut distances: Vec<(f64, usize)> = positions
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (p.distance_squared(&point), i))
                    .collect();
                distances.sort_by(|a, b| a.0.total_cmp(&b.0));
                if (distances[1].0 - distances[0].0).abs() < 1e-6 {
                    continue;
                }
                let nearest = distances[0].1;

                assert_eq!(layout.tessellation.cell_at(&point), Some(nearest));
                let owners: Vec<usize> = layout
                    .tessellation
                    .cells()
                    .iter()
                    .filter(|cell| cell.contains(&point))
                    .map(|cell| cell.index)
                    .collect();
                assert_eq!(owners, vec![nearest]);
            }
        }
    }

    /// Test label sizes and slot directions
    #[test]
    fn test_labels_sit_in_their_slots() {
        let session = build(Viewport::new(800.0, 1200.0));
        let layout = session.layout().unwrap();

        for (node, label) in session.nodes().iter().zip(layout.labels.labels()) {
            assert!(label.width > 0.0 && label.height > 0.0, "{} is degenerate", node.id);
            let position = layout.positions[label.node];
            let offset = label.center.subtract(&position);
            assert!(offset.dot(&node.slot.direction()) > 0.0, "{} is on the wrong side", node.id);
            assert!(!label.bounds().contains(&position));
        }
    }

    /// Test the font size across a range of widths
    #[test]
    fn test_font_size_tracks_width() {
        let mut session = build(Viewport::new(100.0, 150.0));
        let mut previous = 0.0;
        for width in (100..=5000).step_by(100) {
            session.resize(Viewport::new(width as f64, 600.0));
            let font_size = session.layout().unwrap().labels.font_size();
            assert!((9.0..=32.0).contains(&font_size));
            assert!(font_size >= previous);
            previous = font_size;
        }
        assert_eq!(previous, 32.0);
    }

    /// Test that an unavailable measurement degrades to empty label boxes
    #[test]
    fn test_unmeasured_labels_are_empty() {
        let session = MapBuilder::new()
            .with_viewport(Viewport::new(800.0, 1200.0))
            .with_nodes(Node::list_from_json(NODES).unwrap())
            .with_measure(|_: &str, _: f64| -> Option<TextExtent> { None })
            .build()
            .unwrap();
        let layout = session.layout().unwrap();
        assert!(layout
            .labels
            .labels()
            .iter()
            .all(|label| label.width == 0.0 && label.height == 0.0));
        assert!(layout.labels.overlaps().is_empty());
    }

    /// Test that GeoJSON regions come through to the SVG output
    #[test]
    fn test_geojson_to_svg() {
        let coordinates: Vec<String> = ring(15.0, 63.0, 3.0, 60)
            .iter()
            .map(|p| format!("[{},{}]", p.lon, p.lat))
            .collect();
        let geojson = format!(
            r#"{{"type":"FeatureCollection","features":[{{"type":"Feature","properties":{{"id":"SE"}},"geometry":{{"type":"Polygon","coordinates":[[{}]]}}}}]}}"#,
            coordinates.join(",")
        );

        let session = MapBuilder::new()
            .with_viewport(Viewport::new(800.0, 1200.0))
            .with_region_geojson("SE", &geojson)
            .unwrap()
            .with_nodes(Node::list_from_json(NODES).unwrap())
            .build()
            .unwrap();

        let svg = session.scene().to_svg().unwrap();
        assert!(svg.contains("class=\"country-SE\""));
        assert!(svg.contains("font-weight=\"bold\""));
        assert_eq!(svg.matches("<circle").count(), 5);
    }
}
