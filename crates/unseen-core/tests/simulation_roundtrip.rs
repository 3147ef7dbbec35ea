use unseen_core::{
    Deficiency, MemoryNode, MemorySurface, NodeId, Rgb, SimulationEngine, SimulationError,
    SimulationParams, StyleProperty, StyleSurface, parse_color, parse_gradient,
};

fn assert_close(actual: Rgb, expected: Rgb, tol: i16) {
    let pairs = [
        (actual.r, expected.r),
        (actual.g, expected.g),
        (actual.b, expected.b),
    ];
    for (i, (a, e)) in pairs.into_iter().enumerate() {
        let diff = (i16::from(a) - i16::from(e)).abs();
        assert!(
            diff <= tol,
            "channel {} mismatch: got {}, expected {}, diff {} > {}",
            i,
            a,
            e,
            diff,
            tol
        );
    }
}

/// A small page: a heading, a card with a gradient and shadow, and a
/// transparent wrapper.
fn page() -> MemorySurface {
    let json = r#"[
        {
            "id": 1,
            "style": {
                "color": "rgb(255, 0, 0)",
                "background-color": "rgba(0, 0, 0, 0)"
            }
        },
        {
            "id": 2,
            "style": {
                "color": "rgb(0, 255, 0)",
                "border-color": "rgb(0, 0, 255)",
                "background-image": "linear-gradient(to right, rgb(255, 0, 0) 0%, rgb(0, 0, 255) 100%)",
                "box-shadow": "rgba(0, 0, 0, 0.2) 0px 2px 8px 0px"
            },
            "inline": {
                "border-color": "rgb(0, 0, 255)",
                "box-shadow": "rgba(0, 0, 0, 0.2) 0px 2px 8px 0px"
            }
        },
        {
            "id": 3,
            "style": {
                "background-color": "transparent",
                "background-image": "none"
            }
        }
    ]"#;
    serde_json::from_str(json).expect("fixture should deserialize")
}

fn inline(surface: &MemorySurface, id: u64, property: StyleProperty) -> String {
    surface.inline(NodeId(id), property).unwrap()
}

#[test]
fn protanopia_red_text() {
    let red = parse_color("rgb(255, 0, 0)").unwrap();
    assert_close(Deficiency::Protanopia.simulate(red), Rgb::new(43, 43, 0), 2);
}

#[test]
fn achromatopsia_green_text() {
    let green = parse_color("rgb(0, 255, 0)").unwrap();
    assert_close(Deficiency::Achromatopsia.simulate(green), Rgb::new(182, 182, 182), 1);
}

#[test]
fn rgba_alpha_is_discarded() {
    assert_eq!(parse_color("rgba(10, 20, 30, 0.5)"), Some(Rgb::new(10, 20, 30)));
}

#[test]
fn gradient_shape_survives_every_deficiency() {
    let input = "linear-gradient(180deg, rgb(12, 34, 56) 0%, rgba(200, 100, 50, 0.8) 40%, rgb(0, 0, 0) 75px, rgb(255, 255, 255))";
    let parsed = parse_gradient(input).unwrap();
    for d in Deficiency::all() {
        let out = parsed.simulate(*d).reconstruct();
        assert!(out.starts_with("linear-gradient(180deg, "), "{out}");
        let again = parse_gradient(&out).unwrap();
        assert_eq!(again.stops.len(), 4);
        let positions: Vec<_> = again.stops.iter().map(|s| s.position.clone()).collect();
        let expected: Vec<_> = parsed.stops.iter().map(|s| s.position.clone()).collect();
        assert_eq!(positions, expected, "{out}");
    }
}

#[test]
fn simulate_page_then_restore() {
    let mut surface = page();
    let original = surface.clone();
    let mut engine = SimulationEngine::new();
    let params = SimulationParams::new(Deficiency::Protanopia);

    let ids = surface.ids();
    let report = engine.process_batch(&mut surface, ids, &params);
    assert!(report.is_clean(), "{:?}", report.failed);
    assert_eq!(report.processed, 3);
    assert_eq!(report.mutated, 2);
    assert_eq!(engine.pending(), 3);

    assert_eq!(inline(&surface, 1, StyleProperty::Color), "rgb(43, 43, 0)");
    assert_eq!(inline(&surface, 1, StyleProperty::BackgroundColor), "", "transparent stays unset");
    assert_eq!(inline(&surface, 2, StyleProperty::BorderColor), "rgb(0, 0, 255)");
    assert_eq!(
        inline(&surface, 2, StyleProperty::BackgroundImage),
        "linear-gradient(to right, rgb(43, 43, 0) 0%, rgb(0, 0, 255) 100%)"
    );
    assert_eq!(
        inline(&surface, 2, StyleProperty::BoxShadow),
        "rgba(0, 0, 0, 0.2) 0px 2px 8px 0px",
        "shadows are never recolored"
    );
    assert!(surface.node(NodeId(3)).unwrap().inline.is_empty());

    let restored = engine.restore_all(&mut surface);
    assert!(restored.is_clean());
    assert_eq!(restored.restored, 3);
    assert_eq!(engine.pending(), 0);
    assert_eq!(surface, original);
}

#[test]
fn first_snapshot_wins_across_passes() {
    let mut surface = MemorySurface::new();
    surface.insert(
        MemoryNode::new(NodeId(1))
            .with_style(StyleProperty::Color, "rgb(10, 200, 30)")
            .with_inline(StyleProperty::Color, "rgb(255, 0, 0)"),
    );
    let mut engine = SimulationEngine::new();

    engine
        .process(&mut surface, NodeId(1), &SimulationParams::new(Deficiency::Deuteranopia))
        .unwrap();
    let first = engine.cache().get(NodeId(1)).cloned().unwrap();

    // The rendered color is different now; a second pass must not re-snapshot.
    surface
        .set_inline(NodeId(1), StyleProperty::Color, "rgb(1, 2, 3)")
        .unwrap();
    let outcome = engine
        .process(&mut surface, NodeId(1), &SimulationParams::new(Deficiency::Achromatopsia))
        .unwrap();
    assert!(!outcome.newly_cached);
    assert_eq!(engine.cache().get(NodeId(1)), Some(&first));
    assert_eq!(first.color, "rgb(255, 0, 0)");

    engine.restore_all(&mut surface);
    assert_eq!(inline(&surface, 1, StyleProperty::Color), "rgb(255, 0, 0)");
}

#[test]
fn batch_continues_past_failing_nodes() {
    let mut surface = page();
    surface.insert(
        MemoryNode::new(NodeId(4))
            .with_style(StyleProperty::Color, "rgb(0, 0, 255)")
            .read_only(),
    );
    let mut engine = SimulationEngine::new();
    let params = SimulationParams::new(Deficiency::Tritanopia);

    let ids = [NodeId(1), NodeId(99), NodeId(4), NodeId(2)];
    let report = engine.process_batch(&mut surface, ids, &params);

    assert_eq!(report.processed, 2);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.failed[0], (NodeId(99), SimulationError::NodeUnavailable(NodeId(99))));
    assert!(matches!(report.failed[1].1, SimulationError::Rejected { node: NodeId(4), .. }));
    assert_ne!(inline(&surface, 2, StyleProperty::BackgroundImage), "");

    // The read-only node was snapshotted before its write failed.
    assert_eq!(engine.pending(), 3);
}

#[test]
fn restore_clears_cache_even_when_a_node_fails() {
    let mut surface = page();
    let mut engine = SimulationEngine::new();
    let params = SimulationParams::new(Deficiency::Achromatopsia);
    let ids = surface.ids();
    engine.process_batch(&mut surface, ids, &params);

    // Node 2 disappears before the reset.
    surface.remove(NodeId(2));
    let report = engine.restore_all(&mut surface);

    assert_eq!(report.restored, 2);
    assert_eq!(report.failed, [(NodeId(2), SimulationError::NodeUnavailable(NodeId(2)))]);
    assert!(engine.cache().is_empty());
    assert_eq!(inline(&surface, 1, StyleProperty::Color), "");

    // A second restore has nothing to do.
    let again = engine.restore_all(&mut surface);
    assert_eq!(again.restored, 0);
    assert!(again.is_clean());
}

#[test]
fn true_black_is_simulated_and_restorable() {
    let mut surface = MemorySurface::new();
    surface.insert(MemoryNode::new(NodeId(1)).with_style(StyleProperty::Color, "rgb(0, 0, 0)"));
    let mut engine = SimulationEngine::new();

    let outcome = engine
        .process(&mut surface, NodeId(1), &SimulationParams::new(Deficiency::Protanopia))
        .unwrap();
    assert_eq!(outcome.mutated, [StyleProperty::Color]);
    assert_eq!(inline(&surface, 1, StyleProperty::Color), "rgb(0, 0, 0)");

    engine.restore_all(&mut surface);
    assert_eq!(inline(&surface, 1, StyleProperty::Color), "");
}

#[test]
fn unknown_deficiency_is_rejected() {
    let err = "protan".parse::<Deficiency>().unwrap_err();
    assert!(matches!(err, SimulationError::InvalidArgument(_)));
}
