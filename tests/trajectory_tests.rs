//! End-to-end checks on trajectory documents: collision checking, smoothing
//! and playback working together through the public API.

use fieldpath_core::control::ease_in_out;
use fieldpath_core::navigation::curve_points;
use fieldpath_core::{
    evaluate_curve, sample_robot_state, PathError, PathOptimizer, TrajectoryDocument,
};
use serde_json::{json, Value};
use std::collections::HashMap;

fn document(value: Value) -> TrajectoryDocument {
    TrajectoryDocument::from_json(&value.to_string()).unwrap()
}

/// Gentle arc well clear of a single obstacle near the top of the field
fn clear_arc() -> TrajectoryDocument {
    document(json!({
        "startPoint": { "x": 20.0, "y": 20.0, "heading": "linear", "startDeg": 0.0, "endDeg": 90.0 },
        "lines": [{
            "endPoint": { "x": 120.0, "y": 20.0, "heading": "linear", "startDeg": 0.0, "endDeg": 90.0 },
            "controlPoints": [{ "x": 70.0, "y": 60.0 }],
            "color": "#3b82f6",
            "name": "Arc",
            "eventMarkers": [
                { "id": "m1", "name": "intake", "position": 0.25, "lineIndex": 0, "parameters": { "speed": 1 } }
            ]
        }],
        "shapes": [{
            "id": "wall",
            "vertices": [
                { "x": 60.0, "y": 100.0 }, { "x": 80.0, "y": 100.0 },
                { "x": 80.0, "y": 120.0 }, { "x": 60.0, "y": 120.0 }
            ]
        }],
        "settings": { "rWidth": 10.0, "rHeight": 10.0, "safetyMargin": 1.0, "optimizationQuality": 5 }
    }))
}

/// Run along y = 10 straight through a box sitting on the wall
fn blocked_run() -> TrajectoryDocument {
    document(json!({
        "startPoint": { "x": 10.0, "y": 10.0, "heading": "constant", "degrees": 0.0 },
        "lines": [{
            "endPoint": { "x": 130.0, "y": 10.0, "heading": "constant", "degrees": 0.0 },
            "controlPoints": [{ "x": 70.0, "y": 10.0 }]
        }],
        "shapes": [{
            "id": "box",
            "vertices": [
                { "x": 60.0, "y": 0.0 }, { "x": 80.0, "y": 0.0 },
                { "x": 80.0, "y": 20.0 }, { "x": 60.0, "y": 20.0 }
            ]
        }],
        "settings": { "rWidth": 2.0, "rHeight": 2.0, "safetyMargin": 0.0, "optimizationQuality": 1 }
    }))
}

#[test]
fn blocked_run_reports_first_hit() {
    let err = blocked_run().validate().unwrap_err();
    match &err {
        PathError::CollisionDetected { segment, x, y } => {
            assert_eq!(*segment, 1);
            assert!((x - 70.0).abs() < 1e-9);
            assert!((y - 10.0).abs() < 1e-9);
        }
        other => panic!("expected a collision, got {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains("segment 1"), "{}", message);
    assert!(message.contains("(70.0, 10.0)"), "{}", message);
}

#[test]
fn failed_optimize_returns_no_trajectory() {
    let doc = blocked_run();
    assert!(matches!(doc.optimize(), Err(PathError::CollisionDetected { .. })));
}

#[test]
fn validate_leaves_document_untouched() {
    let doc = clear_arc();
    let before = doc.clone();
    doc.validate().unwrap();
    assert_eq!(doc, before);
}

#[test]
fn repeated_optimization_converges() {
    let mut doc = clear_arc();
    let mut last_step = f64::INFINITY;
    for _ in 0..5 {
        let next = doc.optimize().unwrap();
        let before = doc.lines[0].control_points[0].position();
        let after = next.lines[0].control_points[0].position();
        let step = before.distance_to(&after);
        assert!(step > 0.0 && step < last_step);
        // smoothing never produces a trajectory that fails the check
        next.validate().unwrap();
        last_step = step;
        doc = next;
    }
}

#[test]
fn optimize_keeps_editor_metadata() {
    let doc = clear_arc();
    let optimized = doc.optimize().unwrap();
    let line = &optimized.lines[0];
    assert_eq!(line.color, "#3b82f6");
    assert_eq!(line.name.as_deref(), Some("Arc"));
    assert_eq!(line.event_markers, doc.lines[0].event_markers);
    assert_eq!(line.end_point, doc.lines[0].end_point);
    assert_eq!(optimized.shapes, doc.shapes);

    let reparsed = TrajectoryDocument::from_json(&optimized.to_json().unwrap()).unwrap();
    assert_eq!(reparsed, optimized);
}

#[test]
fn wider_robot_no_longer_fits() {
    let doc = clear_arc();
    let mut optimizer = PathOptimizer::new(doc.settings.clone());
    optimizer
        .validate(&doc.start_point, &doc.lines, &doc.shapes)
        .unwrap();

    let mut params = HashMap::new();
    params.insert("robot_width".to_string(), 40.0);
    params.insert("robot_height".to_string(), 40.0);
    optimizer.configure(&params).unwrap();

    let err = optimizer
        .validate(&doc.start_point, &doc.lines, &doc.shapes)
        .unwrap_err();
    assert!(matches!(err, PathError::BoundsViolation { segment: 1, .. }));
}

#[test]
fn playback_follows_the_curve() {
    let doc = clear_arc();
    let line = &doc.lines[0];

    let first = sample_robot_state(0.0, &doc.lines, &doc.start_point).unwrap();
    assert_eq!((first.x, first.y, first.heading), (20.0, 20.0, 0.0));

    let half = sample_robot_state(50.0, &doc.lines, &doc.start_point).unwrap();
    let points = curve_points(&doc.start_point, &line.control_points, &line.end_point);
    let expected = evaluate_curve(ease_in_out(0.5), &points);
    assert_eq!((half.x, half.y), (expected.x, expected.y));
    assert!((half.heading - 45.0).abs() < 1e-9);
}

#[test]
fn heading_crosses_north_the_short_way() {
    let doc = document(json!({
        "startPoint": { "x": 30.0, "y": 30.0, "heading": "constant", "degrees": 350.0 },
        "lines": [{
            "endPoint": { "x": 60.0, "y": 30.0, "heading": "linear", "startDeg": 350.0, "endDeg": 10.0 }
        }]
    }));
    let half = sample_robot_state(50.0, &doc.lines, &doc.start_point).unwrap();
    let wrapped = half.heading.rem_euclid(360.0);
    assert!(wrapped < 1e-9 || wrapped > 360.0 - 1e-9, "got {}", half.heading);
}

#[test]
fn empty_trajectory_is_rejected_everywhere() {
    let doc = document(json!({
        "startPoint": { "x": 30.0, "y": 30.0, "heading": "tangential" },
        "lines": []
    }));
    assert!(matches!(doc.validate(), Err(PathError::InvalidInput(_))));
    assert!(matches!(doc.optimize(), Err(PathError::InvalidInput(_))));
    assert!(matches!(
        sample_robot_state(0.0, &doc.lines, &doc.start_point),
        Err(PathError::InvalidInput(_))
    ));
}
