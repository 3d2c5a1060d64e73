//! Property-based tests for room frame derivation.
//!
//! Run with: cargo test -p classroom-frame -- proptest

use classroom_frame::{FrameError, ReferenceRegistry, derive_frame};
use classroom_types::{ReferenceRole, ReferenceSample};
use glam::DVec3;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A position inside a generous classroom-sized box.
fn arb_point() -> impl Strategy<Value = DVec3> {
    prop::array::uniform3(-20.0..20.0f64).prop_map(DVec3::from_array)
}

/// Three markers laid out the way they are in a real room: a corner, two
/// points along wall 1 on one side of it, and a point along wall 2.
fn arb_room() -> impl Strategy<Value = (DVec3, DVec3, DVec3)> {
    (
        arb_point(),
        -std::f64::consts::PI..std::f64::consts::PI,
        0.5..8.0f64,
        0.2..4.0f64,
        0.5..8.0f64,
    )
        .prop_map(|(corner, yaw, d1, gap, d3)| {
            let along = DVec3::new(yaw.cos(), 0.0, -yaw.sin());
            let across = DVec3::new(yaw.sin(), 0.0, yaw.cos());
            let p1 = corner + along * d1;
            let p2 = p1 + along * gap;
            let p3 = corner + across * d3;
            (p1, p2, p3)
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_derivation_is_deterministic((p1, p2, p3) in arb_room()) {
        let a = derive_frame(p1, p2, p3);
        let b = derive_frame(p1, p2, p3);
        prop_assert!(a.is_ok());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn proptest_origin_lies_on_wall_one((p1, p2, p3) in arb_room()) {
        let frame = derive_frame(p1, p2, p3).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let wall = (p2 - p1).normalize();
        let offset = frame.origin - p1;
        prop_assert!(offset.cross(wall).length() < 1e-6);

        // And the corner-to-wall-2 leg is perpendicular to wall 1.
        prop_assert!((p3 - frame.origin).dot(wall).abs() < 1e-6);
    }

    #[test]
    fn proptest_p1_lands_on_positive_x((p1, p2, p3) in arb_room()) {
        let frame = derive_frame(p1, p2, p3).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let room = frame.to_room(p1);
        prop_assert!(room.x > 0.0);
        prop_assert!(room.z.abs() < 1e-6);
        prop_assert!(frame.yaw > -std::f64::consts::PI && frame.yaw <= std::f64::consts::PI);
    }

    #[test]
    fn proptest_room_world_round_trip((p1, p2, p3) in arb_room(), q in arb_point()) {
        let frame = derive_frame(p1, p2, p3).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let back = frame.to_world(frame.to_room(q));
        prop_assert!((back - q).length() < 1e-9);
    }

    #[test]
    fn proptest_coincident_wall_points_never_nan(p in arb_point(), p3 in arb_point()) {
        let result = derive_frame(p, p, p3);
        prop_assert!(matches!(result, Err(FrameError::DegenerateGeometry(_))));
    }

    #[test]
    fn proptest_registry_matches_direct_derivation((p1, p2, p3) in arb_room()) {
        let mut registry = ReferenceRegistry::new();
        for (role, p) in ReferenceRole::FRAME_ROLES.into_iter().zip([p1, p2, p3]) {
            let sample = ReferenceSample::from_point(role, p)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            registry.insert(sample);
        }
        prop_assert_eq!(registry.frame(), derive_frame(p1, p2, p3));
    }
}

#[test]
fn corner_example_origin_and_idempotence() {
    let p1 = DVec3::new(0.0, 0.0, 0.0);
    let p2 = DVec3::new(1.0, 0.0, 0.0);
    let p3 = DVec3::new(0.5, 0.0, 1.0);

    let first = derive_frame(p1, p2, p3);
    let second = derive_frame(p1, p2, p3);

    assert_eq!(first.as_ref().map(|f| f.origin), Ok(DVec3::new(0.5, 0.0, 0.0)));
    assert_eq!(first, second);
}

#[test]
fn coincident_wall_points_fail_cleanly() {
    let p = DVec3::new(0.3, 0.0, 0.3);
    let result = derive_frame(p, p, DVec3::new(1.0, 0.0, 2.0));
    assert!(matches!(result, Err(FrameError::DegenerateGeometry(_))));
}

#[test]
fn partial_registry_defers() {
    let mut registry = ReferenceRegistry::new();
    let _ = registry.assign_next(DVec3::new(0.0, 0.0, 0.0));
    let _ = registry.assign_next(DVec3::new(1.0, 0.0, 0.0));
    let result = registry.frame();
    assert!(matches!(result, Err(ref e) if e.is_pending()));
}
