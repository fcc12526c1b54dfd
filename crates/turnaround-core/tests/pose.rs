//! End-to-end checks of the head and body pose engines through the driver.

mod common;

use common::{assert_close, rig};
use turnaround_core::pose::{body_frame_count, head_frame_count, rig as names, HeadStage, Part};
use turnaround_core::{CollectedDiagnostics, Driver, NodeId, RunSummary, SceneGraph, StaticInput};

fn run(scene: &mut SceneGraph, frames: &str) -> RunSummary {
    run_with_nose(scene, frames, false)
}

fn run_with_nose(scene: &mut SceneGraph, frames: &str, nose_points_right: bool) -> RunSummary {
    let mut diagnostics = CollectedDiagnostics::default();
    let summary = Driver::new()
        .run(scene, &StaticInput::new(frames, nose_points_right), &mut diagnostics)
        .unwrap();
    assert!(diagnostics.errors.is_empty());
    summary
}

fn head_frame(summary: &RunSummary, name: &str) -> NodeId {
    summary
        .head_frames()
        .find(|frame| frame.name == name)
        .map(|frame| frame.id)
        .unwrap_or_else(|| panic!("no head frame named {}", name))
}

#[test]
fn head_frame_count_matches_formula() {
    for n in 2usize..=6 {
        let mut rig = rig();
        let summary = run(&mut rig.scene, &n.to_string());
        let expected = n + 1 + (n + 1).div_ceil(2) + (n.div_ceil(2) - 1) + 1;
        assert_eq!(summary.head_frames().count(), expected, "n = {}", n);
        assert_eq!(head_frame_count(n), expected);
        assert_eq!(summary.body_frames().count(), body_frame_count(n));
    }
}

#[test]
fn head_frame_names_for_four_in_betweens() {
    let mut rig = rig();
    let summary = run(&mut rig.scene, "4");
    let names: Vec<_> = summary.head_frames().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Left Quarter 1",
            "Left Quarter 2",
            "Left Quarter 3",
            "Left Quarter 4",
            "Left Profile",
            "Left Profile 1",
            "Left Profile 2",
            "Left Profile 3",
            "Left Profile 4",
            "Left Profile Dos",
        ]
    );
    let stages: Vec<_> = summary
        .head_frames()
        .filter_map(|f| match f.part {
            Part::Head(stage) => Some(stage.index()),
            Part::Body => None,
        })
        .collect();
    assert_eq!(stages, [1, 1, 1, 1, 2, 3, 3, 3, 4, 6]);
    assert_eq!(HeadStage::from_index(5), None);
}

#[test]
fn last_quarter_right_eye_reaches_target() {
    let mut rig = rig();
    let summary = run(&mut rig.scene, "4");
    let frame = head_frame(&summary, "Left Quarter 4");
    let eye = rig.scene.find_by_name(frame, names::RIGHT_EYE).unwrap();
    let bounds = rig.scene.bounds(eye);

    // Target is bg_left + eye_width / 3, squeezed to 50%.
    assert_close(bounds.center().x, 20.0 / 3.0);
    assert_close(bounds.width(), 10.0);
}

#[test]
fn intermediate_quarter_is_eased_linearly() {
    let mut rig = rig();
    let start = rig.scene.find_by_name(rig.head, names::RIGHT_EYE).unwrap();
    let x0 = rig.scene.bounds(start).center().x;
    let summary = run(&mut rig.scene, "4");
    let frame = head_frame(&summary, "Left Quarter 2");
    let eye = rig.scene.find_by_name(frame, names::RIGHT_EYE).unwrap();
    let bounds = rig.scene.bounds(eye);

    assert_close(bounds.center().x, x0 - 2.0 * (x0 - 20.0 / 3.0) / 4.0);
    // Halfway along the ramp from 100% to 50%.
    assert_close(bounds.width(), 15.0);
}

fn first_nose_anchor(scene: &SceneGraph, summary: &RunSummary) -> kurbo::Point {
    let frame = head_frame(summary, "Left Quarter 1");
    let nose = scene.find_by_name(frame, names::NOSE).unwrap();
    match &scene.node(nose).unwrap().items[0] {
        turnaround_core::Item::Path(shape) => shape.points[0].anchor,
        other => panic!("unexpected item {:?}", other),
    }
}

#[test]
fn nose_is_mirrored_unless_it_points_right() {
    let mut kept = rig();
    let kept_summary = run_with_nose(&mut kept.scene, "2", true);
    let mut flipped = rig();
    let flipped_summary = run_with_nose(&mut flipped.scene, "2", false);

    let kept_nose = first_nose_anchor(&kept.scene, &kept_summary);
    let flipped_nose = first_nose_anchor(&flipped.scene, &flipped_summary);

    let frame = head_frame(&kept_summary, "Left Quarter 1");
    let nose = kept.scene.find_by_name(frame, names::NOSE).unwrap();
    let center_x = kept.scene.bounds(nose).center().x;
    assert!((kept_nose.x - flipped_nose.x).abs() > 1.0);
    assert_close(flipped_nose.x, 2.0 * center_x - kept_nose.x);
    assert_close(flipped_nose.y, kept_nose.y);
}

#[test]
fn quarter_turn_moves_pupils_towards_the_turn() {
    let mut rig = rig();
    let summary = run(&mut rig.scene, "2");
    let frame = head_frame(&summary, "Left Quarter 2");
    let eye = rig.scene.find_by_name(frame, names::LEFT_EYE).unwrap();
    let white = rig.scene.find_by_name(eye, "White").unwrap();
    let pupil = rig.scene.find_by_name(eye, "Pupil").unwrap();

    let offset = rig.scene.bounds(pupil).center().x - rig.scene.bounds(white).center().x;
    // Full gaze at the last quarter: eye_width / 4.
    assert_close(offset, -5.0);
}

#[test]
fn mouth_is_tilted_on_last_quarter() {
    let mut rig = rig();
    let summary = run(&mut rig.scene, "2");
    let frame = head_frame(&summary, "Left Quarter 2");
    let mouth = rig.scene.find_by_name(frame, names::MOUTH).unwrap();
    let smile = rig.scene.find_by_name(mouth, "Smile").unwrap();
    let shape = match &rig.scene.node(smile).unwrap().items[0] {
        turnaround_core::Item::Path(shape) => shape.clone(),
        other => panic!("unexpected item {:?}", other),
    };
    // Tilted by the full angle, then squeezed again to 87% in place.
    let tilt = (-4.5f64).to_radians();
    let edge = shape.points[1].anchor - shape.points[0].anchor;
    assert_close(edge.y.atan2(edge.x), tilt.sin().atan2(0.87 * tilt.cos()));
}

#[test]
fn profile_drops_far_side_features() {
    let mut rig = rig();
    let summary = run(&mut rig.scene, "3");
    let profile = head_frame(&summary, "Left Profile");
    let scene = &rig.scene;
    for gone in [names::RIGHT_EYE, names::RIGHT_EYEBROW, names::MOUTH, names::RIGHT_EAR] {
        assert!(scene.find_by_name(profile, gone).is_none(), "{} kept", gone);
    }
    for kept in [names::LEFT_EYE, names::NOSE, names::LEFT_EAR, names::BACKGROUND] {
        assert!(scene.find_by_name(profile, kept).is_some(), "{} missing", kept);
    }
    // The nose is the bottom layer of every profile frame.
    let first = head_frame(&summary, "Left Profile 1");
    let nose = scene.find_by_name(first, names::NOSE).unwrap();
    assert_eq!(scene.children(first).last(), Some(&nose));
}

#[test]
fn back_view_is_mirrored_without_a_face() {
    let mut rig = rig();
    let summary = run(&mut rig.scene, "2");
    let back = head_frame(&summary, "Left Profile Dos");
    let scene = &rig.scene;
    for gone in [
        names::LEFT_EYE,
        names::RIGHT_EYE,
        names::LEFT_EYEBROW,
        names::RIGHT_EYEBROW,
        names::NOSE,
        names::MOUTH,
    ] {
        assert!(scene.find_by_name(back, gone).is_none(), "{} kept", gone);
    }
    let ear = scene.find_by_name(back, names::LEFT_EAR).unwrap();
    let bounds = scene.bounds(ear);
    assert_close(bounds.left, -10.0);
    assert_close(bounds.right, 0.0);
}

#[test]
fn back_transition_drops_the_near_eye() {
    let mut rig = rig();
    let summary = run(&mut rig.scene, "4");
    let frame = head_frame(&summary, "Left Profile 4");
    for gone in [names::LEFT_EYE, names::LEFT_EYEBROW, names::NOSE, names::RIGHT_EYE] {
        assert!(rig.scene.find_by_name(frame, gone).is_none(), "{} kept", gone);
    }
}

#[test]
fn frontal_pose_is_never_mutated() {
    let mut rig = rig();
    let before: Vec<_> = [rig.head, rig.body]
        .iter()
        .flat_map(|&id| rig.scene.collect_all(id))
        .map(|id| (id, rig.scene.bounds(id)))
        .collect();

    run(&mut rig.scene, "3");

    for (id, bounds) in before {
        assert_eq!(rig.scene.bounds(id), bounds, "node {} moved", rig.scene.name(id));
    }
    assert_eq!(rig.scene.name(rig.head), names::FRONTAL);
    assert_eq!(rig.scene.name(rig.body), names::FRONTAL);
}

#[test]
fn body_frames_stack_far_limbs_at_the_bottom() {
    let mut rig = rig();
    let summary = run(&mut rig.scene, "2");
    let scene = &rig.scene;
    let frames: Vec<_> = summary.body_frames().collect();
    assert_eq!(frames.len(), 6);

    for frame in &frames {
        let children = scene.children(frame.id);
        let right_arm = scene.find_by_name(frame.id, names::RIGHT_ARM).unwrap();
        let right_leg = scene.find_by_name(frame.id, names::RIGHT_LEG).unwrap();
        let left_arm = scene.find_by_name(frame.id, names::LEFT_ARM).unwrap();
        let tail = &children[children.len() - 3..];
        if frame.name == names::BACK_NAME {
            assert_eq!(tail, [right_leg, right_arm, left_arm]);
        } else {
            assert_eq!(&tail[1..], [right_leg, right_arm]);
        }

        // Far limbs are foreshortened from the top.
        let arm = scene.bounds(right_arm);
        assert_close(arm.top, -10.0);
        assert_close(arm.height(), 72.0);
    }

    // Body frames sink to the bottom of the document.
    let last = frames.last().unwrap();
    assert_eq!(last.name, names::BACK_NAME);
    assert_eq!(scene.children(scene.root()).last(), Some(&last.id));
}

#[test]
fn limbs_move_towards_their_opposite() {
    let mut rig = rig();
    let summary = run(&mut rig.scene, "2");
    let first = summary.body_frames().next().unwrap();
    let arm = rig.scene.find_by_name(first.id, names::LEFT_ARM).unwrap();
    let x = rig.scene.bounds(arm).center().x;
    // Starts at 82.5 and heads for the right arm's 17.5.
    assert!(x < 82.5 && x > 17.5, "left arm at {}", x);
}
