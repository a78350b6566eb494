mod common;

use common::*;

#[test]
fn test_largest_area_picks_biggest() {
    // Areas 20, 50, 30
    let candidates = vec![candidate(1, 4, 5), candidate(2, 5, 10), candidate(3, 5, 6)];
    let selected = SelectionStrategy::LargestArea.select(candidates).unwrap();

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].0.bounding_box.area(), 50);
    assert_eq!(selected[0].0.bounding_box.x, 2);
}

#[test]
fn test_largest_area_tie_keeps_first() {
    let candidates = vec![candidate(1, 5, 10), candidate(2, 10, 5)];
    let selected = SelectionStrategy::LargestArea.select(candidates).unwrap();
    assert_eq!(selected[0].0.bounding_box.x, 1);
}

#[test]
fn test_closest_to_center_minimizes_x() {
    let candidates = vec![candidate(5, 1, 1), candidate(-3, 1, 1), candidate(10, 1, 1)];
    let selected = SelectionStrategy::ClosestToCenterX.select(candidates).unwrap();

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].0.bounding_box.x, -3);
}

#[test]
fn test_closest_to_center_prefers_most_negative_offset() {
    // Not a distance: -40 beats 1
    let candidates = vec![candidate(1, 1, 1), candidate(-40, 1, 1)];
    let selected = SelectionStrategy::ClosestToCenterX.select(candidates).unwrap();
    assert_eq!(selected[0].0.bounding_box.x, -40);
}

#[test]
fn test_closest_to_center_ignores_y() {
    let candidates = vec![candidate_at(1, 0, 1, 1), candidate_at(0, 100, 1, 1)];
    let selected = SelectionStrategy::ClosestToCenterX.select(candidates).unwrap();
    assert_eq!(selected[0].0.bounding_box.y, 100);
}

#[test]
fn test_closest_to_center_tie_keeps_first() {
    let candidates = vec![candidate(0, 3, 3), candidate(0, 7, 7)];
    let selected = SelectionStrategy::ClosestToCenterX.select(candidates).unwrap();
    assert_eq!(selected[0].0.bounding_box.width, 3);
}

#[test]
fn test_selection_keeps_centroid_pairing() {
    let candidates = vec![candidate(5, 1, 1), candidate(-3, 1, 1)];
    let (detection, centroid) = SelectionStrategy::ClosestToCenterX.select(candidates).unwrap().remove(0);
    assert_eq!(centroid.x, detection.bounding_box.x + 50);
}

#[test]
fn test_empty_input_is_an_error() {
    for strategy in SelectionStrategy::ALL {
        assert_eq!(strategy.select(Vec::new()), Err(DetectionError::NoCandidates));
    }
}

#[test]
fn test_strategy_names() {
    assert_eq!(SelectionStrategy::LargestArea.to_string(), "largest-area");
    assert_eq!(SelectionStrategy::ClosestToCenterX.to_string(), "closest-to-center-x");
    assert_eq!(DetectionError::NoCandidates.to_string(), "no candidates found");
}
