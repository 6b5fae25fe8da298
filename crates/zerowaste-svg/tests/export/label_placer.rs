use proptest::prelude::*;
use zerowaste_svg::{LabelPlacer, PlacementRequest};

fn cell(placer: &LabelPlacer, x: f64, y: f64) -> (i64, i64) {
    let size = placer.cell_size();
    ((x / size).floor() as i64, (y / size).floor() as i64)
}

#[test]
fn test_ring_search_order() {
    let mut placer = LabelPlacer::new(200.0, 200.0, 0.0, 10.0);
    let request = PlacementRequest::new(4.0, 2.0).with_min_distance(1.0);

    let expected = [
        (100.0, 100.0),
        (110.0, 100.0),
        (90.0, 100.0),
        (100.0, 110.0),
        (100.0, 90.0),
        (110.0, 110.0),
    ];
    for want in expected {
        assert_eq!(placer.place(100.0, 100.0, &request), Some(want));
    }
}

#[test]
fn test_explicit_step_has_floor() {
    let mut placer = LabelPlacer::new(200.0, 200.0, 0.0, 10.0);
    let request = PlacementRequest::new(1.0, 1.0)
        .with_min_distance(1.5)
        .with_step(0.5);
    placer.place(100.0, 100.0, &request);
    assert_eq!(placer.place(100.0, 100.0, &request), Some((102.0, 100.0)));
}

#[test]
fn test_reservations_are_append_only() {
    let mut placer = LabelPlacer::new(50.0, 50.0, 1.0, 6.0);
    let request = PlacementRequest::new(2.0, 1.0);
    placer.place(10.0, 10.0, &request);
    let first = placer.reservations()[0];
    placer.place(10.0, 10.0, &request);
    assert_eq!(placer.reservations()[0], first);
    assert_eq!(placer.len(), 2);
}

fn requests() -> impl Strategy<Value = Vec<(f64, f64, f64, f64)>> {
    prop::collection::vec((0.0f64..100.0, 0.0f64..80.0, 0.5f64..6.0, 0.5f64..3.0), 1..60)
}

proptest! {
    #[test]
    fn prop_accepted_boxes_stay_inside_margins(items in requests()) {
        let margin = 2.0;
        let mut placer = LabelPlacer::new(100.0, 80.0, margin, 6.0);
        for (x, y, w, h) in items {
            if let Some((px, py)) = placer.place(x, y, &PlacementRequest::new(w, h)) {
                prop_assert!(px - w / 2.0 >= margin - 1e-9);
                prop_assert!(px + w / 2.0 <= 100.0 - margin + 1e-9);
                prop_assert!(py - h / 2.0 >= margin - 1e-9);
                prop_assert!(py + h / 2.0 <= 80.0 - margin + 1e-9);
            }
        }
    }

    #[test]
    fn prop_neighbouring_reservations_do_not_conflict(items in requests()) {
        let mut placer = LabelPlacer::new(100.0, 80.0, 1.0, 6.0);
        let min_distance = 3.0;
        for (x, y, w, h) in items {
            let request = PlacementRequest::new(w, h).with_min_distance(min_distance);
            placer.place(x, y, &request);
        }

        let items = placer.reservations();
        for (j, b) in items.iter().enumerate() {
            for a in &items[..j] {
                let (ca, cb) = (cell(&placer, a.x, a.y), cell(&placer, b.x, b.y));
                if (ca.0 - cb.0).abs() > 1 || (ca.1 - cb.1).abs() > 1 {
                    continue;
                }
                let overlaps = (a.x - b.x).abs() <= (a.width + b.width) * 0.52
                    && (a.y - b.y).abs() <= (a.height + b.height) * 0.52;
                prop_assert!(!overlaps);
                let d2 = (a.x - b.x).powi(2) + (a.y - b.y).powi(2);
                prop_assert!(d2 >= min_distance * min_distance - 1e-9);
            }
        }
    }

    #[test]
    fn prop_placement_is_deterministic(items in requests()) {
        let run = |items: &[(f64, f64, f64, f64)]| {
            let mut placer = LabelPlacer::new(100.0, 80.0, 1.0, 6.0);
            items
                .iter()
                .map(|&(x, y, w, h)| placer.place(x, y, &PlacementRequest::new(w, h)))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(&items[..]), run(&items[..]));
    }
}
