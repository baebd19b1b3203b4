use cellsplit_algorithms::{FirstMatchClustering, NearestCenterClustering, RowClustering};
use cellsplit_core::Rect;

fn rect(x: u32, y: u32, w: u32, h: u32) -> Rect {
    Rect::new(x, y, w, h).unwrap()
}

/// Rectangles with jittered positions over a 4x5 grid, shuffled.
fn jittered_grid() -> Vec<Rect> {
    let jitter = [0u32, 3, 1, 4, 2];
    let mut rects = Vec::new();
    for row in 0..4u32 {
        for col in 0..5u32 {
            let j = jitter[((row + col) % 5) as usize];
            rects.push(rect(20 + col * 60 + j, 30 + row * 50 + j, 50, 40));
        }
    }
    // Deterministic shuffle.
    let mut shuffled = Vec::with_capacity(rects.len());
    let mut idx = 7usize;
    while !rects.is_empty() {
        idx = (idx * 31 + 11) % rects.len();
        shuffled.push(rects.swap_remove(idx));
    }
    shuffled
}

#[test]
fn test_three_rects_two_rows() {
    let rects = [rect(0, 10, 40, 20), rect(60, 11, 40, 20), rect(0, 200, 40, 20)];
    let rows = FirstMatchClustering.cluster(&rects, 12.0);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[1].len(), 1);
}

#[test]
fn test_jittered_grid_recovers_structure() {
    let rects = jittered_grid();
    for algo in [
        &FirstMatchClustering as &dyn RowClustering,
        &NearestCenterClustering,
    ] {
        let rows = algo.cluster(&rects, 12.0);
        assert_eq!(rows.len(), 4, "{}", algo.name());
        for row in &rows {
            assert_eq!(row.len(), 5, "{}", algo.name());
        }
    }
}

#[test]
fn test_row_order_and_member_order() {
    let rows = FirstMatchClustering.cluster(&jittered_grid(), 12.0);

    let centers: Vec<f64> = rows.iter().map(|r| r.center_y()).collect();
    assert!(centers.windows(2).all(|w| w[0] < w[1]), "{centers:?}");

    for row in &rows {
        let xs: Vec<u32> = row.items().iter().map(|r| r.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]), "{xs:?}");
    }
}

#[test]
fn test_every_member_within_tolerance_of_row() {
    let tolerance = 12.0;
    let rows = FirstMatchClustering.cluster(&jittered_grid(), tolerance);
    for row in &rows {
        // Jitter is far below the row pitch, so members stay near the mean.
        for item in row.items() {
            assert!((item.center_y() - row.center_y()).abs() <= tolerance);
        }
    }
}

#[test]
fn test_no_rect_lost_or_duplicated() {
    let rects = jittered_grid();
    let rows = FirstMatchClustering.cluster(&rects, 12.0);
    let mut flat: Vec<Rect> = rows.iter().flat_map(|r| r.items().iter().copied()).collect();
    let mut expected = rects.clone();
    flat.sort_by_key(|r| (r.y, r.x));
    expected.sort_by_key(|r| (r.y, r.x));
    assert_eq!(flat, expected);
}
