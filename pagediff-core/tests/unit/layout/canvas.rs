use super::*;

fn contains(outer: PixelRect, inner: PixelRect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

#[test]
fn square_region_layout_matches_reference_geometry() {
    let settings = DiffSettings::default();
    let region = Rect::new(100.0, 200.0, 150.0, 250.0);
    let layout = CanvasLayout::for_region(region, (1000, 800), (154, 124), &settings).unwrap();

    assert_eq!(layout.canvas, PixelRect::new(0, 0, 774, 1240));
    assert_eq!(layout.thumbnail, PixelRect::new(0, 0, 154, 124));
    assert_eq!(layout.before, PixelRect::new(174, 0, 600, 600));
    assert_eq!(layout.after, PixelRect::new(174, 620, 600, 600));
    assert_eq!(layout.marker, PixelRect::new(15, 30, 20, 20));
}

#[test]
fn short_regions_fall_back_to_thumbnail_height() {
    let settings = DiffSettings::default();
    let region = Rect::new(0.0, 10.0, 1200.0, 13.0);
    let layout = CanvasLayout::for_region(region, (1200, 900), (154, 119), &settings).unwrap();

    assert_eq!(layout.canvas.height, 139);
    assert_eq!(layout.before, PixelRect::new(174, 0, 600, 1));
    assert_eq!(layout.after, PixelRect::new(174, 21, 600, 1));
}

#[test]
fn marker_floor_applies_to_tiny_regions() {
    let settings = DiffSettings::default();
    let region = Rect::new(500.0, 500.0, 502.0, 501.0);
    let layout = CanvasLayout::for_region(region, (2000, 2000), (154, 154), &settings).unwrap();

    assert!(layout.marker.width >= 20);
    assert!(layout.marker.height >= 20);
}

#[test]
fn large_regions_keep_projected_marker_size() {
    let settings = DiffSettings::default();
    let region = Rect::new(0.0, 0.0, 500.0, 400.0);
    let layout = CanvasLayout::for_region(region, (1000, 1000), (150, 150), &settings).unwrap();

    assert_eq!(layout.marker, PixelRect::new(0, 0, 75, 60));
}

#[test]
fn canvas_never_clips_thumbnail_or_crops() {
    let settings = DiffSettings::default();
    let regions = [
        Rect::new(0.0, 0.0, 1.0, 1.0),
        Rect::new(3.0, 7.0, 40.0, 900.0),
        Rect::new(10.0, 10.0, 990.0, 12.0),
        Rect::new(250.0, 125.0, 257.0, 700.0),
    ];
    for region in regions {
        let layout = CanvasLayout::for_region(region, (1000, 1000), (154, 154), &settings).unwrap();
        assert!(contains(layout.canvas, layout.thumbnail), "{region:?}");
        assert!(contains(layout.canvas, layout.before), "{region:?}");
        assert!(contains(layout.canvas, layout.after), "{region:?}");
        assert!(layout.before.bottom() <= layout.after.y, "{region:?}");
        assert_eq!(layout.before.right(), layout.canvas.right());
    }
}

#[test]
fn zero_width_region_is_degenerate() {
    let settings = DiffSettings::default();
    let err = CanvasLayout::for_region(
        Rect::new(5.0, 5.0, 5.0, 50.0),
        (100, 100),
        (154, 154),
        &settings,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        crate::foundation::error::PagediffError::DegenerateFrame(_)
    ));
}
