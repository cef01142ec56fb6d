use super::*;
use crate::error::ShapeError;
use crate::geom::{ellipse_x_intercept, Point};
use crate::polygon::FillRule;
use futures::future::BoxFuture;
use futures::FutureExt;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Element metrics from CSS-style content size and side widths.
fn css_box(content: (f64, f64), margin: [f64; 4], border: [f64; 4], padding: [f64; 4]) -> BoxMetrics {
    BoxMetrics {
        margins: margin,
        borders: border,
        paddings: padding,
        width: content.0 + border[1] + border[3] + padding[1] + padding[3],
        height: content.1 + border[0] + border[2] + padding[0] + padding[2],
        radii: [[0.0; 2]; 4],
        float: FloatSide::Left,
    }
}

fn plain(width: f64, height: f64) -> BoxMetrics {
    css_box((width, height), [0.0; 4], [0.0; 4], [0.0; 4])
}

fn inset(x: f64, y: f64, width: f64, height: f64, radii: [[f64; 2]; 4]) -> ShapeSource {
    ShapeSource::Basic(BasicShape::Inset {
        x,
        y,
        width,
        height,
        radii,
    })
}

fn shape(metrics: BoxMetrics, source: ShapeSource, reference: ReferenceBox, margin: f64) -> ShapeInfo {
    let value = ShapeValue::resolve(&metrics, source, reference, margin, 0.0);
    ShapeInfo::from_value(metrics, value).expect("non-image shape")
}

fn step_offsets(info: &ShapeInfo, step: f64) -> Vec<f64> {
    info.offsets(&OffsetParams::step(step))
        .unwrap()
        .iter()
        .map(|o| o.offset)
        .collect()
}

fn assert_offsets(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
    }
}

#[test]
fn inset_step_offsets() {
    let info = shape(
        plain(100.0, 100.0),
        inset(20.0, 21.0, 60.0, 58.0, [[0.0; 2]; 4]),
        ReferenceBox::MarginBox,
        0.0,
    );
    assert_offsets(&step_offsets(&info, 20.0), &[0.0, 80.0, 80.0, 80.0, 0.0]);
    let strips = info.offsets(&OffsetParams::step(20.0)).unwrap();
    assert_eq!((strips[4].top, strips[4].bottom), (80.0, 100.0));
    assert!(strips.iter().all(|o| o.float == FloatSide::Left));
}

#[test]
fn inset_on_the_content_box() {
    let m = css_box((80.0, 80.0), [20.0; 4], [0.0; 4], [0.0; 4]);
    let info = shape(m, inset(0.0, 1.0, 80.0, 78.0, [[0.0; 2]; 4]), ReferenceBox::ContentBox, 0.0);
    assert_offsets(
        &step_offsets(&info, 20.0),
        &[0.0, 100.0, 100.0, 100.0, 100.0, 0.0],
    );

    // Negative margins shrink the margin box past the content box.
    let m = css_box((100.0, 100.0), [-20.0; 4], [0.0; 4], [0.0; 4]);
    let info = shape(m, inset(0.0, 0.0, 100.0, 100.0, [[0.0; 2]; 4]), ReferenceBox::ContentBox, 0.0);
    assert_offsets(&step_offsets(&info, 60.0), &[60.0]);
}

#[test]
fn inset_against_each_reference_box() {
    let m = css_box((80.0, 80.0), [20.0; 4], [15.0; 4], [10.0; 4]);
    let full = |kind| {
        let r = m.reference_box(kind).rect;
        inset(0.0, 0.0, r.width, r.height, [[0.0; 2]; 4])
    };
    let offsets = |kind| step_offsets(&shape(m.clone(), full(kind), kind, 0.0), 20.0);

    let content = offsets(ReferenceBox::ContentBox);
    assert_offsets(
        &content,
        &[0.0, 0.0, 125.0, 125.0, 125.0, 125.0, 125.0, 0.0, 0.0],
    );
    assert_offsets(&offsets(ReferenceBox::MarginBox), &[170.0; 9]);
    let border = offsets(ReferenceBox::BorderBox);
    assert_offsets(&border[..8], &[150.0; 8]);
    assert_eq!(border[8], 0.0);
    let padding = offsets(ReferenceBox::PaddingBox);
    assert_offsets(&padding[..2], &[0.0, 135.0]);
    assert_offsets(&padding[7..], &[0.0, 0.0]);
}

#[test]
fn reference_box_shapes() {
    let m = css_box((80.0, 80.0), [50.0; 4], [15.0; 4], [11.0, 22.0, 33.0, 44.0]);
    let offsets = |kind| step_offsets(&shape(m.clone(), ShapeSource::Box, kind, 0.0), 20.0);

    let margin = offsets(ReferenceBox::MarginBox);
    assert_offsets(&margin, &[276.0; 13]);
    let strips = shape(m.clone(), ShapeSource::Box, ReferenceBox::MarginBox, 0.0)
        .offsets(&OffsetParams::step(20.0))
        .unwrap();
    assert_eq!((strips[12].top, strips[12].bottom), (240.0, 254.0));

    let border = offsets(ReferenceBox::BorderBox);
    assert_offsets(&border[..2], &[0.0, 0.0]);
    assert_offsets(&border[3..10], &[226.0; 7]);
    assert_offsets(&border[11..], &[0.0, 0.0]);
    let padding = offsets(ReferenceBox::PaddingBox);
    assert_offsets(&padding[3..10], &[211.0; 7]);
    assert_eq!(padding[12], 0.0);

    let m = css_box((80.0, 80.0), [50.0; 4], [0.0; 4], [11.0, 22.0, 33.0, 44.0]);
    let strips = shape(m, ShapeSource::Box, ReferenceBox::MarginBox, 0.0)
        .offsets(&OffsetParams::step(20.0))
        .unwrap();
    assert_eq!(strips.len(), 12);
    assert_eq!((strips[11].top, strips[11].bottom), (220.0, 224.0));
    assert!(strips.iter().all(|o| o.offset == 246.0));
}

#[test]
fn border_and_padding_box_with_asymmetric_sides() {
    let m = css_box((80.0, 80.0), [11.0, 22.0, 33.0, 44.0], [30.0; 4], [0.0; 4]);
    let border = step_offsets(&shape(m, ShapeSource::Box, ReferenceBox::BorderBox, 0.0), 20.0);
    assert_offsets(&border[..8], &[184.0; 8]);
    assert_offsets(&border[8..], &[0.0, 0.0]);

    let m = css_box((80.0, 80.0), [21.0; 4], [0.0; 4], [20.0; 4]);
    let padding = step_offsets(&shape(m, ShapeSource::Box, ReferenceBox::PaddingBox, 0.0), 20.0);
    assert_offsets(&padding[..6], &[0.0, 141.0, 141.0, 141.0, 141.0, 141.0]);
    assert_offsets(&padding[6..], &[141.0, 141.0, 0.0]);
}

#[test]
fn shape_margin_grows_the_inset() {
    let info = shape(
        plain(100.0, 100.0),
        inset(30.0, 31.0, 40.0, 38.0, [[0.0; 2]; 4]),
        ReferenceBox::MarginBox,
        10.0,
    );
    assert_offsets(&step_offsets(&info, 20.0), &[0.0, 80.0, 80.0, 80.0, 0.0]);
}

#[test]
fn circle_ellipse_and_polygon() {
    let circle = ShapeSource::Basic(BasicShape::Circle {
        cx: 50.0,
        cy: 50.0,
        r: 24.0,
    });
    let ellipse = ShapeSource::Basic(BasicShape::Ellipse {
        cx: 50.0,
        cy: 50.0,
        rx: 24.0,
        ry: 24.0,
    });
    for source in [circle, ellipse] {
        let info = shape(plain(100.0, 100.0), source, ReferenceBox::MarginBox, 0.0);
        assert_eq!(info.geometry().kind(), "rounded-rect");
        assert_offsets(&step_offsets(&info, 25.0), &[0.0, 74.0, 74.0, 0.0]);
    }

    let points: Vec<Point> = [(20.0, 21.0), (80.0, 21.0), (80.0, 79.0), (20.0, 79.0)]
        .iter()
        .map(|&(x, y)| Point::new(x, y))
        .collect();
    let polygon = ShapeSource::Basic(BasicShape::Polygon {
        fill_rule: FillRule::Nonzero,
        points,
    });
    let info = shape(plain(100.0, 100.0), polygon.clone(), ReferenceBox::MarginBox, 0.0);
    assert_eq!(info.geometry().kind(), "polygon");
    assert_offsets(&step_offsets(&info, 20.0), &[0.0, 80.0, 80.0, 80.0, 0.0]);
    // Polygons ignore adaptive mode.
    let adaptive = info.offsets(&OffsetParams::for_font_size(20.0)).unwrap();
    assert_eq!(adaptive.len(), 5);

    let mut right = plain(100.0, 100.0);
    right.float = FloatSide::Right;
    let info = shape(right, polygon, ReferenceBox::MarginBox, 0.0);
    assert_offsets(&step_offsets(&info, 20.0), &[0.0, 80.0, 80.0, 80.0, 0.0]);
    let strips = info.offsets(&OffsetParams::step(20.0)).unwrap();
    assert!(strips.iter().all(|o| o.float == FloatSide::Right));
}

#[test]
fn rounded_inset_step_offsets() {
    let half = [50.0, 50.0];
    let right_round = inset(0.0, 0.0, 100.0, 100.0, [[0.0; 2], half, half, [0.0; 2]]);
    let info = shape(plain(100.0, 100.0), right_round, ReferenceBox::MarginBox, 0.0);
    let o = step_offsets(&info, 10.0);
    assert_eq!(o.len(), 10);
    for (i, expected) in [(0, 80.0), (1, 90.0), (4, 100.0), (5, 100.0), (8, 90.0), (9, 80.0)] {
        assert!((o[i] - expected).abs() < 1e-9, "strip {i}: {o:?}");
    }

    let left_round = inset(0.0, 0.0, 100.0, 100.0, [half, [0.0; 2], [0.0; 2], half]);
    let info = shape(plain(100.0, 100.0), left_round, ReferenceBox::MarginBox, 0.0);
    assert_offsets(&step_offsets(&info, 20.0), &[100.0; 5]);
}

/// Every adaptive strip matches the outline at its widest row.
fn check_adaptive(info: &ShapeInfo, width: f64, height: f64, top: (f64, f64), bottom: (f64, f64)) {
    let strips = info.offsets(&OffsetParams { limit: 18.0, ..OffsetParams::for_font_size(10.0) }).unwrap();
    assert!(!strips.is_empty());
    let total: f64 = strips.iter().map(|o| o.bottom - o.top).sum();
    assert!((total - height).abs() < 1e-9);
    for o in &strips {
        let eps = 1e-9;
        if o.bottom <= top.1 + eps {
            let expected = ellipse_x_intercept(top.1 - o.bottom, top.0, top.1) + width - top.0;
            assert!((o.offset - expected).abs() <= 0.1, "{o:?} vs {expected}");
        } else if o.bottom <= height - bottom.1 + eps {
            assert_eq!(o.offset, width, "{o:?}");
        } else {
            let expected =
                ellipse_x_intercept(o.top - (height - bottom.1), bottom.0, bottom.1) + width - bottom.0;
            assert!((o.offset - expected).abs() <= 0.1, "{o:?} vs {expected}");
        }
    }
}

#[test]
fn adaptive_offsets_follow_the_corners() {
    let half = [50.0, 50.0];
    let left_round = inset(0.0, 0.0, 100.0, 100.0, [half, [0.0; 2], [0.0; 2], half]);
    let info = shape(plain(100.0, 100.0), left_round, ReferenceBox::MarginBox, 0.0);
    check_adaptive(&info, 100.0, 100.0, (0.0, 0.0), (0.0, 0.0));

    let right_round = inset(0.0, 0.0, 100.0, 100.0, [[0.0; 2], half, half, [0.0; 2]]);
    let info = shape(plain(100.0, 100.0), right_round, ReferenceBox::MarginBox, 0.0);
    check_adaptive(&info, 100.0, 100.0, (50.0, 50.0), (50.0, 50.0));
    // Corner strips are finer than the straight section.
    let strips = info.offsets(&OffsetParams { limit: 18.0, ..OffsetParams::for_font_size(10.0) }).unwrap();
    assert!(strips.len() > 2);

    let uneven = inset(
        0.0,
        0.0,
        100.0,
        100.0,
        [[30.0; 2], [50.0; 2], [20.0; 2], [40.0; 2]],
    );
    let info = shape(plain(100.0, 100.0), uneven, ReferenceBox::MarginBox, 0.0);
    check_adaptive(&info, 100.0, 100.0, (50.0, 50.0), (20.0, 20.0));
}

#[test]
fn adaptive_circle_with_negative_margin() {
    let m = css_box((100.0, 100.0), [-20.0; 4], [0.0; 4], [0.0; 4]);
    let circle = ShapeSource::Basic(BasicShape::Circle {
        cx: 50.0,
        cy: 50.0,
        r: 50.0,
    });
    let info = shape(m, circle, ReferenceBox::ContentBox, 0.0);
    check_adaptive(&info, 60.0, 60.0, (0.0, 0.0), (0.0, 0.0));
}

#[test]
fn band_queries_use_shape_coordinates() {
    let info = shape(
        plain(100.0, 100.0),
        inset(20.0, 21.0, 60.0, 58.0, [[0.0; 2]; 4]),
        ReferenceBox::MarginBox,
        0.0,
    );
    assert_eq!(info.left_exclusion_edge(Band::new(30.0, 40.0)), Some(20.0));
    assert_eq!(info.right_exclusion_edge(Band::new(30.0, 40.0)), Some(80.0));
    assert_eq!(info.left_exclusion_edge(Band::new(0.0, 20.0)), None);
    assert_eq!(info.right_exclusion_edge(Band::new(80.0, 100.0)), None);
}

#[test]
fn resolve_clamps_inputs() {
    let m = css_box((80.0, 80.0), [10.0; 4], [5.0; 4], [5.0; 4]);
    let value = ShapeValue::resolve(&m, ShapeSource::Box, ReferenceBox::BorderBox, -4.0, 3.0);
    assert_eq!(value.shape_margin, 0.0);
    assert_eq!(value.shape_image_threshold, 1.0);
    assert_eq!(value.reference_box.kind, ReferenceBox::BorderBox);
    assert_eq!(value.clip, m.margin_box());

    let image = ShapeSource::Image {
        url: "mask.png".into(),
    };
    let value = ShapeValue::resolve(&m, image, ReferenceBox::MarginBox, f64::NAN, f64::NAN);
    assert_eq!(value.reference_box.kind, ReferenceBox::ContentBox);
    assert_eq!(value.shape_margin, 0.0);
    assert_eq!(value.shape_image_threshold, 0.0);
    assert!(ShapeInfo::from_value(m, value).is_none());
}

#[test]
fn invalid_offset_params_are_rejected() {
    let info = shape(plain(100.0, 100.0), ShapeSource::Box, ReferenceBox::MarginBox, 0.0);
    for step in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = info.offsets(&OffsetParams::step(step)).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidParams(_)));
    }
    let params = OffsetParams {
        limit: 0.0,
        ..OffsetParams::for_font_size(16.0)
    };
    assert!(matches!(info.offsets(&params), Err(ShapeError::InvalidParams(_))));

    let p = OffsetParams::for_font_size(20.0);
    assert_eq!(p.mode, OffsetMode::Adaptive);
    assert_eq!(p.step, 20.0);
    assert!((p.limit - 36.0).abs() < 1e-12);
}

#[test]
fn empty_margin_box_yields_no_strips() {
    let info = shape(plain(0.0, 0.0), ShapeSource::Box, ReferenceBox::MarginBox, 0.0);
    assert!(info.offsets(&OffsetParams::step(10.0)).unwrap().is_empty());
    assert!(info.offsets(&OffsetParams::for_font_size(10.0)).unwrap().is_empty());
}

struct MemorySource(Option<Vec<u8>>);

impl ImageSource for MemorySource {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Vec<u8>>> {
        let result = self.0.clone().ok_or_else(|| ShapeError::ImageFetch {
            url: url.to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });
        async move { result }.boxed()
    }
}

fn half_opaque_png() -> Vec<u8> {
    let img = RgbaImage::from_fn(100, 100, |x, _| Rgba([0, 0, 0, if x < 50 { 255 } else { 0 }]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn image_shape(source: &MemorySource, margin: f64) -> ShapeInfo {
    let m = plain(100.0, 100.0);
    let image = ShapeSource::Image {
        url: "half.png".into(),
    };
    let value = ShapeValue::resolve(&m, image, ReferenceBox::MarginBox, margin, 0.5);
    futures::executor::block_on(ShapeInfo::build(m, value, source))
}

#[test]
fn image_shapes_are_built_asynchronously() {
    let source = MemorySource(Some(half_opaque_png()));
    let info = image_shape(&source, 0.0);
    assert_eq!(info.geometry().kind(), "raster");
    assert_offsets(&step_offsets(&info, 20.0), &[50.0; 5]);
    // Image shapes always step, even in adaptive mode.
    assert_eq!(info.offsets(&OffsetParams::for_font_size(20.0)).unwrap().len(), 5);

    let info = image_shape(&source, 10.0);
    assert_offsets(&step_offsets(&info, 20.0), &[60.0; 5]);

    // A missing image excludes the whole margin box.
    let info = image_shape(&MemorySource(None), 0.0);
    assert_offsets(&step_offsets(&info, 20.0), &[100.0; 5]);
}

#[test]
fn built_shapes_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShapeInfo>();

    let info = shape(
        plain(100.0, 100.0),
        inset(20.0, 21.0, 60.0, 58.0, [[0.0; 2]; 4]),
        ReferenceBox::MarginBox,
        0.0,
    );
    let expected = step_offsets(&info, 20.0);
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| assert_eq!(step_offsets(&info, 20.0), expected));
        }
    });
}
