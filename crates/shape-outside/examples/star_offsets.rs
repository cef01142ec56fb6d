//! Print step offsets for a few random star polygons, for a quick visual check.
//!
//! Usage:
//!   cargo run -p shape-outside --example star_offsets -- left
//!   cargo run -p shape-outside --example star_offsets -- right
//!
//! Each sample is a 100x100 float with a 12-vertex star and a 5px margin;
//! one line per 10px strip, drawn as a bar of the offset width.

use shape_outside::api::{
    draw_star_polygon, BasicShape, BoxMetrics, FillRule, FloatSide, OffsetParams, ReferenceBox,
    ReplayToken, ShapeInfo, ShapeSource, ShapeValue, StarCfg,
};

fn main() {
    let float = match std::env::args().nth(1).as_deref() {
        None | Some("left") => FloatSide::Left,
        Some("right") => FloatSide::Right,
        Some(_) => {
            eprintln!("usage: star_offsets [left|right]");
            return;
        }
    };
    let metrics = BoxMetrics {
        width: 100.0,
        height: 100.0,
        float,
        ..BoxMetrics::default()
    };
    for index in 0..3 {
        let points = draw_star_polygon(StarCfg::default(), ReplayToken { seed: 2025, index });
        let source = ShapeSource::Basic(BasicShape::Polygon {
            fill_rule: FillRule::Nonzero,
            points,
        });
        let value = ShapeValue::resolve(&metrics, source, ReferenceBox::MarginBox, 5.0, 0.0);
        let Some(info) = ShapeInfo::from_value(metrics.clone(), value) else {
            continue;
        };
        println!("sample {index}:");
        match info.offsets(&OffsetParams::step(10.0)) {
            Ok(offsets) => {
                for o in offsets {
                    let bar = "#".repeat((o.offset / 2.0).round() as usize);
                    println!("{:>5.1} {:>6.2} {bar}", o.top, o.offset);
                }
            }
            Err(err) => eprintln!("sample {index}: {err}"),
        }
    }
}
