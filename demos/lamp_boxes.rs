//! Build one hit-test rectangle per lamp on a panel and select a group of them.
//!
//! Run with `RUST_LOG=debug` to see the pipeline log.

use kdbox::prelude::*;

fn main() {
    env_logger::init();

    // Lamp centers in millimeters: a row of indicators and a 3x3 button block.
    let mut lamps = vec![Point::new(10, 8), Point::new(25, 8), Point::new(40, 8), Point::new(55, 8)];
    for row in 0..3 {
        for col in 0..3 {
            lamps.push(Point::new(15 + col * 18, 30 + row * 18));
        }
    }
    let panel = Rect::new(0, 0, 80, 90);

    let mut entries = Entry::from_points(&lamps);
    let boxes = build_and_box(&mut entries, &panel).expect("bounding boxes");
    for (i, (lamp, rect)) in lamps.iter().zip(&boxes).enumerate() {
        println!(
            "lamp {i:>2} at ({:>3}, {:>3}): [{:>3}, {:>3}] - [{:>3}, {:>3}]",
            lamp.x, lamp.y, rect.left, rect.top, rect.right, rect.bottom
        );
    }

    // The button block as one movable selection.
    let selected: Vec<usize> = (4..lamps.len()).collect();
    let layout = select_boxes(&boxes, &selected).expect("selection");
    println!("\nselection of {} lamps: {} x {} mm", layout.boxes.len(), layout.width, layout.height);
}
