//! Find the nearest point to each point of a small set.
use kdbox::prelude::*;

fn main() {
    let mut tree = KdTree::with_capacity(4);
    let _ = tree.add(0, 0);
    let _ = tree.add(3, 4);
    let _ = tree.add(10, 10);
    let _ = tree.add(11, 9);
    tree.build().expect("build");

    for position in 0..tree.len() {
        let nearest = tree.nearest_neighbor(position).expect("query");
        let entries = tree.entries();
        println!(
            "box {} at {:?}: nearest is box {} at {:?}",
            entries[position].box_index, entries[position].point, entries[nearest].box_index, entries[nearest].point
        );
    }

    let mut results = Vec::new();
    tree.neighbors_within_radius(0, 200, &mut results).expect("query");
    println!("within sqrt(200) of tree position 0: {results:?}");
}
