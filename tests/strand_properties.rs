// Property tests for strand extraction over randomly generated hair meshes
use hair_export::{extract_strands, Edge, Vertex};
use proptest::prelude::*;
use std::collections::HashSet;

/// Strands of random length over shuffled vertex indices
fn hair_mesh() -> impl Strategy<Value = (Vec<Vertex>, Vec<Edge>, Vec<usize>)> {
    prop::collection::vec(2usize..8, 0..12)
        .prop_flat_map(|lens| {
            let total: usize = lens.iter().sum();
            let coords = prop::collection::vec(
                (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0),
                total,
            );
            let order = Just((0..total as u32).collect::<Vec<u32>>()).prop_shuffle();
            (Just(lens), coords, order)
        })
        .prop_map(|(lens, coords, order)| {
            let vertices: Vec<Vertex> = coords
                .into_iter()
                .map(|(x, y, z)| Vertex::new(x, y, z))
                .collect();
            let mut edges = Vec::new();
            let mut next = 0;
            for &len in &lens {
                for k in 0..len - 1 {
                    edges.push(Edge::new(order[next + k], order[next + k + 1]));
                }
                next += len;
            }
            (vertices, edges, lens)
        })
}

proptest! {
    #[test]
    fn counts_and_lengths_match((vertices, edges, lens) in hair_mesh()) {
        let set = extract_strands(&vertices, &edges).unwrap();

        let expected: Vec<u32> = lens.iter().map(|&n| n as u32).collect();
        prop_assert_eq!(set.strand_vertex_counts(), expected.as_slice());

        let referenced: HashSet<u32> = edges.iter().flat_map(|e| [e.head, e.tail]).collect();
        prop_assert_eq!(set.vertex_count(), referenced.len());
        prop_assert_eq!(set.root_relative_positions().len(), 3 * set.vertex_count());
    }

    #[test]
    fn positions_are_root_relative((vertices, edges, _lens) in hair_mesh()) {
        let set = extract_strands(&vertices, &edges).unwrap();

        // Rebuild each strand's vertex order from the edges
        let mut strands: Vec<Vec<u32>> = Vec::new();
        for edge in &edges {
            let continues = strands.last().and_then(|s| s.last()) == Some(&edge.head);
            if continues {
                strands.last_mut().unwrap().push(edge.tail);
            } else {
                strands.push(vec![edge.head, edge.tail]);
            }
        }

        let mut longest: Option<f32> = None;
        for (strand, slice) in strands.iter().zip(set.strand_positions()) {
            let root = vertices[strand[0] as usize];
            prop_assert_eq!(&slice[0..3], &[root.x, root.z, root.y]);
            for (k, &idx) in strand.iter().enumerate().skip(1) {
                let v = vertices[idx as usize];
                prop_assert_eq!(
                    &slice[k * 3..k * 3 + 3],
                    &[v.x - root.x, v.z - root.z, v.y - root.y]
                );
            }

            let tail = vertices[*strand.last().unwrap() as usize];
            let (dx, dy, dz) = (tail.x - root.x, tail.y - root.y, tail.z - root.z);
            let length = (dx * dx + dy * dy + dz * dz).sqrt();
            longest = Some(longest.map_or(length, |l| l.max(length)));
        }

        match (set.longest_strand_length(), longest) {
            (Some(actual), Some(expected)) => {
                prop_assert!((actual - expected).abs() <= 1e-3 * expected.max(1.0));
                prop_assert!(actual >= 0.0);
            }
            (None, None) => {}
            other => prop_assert!(false, "longest mismatch: {:?}", other),
        }
    }

    #[test]
    fn extraction_is_idempotent((vertices, edges, _lens) in hair_mesh()) {
        let first = extract_strands(&vertices, &edges).unwrap();
        let second = extract_strands(&vertices, &edges).unwrap();
        prop_assert_eq!(first, second);
    }
}
