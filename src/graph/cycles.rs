//! Iterative three-color cycle detection

use super::TokenGraph;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Find all cycles in the graph.
///
/// Standard three-color DFS: white = unvisited, gray = on the current path,
/// black = fully explored. A back edge into a gray node closes a cycle, which
/// is reconstructed from that node's first occurrence on the current path up
/// to the current position. The traversal is iterative so depth is bounded by
/// the heap, not the call stack.
pub(super) fn detect(graph: &TokenGraph) -> Vec<Vec<String>> {
    let mut color: HashMap<&str, Color> = graph.nodes().map(|n| (n, Color::White)).collect();
    let mut cycles: Vec<Vec<String>> = Vec::new();

    for start in graph.nodes() {
        if color.get(start) != Some(&Color::White) {
            continue;
        }

        // (node, index of next outgoing edge to try)
        let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
        let mut path: Vec<&str> = vec![start];
        color.insert(start, Color::Gray);

        while let Some((node, next_edge)) = stack.last_mut() {
            let node = *node;
            let edges = graph.references(node);

            if *next_edge < edges.len() {
                let target = edges[*next_edge].as_str();
                *next_edge += 1;

                // References to undefined names cannot close a cycle
                if !graph.contains(target) {
                    continue;
                }

                match color.get(target).copied().unwrap_or(Color::White) {
                    Color::White => {
                        color.insert(target, Color::Gray);
                        stack.push((target, 0));
                        path.push(target);
                    }
                    Color::Gray => {
                        if let Some(pos) = path.iter().position(|n| *n == target) {
                            let mut cycle: Vec<String> =
                                path[pos..].iter().map(|n| n.to_string()).collect();
                            cycle.push(target.to_string());
                            cycles.push(cycle);
                        }
                    }
                    Color::Black => {}
                }
            } else {
                color.insert(node, Color::Black);
                stack.pop();
                path.pop();
            }
        }
    }

    cycles
}
