//! Generic A* over anything that can list its neighbours and price a step.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

/// Capability a graph node needs for [`find_path`].
pub trait Node: Copy + Eq + Hash {
    /// Nodes reachable in one step. Impassable nodes must not be listed.
    fn neighbours(&self) -> Vec<Self>;
    /// Price of stepping from `self` onto `neighbour`.
    fn cost_to(&self, neighbour: &Self) -> f32;
    /// Heuristic estimate of the remaining cost to `goal`.
    fn estimated_cost_to(&self, goal: &Self) -> f32;
}

/// Frontier entry. Lowest `f` pops first; equal `f` pops in push order.
#[derive(Debug, Clone, Copy)]
struct OpenEntry<N> {
    node: N,
    g: f32,
    f: f32,
    seq: u64,
}

impl<N> PartialEq for OpenEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for OpenEntry<N> {}

impl<N> Ord for OpenEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N> PartialOrd for OpenEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path from `start` to `goal`, both included, in walking order.
///
/// An empty result means no path. That includes `start == goal`, which
/// callers have to handle themselves.
///
/// The open set is a binary heap with lazy deletion: relaxing a node pushes
/// a fresh entry and the stale one is skipped when popped.
pub fn find_path<N: Node>(start: N, goal: N) -> Vec<N> {
    if start == goal {
        return Vec::new();
    }

    let mut open = BinaryHeap::new();
    let mut closed: HashSet<N> = HashSet::new();
    let mut g_scores: HashMap<N, f32> = HashMap::new();
    let mut came_from: HashMap<N, N> = HashMap::new();
    let mut seq = 0u64;

    g_scores.insert(start, 0.0);
    open.push(OpenEntry {
        node: start,
        g: 0.0,
        f: start.estimated_cost_to(&goal),
        seq,
    });

    while let Some(current) = open.pop() {
        if closed.contains(&current.node) {
            continue;
        }
        if current.node == goal {
            return reconstruct(&came_from, start, goal);
        }
        closed.insert(current.node);

        for neighbour in current.node.neighbours() {
            if closed.contains(&neighbour) {
                continue;
            }
            let tentative_g = current.g + current.node.cost_to(&neighbour);
            let known = g_scores.get(&neighbour).copied().unwrap_or(f32::INFINITY);
            if tentative_g < known {
                g_scores.insert(neighbour, tentative_g);
                came_from.insert(neighbour, current.node);
                seq += 1;
                open.push(OpenEntry {
                    node: neighbour,
                    g: tentative_g,
                    f: tentative_g + neighbour.estimated_cost_to(&goal),
                    seq,
                });
            }
        }
    }

    Vec::new()
}

fn reconstruct<N: Node>(came_from: &HashMap<N, N>, start: N, goal: N) -> Vec<N> {
    let mut path = vec![goal];
    let mut node = goal;
    while node != start {
        match came_from.get(&node) {
            Some(prev) => {
                node = *prev;
                path.push(node);
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Sum of step costs along `path`.
pub fn path_cost<N: Node>(path: &[N]) -> f32 {
    path.windows(2).map(|w| w[0].cost_to(&w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Points on a line graph 0..len with optional blocked points.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct LinePoint<'a> {
        at: i32,
        blocked: &'a [i32],
        len: i32,
    }

    impl Node for LinePoint<'_> {
        fn neighbours(&self) -> Vec<Self> {
            [self.at - 1, self.at + 1]
                .into_iter()
                .filter(|p| *p >= 0 && *p < self.len && !self.blocked.contains(p))
                .map(|at| LinePoint { at, ..*self })
                .collect()
        }

        fn cost_to(&self, _neighbour: &Self) -> f32 {
            1.0
        }

        fn estimated_cost_to(&self, goal: &Self) -> f32 {
            (goal.at - self.at).abs() as f32
        }
    }

    fn point(at: i32, blocked: &[i32]) -> LinePoint<'_> {
        LinePoint { at, blocked, len: 10 }
    }

    #[test]
    fn walks_the_line() {
        let path = find_path(point(2, &[]), point(6, &[]));
        let ats: Vec<_> = path.iter().map(|p| p.at).collect();
        assert_eq!(ats, vec![2, 3, 4, 5, 6]);
        assert_eq!(path_cost(&path), 4.0);
    }

    #[test]
    fn same_start_and_goal_is_empty() {
        assert!(find_path(point(3, &[]), point(3, &[])).is_empty());
    }

    #[test]
    fn blocked_line_is_empty() {
        let blocked = [5];
        assert!(find_path(point(1, &blocked), point(8, &blocked)).is_empty());
    }

    #[test]
    fn frontier_pops_lowest_f_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { node: 'a', g: 0.0, f: 2.0, seq: 0 });
        heap.push(OpenEntry { node: 'b', g: 0.0, f: 1.0, seq: 1 });
        heap.push(OpenEntry { node: 'c', g: 0.0, f: 1.0, seq: 2 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.node)).collect();
        assert_eq!(order, vec!['b', 'c', 'a']);
    }
}
