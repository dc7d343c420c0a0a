use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadTree;

const MIN_DISTANCE_SQ: f32 = 1e-6;

// Deterministic direction for coincident points, matching d3's jiggle intent.
fn separation_axis(from: usize, to: usize) -> Vec2 {
    let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

fn charge_between(point: Vec2, other: Vec2, strength: f32, index: usize) -> Vec2 {
    let delta = point - other;
    let distance_sq = delta.length_sq();
    if distance_sq < MIN_DISTANCE_SQ {
        return separation_axis(index, index + 1) * strength.abs();
    }
    // Negative strength repels: force points from `other` toward `point`.
    delta * (-strength / distance_sq)
}

/// Barnes-Hut accumulation of the many-body charge force on one node.
/// Distant cells are treated as a single body at their center of mass.
pub(super) fn accumulate_charge(
    tree: &QuadTree,
    index: usize,
    positions: &[Vec2],
    strength: f32,
    theta: f32,
    force: &mut Vec2,
) {
    if tree.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if tree.is_leaf() {
        for &other in &tree.indices {
            if other != index {
                *force += charge_between(point, positions[other], strength, index);
            }
        }
        return;
    }

    let delta = point - tree.center_of_mass;
    let distance_sq = delta.length_sq().max(MIN_DISTANCE_SQ);
    let far_enough = !tree.bounds.contains(point)
        && (tree.bounds.side_length() * tree.bounds.side_length()) < theta * theta * distance_sq;

    if far_enough {
        *force += delta * (-strength * tree.mass / distance_sq);
        return;
    }

    for child in tree.children.iter().flatten() {
        accumulate_charge(child, index, positions, strength, theta, force);
    }
}

/// Resolves circle overlap between every close pair, accumulating positional
/// displacement. Pinned nodes absorb none of the correction; their partner
/// takes the full push.
pub(super) fn resolve_collision_pairs(
    left: &QuadTree,
    right: &QuadTree,
    same: bool,
    positions: &[Vec2],
    radii: &[f32],
    pinned: &[bool],
    max_reach_sq: f32,
    displacements: &mut [Vec2],
) {
    if left.bounds.gap_sq_to(right.bounds) > max_reach_sq {
        return;
    }

    if left.is_leaf() && right.is_leaf() {
        if same {
            for (slot, &from) in left.indices.iter().enumerate() {
                for &to in &left.indices[slot + 1..] {
                    push_apart(from, to, positions, radii, pinned, displacements);
                }
            }
        } else {
            for &from in &left.indices {
                for &to in &right.indices {
                    push_apart(from, to, positions, radii, pinned, displacements);
                }
            }
        }
        return;
    }

    if same {
        for first in 0..4 {
            let Some(child_a) = left.children[first].as_deref() else {
                continue;
            };
            resolve_collision_pairs(
                child_a,
                child_a,
                true,
                positions,
                radii,
                pinned,
                max_reach_sq,
                displacements,
            );
            for second in (first + 1)..4 {
                if let Some(child_b) = left.children[second].as_deref() {
                    resolve_collision_pairs(
                        child_a,
                        child_b,
                        false,
                        positions,
                        radii,
                        pinned,
                        max_reach_sq,
                        displacements,
                    );
                }
            }
        }
        return;
    }

    let split_left = if left.is_leaf() {
        false
    } else if right.is_leaf() {
        true
    } else {
        left.bounds.half_extent >= right.bounds.half_extent
    };

    if split_left {
        for child in left.children.iter().flatten() {
            resolve_collision_pairs(
                child,
                right,
                false,
                positions,
                radii,
                pinned,
                max_reach_sq,
                displacements,
            );
        }
    } else {
        for child in right.children.iter().flatten() {
            resolve_collision_pairs(
                left,
                child,
                false,
                positions,
                radii,
                pinned,
                max_reach_sq,
                displacements,
            );
        }
    }
}

fn push_apart(
    from: usize,
    to: usize,
    positions: &[Vec2],
    radii: &[f32],
    pinned: &[bool],
    displacements: &mut [Vec2],
) {
    let min_distance = radii[from] + radii[to];
    let delta = positions[from] - positions[to];
    let distance_sq = delta.length_sq();
    if distance_sq >= min_distance * min_distance {
        return;
    }

    let (direction, distance) = if distance_sq < MIN_DISTANCE_SQ {
        (separation_axis(from, to), 0.0)
    } else {
        let distance = distance_sq.sqrt();
        (delta / distance, distance)
    };

    let overlap = min_distance - distance;
    match (pinned[from], pinned[to]) {
        (false, false) => {
            displacements[from] += direction * (overlap * 0.5);
            displacements[to] -= direction * (overlap * 0.5);
        }
        (true, false) => displacements[to] -= direction * overlap,
        (false, true) => displacements[from] += direction * overlap,
        (true, true) => {}
    }
}
