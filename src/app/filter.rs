use std::collections::HashSet;

use crate::network::NetworkGraph;

use super::config::OpacityLevels;

/// The full/dimmed visibility assignment the active highlight mode puts on
/// the three visual channels. Exactly one mode's partition is live at a
/// time; applying another mode overwrites it wholesale.
pub(in crate::app) struct OpacityPartition {
    pub nodes: Vec<f32>,
    pub links: Vec<f32>,
    pub labels: Vec<f32>,
}

impl OpacityPartition {
    fn uniform(graph: &NetworkGraph, node: f32, link: f32, label: f32) -> Self {
        Self {
            nodes: vec![node; graph.node_count()],
            links: vec![link; graph.link_count()],
            labels: vec![label; graph.node_count()],
        }
    }
}

/// Everything back to defaults: triggered by a background click, an emptied
/// input, or the "all" selector option.
pub(in crate::app) fn clear_highlight(
    graph: &NetworkGraph,
    levels: OpacityLevels,
) -> OpacityPartition {
    OpacityPartition::uniform(graph, levels.node_full, levels.link_default, levels.node_full)
}

/// Node click: the clicked node, its 1-hop neighbors, and the links touching
/// the clicked node stay at full opacity; everything else dims.
pub(in crate::app) fn neighborhood_highlight(
    graph: &NetworkGraph,
    levels: OpacityLevels,
    clicked: usize,
) -> OpacityPartition {
    let mut connected = HashSet::from([clicked]);
    for link in &graph.links {
        if link.source == clicked {
            connected.insert(link.target);
        }
        if link.target == clicked {
            connected.insert(link.source);
        }
    }

    let mut partition = OpacityPartition::uniform(
        graph,
        levels.node_dim,
        levels.link_dim,
        levels.node_dim,
    );
    for &index in &connected {
        partition.nodes[index] = levels.node_full;
        partition.labels[index] = levels.node_full;
    }
    for (slot, link) in graph.links.iter().enumerate() {
        if link.source == clicked || link.target == clicked {
            partition.links[slot] = levels.link_active;
        }
    }
    partition
}

/// Case-insensitive substring match on first or last name. Links are never
/// dimmed by search; they always sit at their default opacity.
pub(in crate::app) fn search_highlight(
    graph: &NetworkGraph,
    levels: OpacityLevels,
    term: &str,
) -> OpacityPartition {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return clear_highlight(graph, levels);
    }

    let mut partition = OpacityPartition::uniform(
        graph,
        levels.node_dim,
        levels.link_default,
        levels.node_dim,
    );
    for (index, person) in graph.nodes.iter().enumerate() {
        if person.first_name.to_lowercase().contains(&term)
            || person.last_name.to_lowercase().contains(&term)
        {
            partition.nodes[index] = levels.node_full;
            partition.labels[index] = levels.node_full;
        }
    }
    partition
}

/// Relationship-type selector: links carrying the chosen code and the nodes
/// they touch stay visible; everything else dims. The empty code is the
/// "all" option and clears the highlight.
pub(in crate::app) fn relationship_highlight(
    graph: &NetworkGraph,
    levels: OpacityLevels,
    code: &str,
) -> OpacityPartition {
    if code.is_empty() {
        return clear_highlight(graph, levels);
    }

    let mut partition = OpacityPartition::uniform(
        graph,
        levels.node_dim,
        levels.link_dim,
        levels.node_dim,
    );
    for (slot, link) in graph.links.iter().enumerate() {
        if link.relationship_code == code {
            partition.links[slot] = levels.link_match;
            for index in [link.source, link.target] {
                partition.nodes[index] = levels.node_full;
                partition.labels[index] = levels.node_full;
            }
        }
    }
    partition
}
