mod document;
mod graph;

pub use document::{load_network_graph, parse_network_document};
pub use graph::{GenderCode, NetworkGraph, PersonNode, RelationshipLink};
