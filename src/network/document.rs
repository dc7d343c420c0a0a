use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::graph::{GenderCode, NetworkGraph, PersonNode, RelationshipLink};

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    nodes: Vec<RawPerson>,
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawPerson {
    id: i64,
    #[serde(rename = "firstName", default)]
    first_name: String,
    #[serde(rename = "lastName", default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(rename = "genderCode", default)]
    gender_code: Option<String>,
    #[serde(rename = "relationshipCount", default)]
    relationship_count: u32,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    source: i64,
    target: i64,
    #[serde(rename = "relationshipType", default)]
    relationship_type: String,
    #[serde(rename = "relationshipCode", default)]
    relationship_code: String,
}

pub fn load_network_graph(path: &Path) -> Result<NetworkGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph document {}", path.display()))?;
    parse_network_document(&raw)
        .with_context(|| format!("failed to parse graph document {}", path.display()))
}

pub fn parse_network_document(raw: &str) -> Result<NetworkGraph> {
    let document: RawDocument =
        serde_json::from_str(raw).context("invalid JSON in graph document")?;
    resolve(document)
}

fn resolve(document: RawDocument) -> Result<NetworkGraph> {
    let mut index_by_id = HashMap::with_capacity(document.nodes.len());
    let mut nodes = Vec::with_capacity(document.nodes.len());

    for (index, raw) in document.nodes.into_iter().enumerate() {
        if index_by_id.insert(raw.id, index).is_some() {
            bail!("duplicate person id {} in graph document", raw.id);
        }

        nodes.push(PersonNode {
            id: raw.id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            email: raw.email,
            gender: GenderCode::from_code(raw.gender_code.as_deref()),
            relationship_count: raw.relationship_count,
        });
    }

    let mut links = Vec::with_capacity(document.links.len());
    for raw in document.links {
        let Some(&source) = index_by_id.get(&raw.source) else {
            bail!("link references unknown person id {}", raw.source);
        };
        let Some(&target) = index_by_id.get(&raw.target) else {
            bail!("link references unknown person id {}", raw.target);
        };

        links.push(RelationshipLink {
            source,
            target,
            relationship_type: raw.relationship_type,
            relationship_code: raw.relationship_code,
        });
    }

    let max_connections = nodes
        .iter()
        .map(|node| node.relationship_count)
        .max()
        .unwrap_or(0)
        .max(1);

    Ok(NetworkGraph {
        nodes,
        links,
        max_connections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "nodes": [
            {"id": 1, "firstName": "Ada", "lastName": "Quinn", "email": "ada@example.com", "genderCode": "F", "relationshipCount": 4},
            {"id": 2, "firstName": "Ben", "lastName": "Ruiz", "email": "ben@example.com", "genderCode": "M", "relationshipCount": 0}
        ],
        "links": [
            {"source": 1, "target": 2, "relationshipType": "Friend", "relationshipCode": "FRD"}
        ]
    }"#;

    #[test]
    fn parses_and_resolves_links_to_indices() {
        let graph = parse_network_document(SAMPLE).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_count(), 1);
        assert_eq!(graph.links[0].source, 0);
        assert_eq!(graph.links[0].target, 1);
        assert_eq!(graph.nodes[0].gender, GenderCode::Female);
        assert_eq!(graph.nodes[0].full_name(), "Ada Quinn");
        assert_eq!(graph.max_connections, 4);
    }

    #[test]
    fn link_to_unknown_node_fails_at_load() {
        let raw = r#"{
            "nodes": [{"id": 1, "firstName": "Ada", "lastName": "Quinn"}],
            "links": [{"source": 1, "target": 99, "relationshipType": "Friend", "relationshipCode": "FRD"}]
        }"#;

        let error = parse_network_document(raw).unwrap_err();
        assert!(error.to_string().contains("unknown person id 99"));
    }

    #[test]
    fn duplicate_person_id_fails_at_load() {
        let raw = r#"{
            "nodes": [
                {"id": 7, "firstName": "Ada", "lastName": "Quinn"},
                {"id": 7, "firstName": "Ben", "lastName": "Ruiz"}
            ],
            "links": []
        }"#;

        let error = parse_network_document(raw).unwrap_err();
        assert!(error.to_string().contains("duplicate person id 7"));
    }

    #[test]
    fn empty_node_list_is_the_valid_empty_state() {
        let graph = parse_network_document(r#"{"nodes": [], "links": []}"#).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.max_connections, 1);
    }

    #[test]
    fn max_connections_floors_at_one() {
        let raw = r#"{
            "nodes": [
                {"id": 1, "firstName": "Ada", "lastName": "Quinn", "relationshipCount": 0},
                {"id": 2, "firstName": "Ben", "lastName": "Ruiz", "relationshipCount": 0}
            ],
            "links": []
        }"#;

        let graph = parse_network_document(raw).unwrap();
        assert_eq!(graph.max_connections, 1);
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(parse_network_document("not json").is_err());
        assert!(parse_network_document(r#"{"nodes": [{"firstName": "x"}]}"#).is_err());
    }

    #[test]
    fn missing_optional_fields_default() {
        let graph = parse_network_document(r#"{"nodes": [{"id": 3}], "links": []}"#).unwrap();
        assert_eq!(graph.nodes[0].gender, GenderCode::Unspecified);
        assert_eq!(graph.nodes[0].relationship_count, 0);
        assert!(graph.nodes[0].email.is_empty());
    }
}
