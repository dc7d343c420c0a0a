#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenderCode {
    Female,
    Male,
    Unspecified,
}

impl GenderCode {
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("F") => Self::Female,
            Some("M") => Self::Male,
            _ => Self::Unspecified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
            Self::Unspecified => "Unspecified",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PersonNode {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: GenderCode,
    pub relationship_count: u32,
}

impl PersonNode {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A relationship edge with both endpoints resolved to node indices.
#[derive(Clone, Debug)]
pub struct RelationshipLink {
    pub source: usize,
    pub target: usize,
    pub relationship_type: String,
    pub relationship_code: String,
}

#[derive(Clone, Debug)]
pub struct NetworkGraph {
    pub nodes: Vec<PersonNode>,
    pub links: Vec<RelationshipLink>,
    /// Largest relationship count across all nodes, floored at 1 so radius
    /// interpolation never divides by zero. Fixed at load time.
    pub max_connections: u32,
}

impl NetworkGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Distinct relationship codes, sorted, for the filter selector.
    pub fn relationship_codes(&self) -> Vec<String> {
        let mut codes = self
            .links
            .iter()
            .map(|link| link.relationship_code.clone())
            .collect::<Vec<_>>();
        codes.sort();
        codes.dedup();
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_code_mapping_is_total() {
        assert_eq!(GenderCode::from_code(Some("F")), GenderCode::Female);
        assert_eq!(GenderCode::from_code(Some("M")), GenderCode::Male);
        assert_eq!(GenderCode::from_code(Some("X")), GenderCode::Unspecified);
        assert_eq!(GenderCode::from_code(Some("")), GenderCode::Unspecified);
        assert_eq!(GenderCode::from_code(None), GenderCode::Unspecified);
    }

    #[test]
    fn gender_code_mapping_is_stable() {
        for _ in 0..3 {
            assert_eq!(GenderCode::from_code(Some("F")), GenderCode::Female);
            assert_eq!(GenderCode::from_code(None), GenderCode::Unspecified);
        }
    }

    #[test]
    fn relationship_codes_are_distinct_and_sorted() {
        let graph = NetworkGraph {
            nodes: Vec::new(),
            links: vec![
                RelationshipLink {
                    source: 0,
                    target: 1,
                    relationship_type: "Friend".to_owned(),
                    relationship_code: "FRD".to_owned(),
                },
                RelationshipLink {
                    source: 1,
                    target: 2,
                    relationship_type: "Colleague".to_owned(),
                    relationship_code: "CLG".to_owned(),
                },
                RelationshipLink {
                    source: 0,
                    target: 2,
                    relationship_type: "Friend".to_owned(),
                    relationship_code: "FRD".to_owned(),
                },
            ],
            max_connections: 1,
        };

        assert_eq!(graph.relationship_codes(), vec!["CLG", "FRD"]);
    }
}
