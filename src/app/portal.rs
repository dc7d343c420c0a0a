use std::collections::HashMap;

use anyhow::{Result, anyhow};

use crate::network::NetworkGraph;

#[derive(Clone, Debug)]
pub(in crate::app) struct PersonDetail {
    pub full_name: String,
    pub email: String,
    pub gender: &'static str,
    pub relationship_count: u32,
}

/// Outward calls the graph view makes on its host. The view never renders
/// detail or relationship-management content itself; it only requests it.
pub(in crate::app) trait NodePortal {
    /// Detail payload for the person modal.
    fn person_detail(&self, person_id: i64) -> Result<PersonDetail>;

    /// Navigation target for the relationship-management view.
    fn relationships_target(&self, person_id: i64) -> String;

    /// Whether the host provides a node context menu. Probed once when the
    /// view is constructed, never per event.
    fn has_context_menu(&self) -> bool {
        false
    }
}

/// Portal backed by the loaded document itself; stands in for a remote host.
pub(in crate::app) struct LocalPortal {
    details: HashMap<i64, PersonDetail>,
}

impl LocalPortal {
    pub fn from_graph(graph: &NetworkGraph) -> Self {
        let details = graph
            .nodes
            .iter()
            .map(|person| {
                (
                    person.id,
                    PersonDetail {
                        full_name: person.full_name(),
                        email: person.email.clone(),
                        gender: person.gender.label(),
                        relationship_count: person.relationship_count,
                    },
                )
            })
            .collect();
        Self { details }
    }
}

impl NodePortal for LocalPortal {
    fn person_detail(&self, person_id: i64) -> Result<PersonDetail> {
        self.details
            .get(&person_id)
            .cloned()
            .ok_or_else(|| anyhow!("no detail available for person id {person_id}"))
    }

    fn relationships_target(&self, person_id: i64) -> String {
        format!("/persons/{person_id}/relationships")
    }

    fn has_context_menu(&self) -> bool {
        true
    }
}
