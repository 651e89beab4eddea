use chrono::{DateTime, Utc};
use log::warn;
use std::collections::HashSet;

/// Regional federation. `parent_id` links to another federation of the
/// same kind; `head_federation_id` crosses into the umbrella level.
#[derive(Debug, Clone)]
pub struct Federation {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<u32>,
    pub head_federation_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub country: String,
    pub contact_email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Top-level umbrella organization above regional federations.
#[derive(Debug, Clone)]
pub struct HeadFederation {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub country: String,
    pub contact_email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal view of a self-referential organization row, enough to walk
/// parent links without dragging full entities around.
#[derive(Debug, Clone)]
pub struct OrgNode {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<u32>,
}

/// Walks parent links upward from `start` and returns the chain top-down
/// (root first). A repeated id stops the walk: a miswritten self-parent
/// must not hang a request.
pub fn hierarchy(start: u32, lookup: impl Fn(u32) -> Option<OrgNode>) -> Vec<OrgNode> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = lookup(start);

    while let Some(node) = current {
        if !seen.insert(node.id) {
            warn!("organization hierarchy cycle at id {}", node.id);
            break;
        }
        current = node.parent_id.and_then(&lookup);
        chain.push(node);
    }

    chain.reverse();
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u32, parent: Option<u32>) -> OrgNode {
        OrgNode {
            id,
            name: format!("org-{}", id),
            slug: format!("org-{}", id),
            parent_id: parent,
        }
    }

    fn lookup_in(nodes: Vec<OrgNode>) -> impl Fn(u32) -> Option<OrgNode> {
        move |id| nodes.iter().find(|n| n.id == id).cloned()
    }

    #[test]
    fn test_hierarchy_top_down() {
        let lookup = lookup_in(vec![node(1, None), node(2, Some(1)), node(3, Some(2))]);
        let chain = hierarchy(3, lookup);
        let ids: Vec<u32> = chain.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_hierarchy_single_node() {
        let lookup = lookup_in(vec![node(7, None)]);
        let chain = hierarchy(7, lookup);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].id, 7);
    }

    #[test]
    fn test_hierarchy_cycle_terminates() {
        let lookup = lookup_in(vec![node(1, Some(2)), node(2, Some(1))]);
        let chain = hierarchy(1, lookup);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_hierarchy_missing_start() {
        let lookup = lookup_in(vec![]);
        assert!(hierarchy(42, lookup).is_empty());
    }
}
