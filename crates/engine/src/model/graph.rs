//! Parsed geodata query result: nodes, relations, memberships.
//!
//! This is the shape the query client hands over after fetching and decoding
//! a result set. The engine never talks to the network itself.

use std::collections::HashMap;

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::identifiers::{NodeId, RelationId};

/// A geographic node from the query result.
///
/// The wire format uses latitude/longitude `(0, 0)` as a sentinel for "not a
/// physical point" (relation supernodes and similar); that sentinel is
/// normalized to `location: None` on construction so distance code never has
/// to special-case it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub struct GeoNode {
    pub id: NodeId,
    location: Option<Point<f64>>,
    pub tags: HashMap<String, String>,
}

#[derive(Serialize, Deserialize)]
struct RawNode {
    id: NodeId,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl From<RawNode> for GeoNode {
    fn from(raw: RawNode) -> Self {
        let location = if raw.lat == 0.0 && raw.lon == 0.0 {
            None
        } else {
            Some(Point::new(raw.lon, raw.lat))
        };
        Self {
            id: raw.id,
            location,
            tags: raw.tags,
        }
    }
}

impl From<GeoNode> for RawNode {
    fn from(node: GeoNode) -> Self {
        let (lat, lon) = match node.location {
            Some(p) => (p.y(), p.x()),
            None => (0.0, 0.0),
        };
        Self {
            id: node.id,
            lat,
            lon,
            tags: node.tags,
        }
    }
}

impl GeoNode {
    pub fn new(id: impl Into<NodeId>, lat: f64, lon: f64) -> Self {
        RawNode {
            id: id.into(),
            lat,
            lon,
            tags: HashMap::new(),
        }
        .into()
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Physical coordinate, `None` for non-physical supernodes.
    pub fn location(&self) -> Option<Point<f64>> {
        self.location
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Tag value with a missing key reading as the empty string, matching
    /// how the upstream query language compares tags.
    pub fn tag_or_empty(&self, key: &str) -> &str {
        self.tag(key).unwrap_or("")
    }
}

/// What a relation member points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberTarget {
    Node(NodeId),
    Relation(RelationId),
}

/// An ordered relation member with its free-form role string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub target: MemberTarget,
    pub role: String,
}

/// A geodata relation: ordered members plus a tag map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: RelationId,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Relation {
    pub fn new(id: impl Into<RelationId>) -> Self {
        Self {
            id: id.into(),
            members: Vec::new(),
            tags: HashMap::new(),
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn with_member(mut self, target: MemberTarget, role: &str) -> Self {
        self.members.push(Member {
            target,
            role: role.to_owned(),
        });
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn tag_or_empty(&self, key: &str) -> &str {
        self.tag(key).unwrap_or("")
    }
}

/// One complete query result.
///
/// Node and relation order both matter: relations drive the output route
/// order, and node order is observable through the sort tie-break applied to
/// badges, so both are kept exactly as received.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGraph", into = "RawGraph")]
pub struct QueryGraph {
    nodes: Vec<GeoNode>,
    relations: Vec<Relation>,
    node_index: HashMap<NodeId, usize>,
}

#[derive(Default, Serialize, Deserialize)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<GeoNode>,
    #[serde(default)]
    relations: Vec<Relation>,
}

impl From<RawGraph> for QueryGraph {
    fn from(raw: RawGraph) -> Self {
        QueryGraph::new(raw.nodes, raw.relations)
    }
}

impl From<QueryGraph> for RawGraph {
    fn from(graph: QueryGraph) -> Self {
        Self {
            nodes: graph.nodes,
            relations: graph.relations,
        }
    }
}

impl QueryGraph {
    pub fn new(nodes: Vec<GeoNode>, relations: Vec<Relation>) -> Self {
        let node_index = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .collect();
        Self {
            nodes,
            relations,
            node_index,
        }
    }

    pub fn nodes(&self) -> &[GeoNode] {
        &self.nodes
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn node(&self, id: NodeId) -> Option<&GeoNode> {
        self.node_index.get(&id).map(|&idx| &self.nodes[idx])
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relations.is_empty()
    }
}
