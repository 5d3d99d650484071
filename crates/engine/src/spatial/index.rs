//! R-tree backed proximity lookup for badge collection.
//!
//! ## Two-stage filtering
//!
//! Candidates come out of the R-tree through a Euclidean envelope query in
//! degree space (conservatively sized, so it over-approximates), then the
//! exact haversine distance decides. Result sets are small, but each stop
//! triggers one scan, so the index keeps the per-request cost flat.

use geo::Point;
use rstar::{RTree, RTreeObject, AABB};

use crate::classify::classify;
use crate::geomath;
use crate::identifiers::NodeId;
use crate::model::{Badge, MemberTarget, QueryGraph, Relation};

/// Role a node must hold inside a foreign relation to count as a transfer
/// point.
const TRANSFER_ROLE: &str = "stop";

/// One coordinate-bearing node in the tree, remembering its position in the
/// graph's node list.
struct IndexedNode {
    point: [f64; 2],
    node_idx: usize,
    id: NodeId,
}

impl RTreeObject for IndexedNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Spatial index over every coordinate-bearing node of one query result.
///
/// Built once per request; the graph outlives the index, nothing is stored
/// across requests.
pub struct ProximityIndex<'g> {
    graph: &'g QueryGraph,
    tree: RTree<IndexedNode>,
}

impl<'g> ProximityIndex<'g> {
    pub fn build(graph: &'g QueryGraph) -> Self {
        let entries = graph
            .nodes()
            .iter()
            .enumerate()
            .filter_map(|(node_idx, node)| {
                node.location().map(|p| IndexedNode {
                    point: [p.x(), p.y()],
                    node_idx,
                    id: node.id,
                })
            })
            .collect();

        Self {
            graph,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Collect badge candidates around the given anchor stop.
    ///
    /// The anchor must resolve to its coordinate-bearing stop-position twin;
    /// anchors without one (or with a non-positive radius) yield nothing.
    /// Every other physical node strictly within `radius_m` is tried first
    /// as a POI, then as a transfer point for foreign routes. The output is
    /// raw: sorting and dedup happen in [`crate::order::normalize`].
    pub fn badges_near(&self, anchor: NodeId, radius_m: f64, current_ref: &str) -> Vec<Badge> {
        if radius_m <= 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        let Some(anchor_node) = self.graph.node(anchor) else {
            return Vec::new();
        };
        if anchor_node.tag("public_transport") != Some("stop_position") {
            return Vec::new();
        }
        let Some(center) = anchor_node.location() else {
            return Vec::new();
        };

        let dlat = geomath::lat_degrees(radius_m);
        let dlon = geomath::lon_degrees(radius_m, center.y());
        let envelope = AABB::from_corners(
            [center.x() - dlon, center.y() - dlat],
            [center.x() + dlon, center.y() + dlat],
        );

        let mut hits: Vec<&IndexedNode> = self
            .tree
            .locate_in_envelope(&envelope)
            .filter(|entry| entry.id != anchor)
            .filter(|entry| {
                let p = Point::new(entry.point[0], entry.point[1]);
                geomath::distance(center, p) < radius_m
            })
            .collect();

        // Tree iteration order is unspecified; restore graph order so the
        // downstream sort tie-break sees a deterministic sequence.
        hits.sort_unstable_by_key(|entry| entry.node_idx);

        let mut badges = Vec::new();
        for hit in hits {
            let node = &self.graph.nodes()[hit.node_idx];
            if let Some(poi) = classify(node) {
                badges.push(poi);
                continue;
            }
            self.collect_transfers(node.id, current_ref, &mut badges);
        }
        badges
    }

    /// One transfer badge per foreign route relation that stops at `node`.
    fn collect_transfers(&self, node: NodeId, current_ref: &str, out: &mut Vec<Badge>) {
        for relation in self.graph.relations() {
            if !is_foreign_route(relation, current_ref) {
                continue;
            }
            let stops_here = relation.members.iter().any(|member| {
                member.role == TRANSFER_ROLE && member.target == MemberTarget::Node(node)
            });
            if stops_here {
                out.push(Badge::Transfer {
                    route_ref: relation.tag_or_empty("ref").to_owned(),
                    colour: relation.tag("colour").map(str::to_owned),
                });
            }
        }
    }
}

/// A relation counts as a foreign route when it is a route, carries a
/// non-empty `ref`, and that ref differs from the route being assembled.
fn is_foreign_route(relation: &Relation, current_ref: &str) -> bool {
    relation.tag("type") == Some("route")
        && matches!(relation.tag("ref"), Some(r) if !r.is_empty() && r != current_ref)
}
