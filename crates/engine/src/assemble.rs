//! Builds the ordered Route → Stop → Badge tree from a query result.

use log::{debug, warn};
use thiserror::Error;

use crate::identifiers::{NodeId, RelationId};
use crate::model::{MemberTarget, QueryGraph, Relation, Route, RouteQuery, Stop};
use crate::order::normalize;
use crate::spatial::ProximityIndex;

/// Member roles that turn into stops, in the source's vocabulary.
pub const STOP_ROLES: [&str; 3] = ["stop", "stop_exit_only", "stop_entry_only"];

/// The one fatal condition per route: the graph contradicts itself.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("relation {relation} references missing node {node}")]
    StructuralInconsistency { relation: RelationId, node: NodeId },
}

/// Does this relation answer the query? Missing tags compare as empty
/// strings, so an empty query field matches untagged relations — the same
/// equality the upstream query language applies. Quote escaping of the raw
/// query text is the query client's problem, not ours; we only ever see
/// parsed tags.
fn matches_query(relation: &Relation, query: &RouteQuery) -> bool {
    relation.tag("type") == Some("route")
        && relation.tag_or_empty("ref") == query.reference
        && (relation.tag_or_empty("network") == query.network
            || relation.tag_or_empty("operator") == query.operator)
}

/// Assemble every route matching the query, in graph relation order.
///
/// An empty graph or a query nothing matches yields an empty list, never an
/// error. A route whose members point at nodes missing from the graph is
/// dropped with a warning; the remaining routes still assemble.
pub fn assemble(query: &RouteQuery, graph: &QueryGraph) -> Vec<Route> {
    let index = ProximityIndex::build(graph);
    let radius_m = query.effective_radius();

    graph
        .relations()
        .iter()
        .filter(|relation| matches_query(relation, query))
        .filter_map(|relation| match build_route(relation, graph, &index, radius_m) {
            Ok(route) => Some(route),
            Err(err) => {
                warn!("skipping route relation {}: {err}", relation.id);
                None
            }
        })
        .collect()
}

fn build_route(
    relation: &Relation,
    graph: &QueryGraph,
    index: &ProximityIndex<'_>,
    radius_m: f64,
) -> Result<Route, AssemblyError> {
    let reference = relation.tag_or_empty("ref").to_owned();
    let mut stops = Vec::new();

    for member in &relation.members {
        let MemberTarget::Node(node_id) = member.target else {
            continue;
        };
        if !STOP_ROLES.contains(&member.role.as_str()) {
            continue;
        }

        let node = graph
            .node(node_id)
            .ok_or(AssemblyError::StructuralInconsistency {
                relation: relation.id,
                node: node_id,
            })?;

        let badges = normalize(index.badges_near(node_id, radius_m, &reference));
        stops.push(Stop {
            name: node.tag_or_empty("name").to_owned(),
            name_en: node.tag_or_empty("name:en").to_owned(),
            badges,
        });
    }

    debug!(
        "assembled route {} ({}): {} stops",
        reference,
        relation.tag_or_empty("name"),
        stops.len()
    );

    Ok(Route {
        reference,
        name: relation.tag_or_empty("name").to_owned(),
        from: relation.tag_or_empty("from").to_owned(),
        to: relation.tag_or_empty("to").to_owned(),
        colour: relation.tag("colour").map(str::to_owned),
        stops,
    })
}
