//! Decides whether a node is itself a notable point of interest.
//!
//! Only railway stations qualify; everything else is at most a crossing
//! point for foreign routes, which the proximity scan resolves separately.

use crate::model::{Badge, GeoNode, PoiKind};

/// Classify a node as a POI badge, or `None` if it is not one.
///
/// A node tagged `railway=station` yields a badge; `station=subway` selects
/// the metro icon, any other (or no) `station` sub-tag means a plain train
/// station. The node's `colour` tag is carried along when present so the
/// renderer can skip the name-derived fallback.
pub fn classify(node: &GeoNode) -> Option<Badge> {
    if node.tag("railway") != Some("station") {
        return None;
    }

    let kind = if node.tag("station") == Some("subway") {
        PoiKind::Metro
    } else {
        PoiKind::Train
    };

    Some(Badge::Poi {
        kind,
        colour: node.tag("colour").map(str::to_owned),
    })
}
