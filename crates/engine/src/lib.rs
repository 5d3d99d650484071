//! # stopline-engine
//!
//! Turns a parsed geodata query result into a schematic transit route
//! diagram: an ordered Route → Stop → Badge tree, laid out as a flat stream
//! of draw commands with absolute coordinates.
//!
//! The engine holds no state across requests and performs no I/O; fetching
//! the graph and serializing the commands are its callers' concerns.
//!
//! ## Example
//!
//! ```
//! use stopline_engine::prelude::*;
//!
//! let stop_a = GeoNode::new(1, 54.7551, 83.0934)
//!     .with_tag("public_transport", "stop_position")
//!     .with_tag("name", "Вокзал");
//! let stop_b = GeoNode::new(2, 54.7610, 83.1120)
//!     .with_tag("public_transport", "stop_position")
//!     .with_tag("name", "Центр");
//! let route = Relation::new(10)
//!     .with_tag("type", "route")
//!     .with_tag("ref", "21")
//!     .with_tag("network", "berdskpt")
//!     .with_member(MemberTarget::Node(NodeId::new(1)), "stop")
//!     .with_member(MemberTarget::Node(NodeId::new(2)), "stop");
//!
//! let graph = QueryGraph::new(vec![stop_a, stop_b], vec![route]);
//! let query = RouteQuery::new("21").with_network("berdskpt");
//!
//! let routes = assemble(&query, &graph);
//! assert_eq!(routes.len(), 1);
//! assert_eq!(routes[0].stops.len(), 2);
//!
//! let scheme = layout(&routes, "en");
//! assert!(scheme.total_height > 0);
//! ```

pub mod assemble;
pub mod classify;
pub mod geomath;
pub mod identifiers;
pub mod layout;
pub mod model;
pub mod order;
pub mod spatial;
pub mod style;

// Re-exports for convenience
pub mod prelude {
    pub use crate::assemble::{assemble, AssemblyError};
    pub use crate::classify::classify;
    pub use crate::identifiers::{NodeId, RelationId};
    pub use crate::layout::{layout, DrawCommand, SchemeLayout};
    pub use crate::model::{
        Badge, BadgeVariant, GeoNode, Member, MemberTarget, PoiKind, QueryGraph, Relation, Route,
        RouteQuery, Stop,
    };
    pub use crate::order::normalize;
    pub use crate::spatial::ProximityIndex;
}

pub use prelude::*;
