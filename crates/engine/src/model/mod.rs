//! Data model: the raw query-result graph on the input side, the assembled
//! Route → Stop → Badge tree on the output side.

pub mod graph;
pub mod scheme;

pub use graph::{GeoNode, Member, MemberTarget, QueryGraph, Relation};
pub use scheme::{Badge, BadgeVariant, PoiKind, Route, RouteQuery, Stop};
