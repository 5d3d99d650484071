//! Assembled scheme model: routes, stops and the badges attached to them.

use serde::{Deserialize, Serialize};

use crate::style;

/// Default proximity radius for badge collection, in meters.
pub const DEFAULT_POI_RADIUS_M: f64 = 300.0;

/// Sub-kind of a point-of-interest badge, rendered as an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiKind {
    Train,
    Metro,
}

impl PoiKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PoiKind::Train => "train",
            PoiKind::Metro => "metro",
        }
    }
}

/// Discriminant of a [`Badge`]; part of the dedup identity key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    Poi,
    Transfer,
}

/// A drawable marker attached to a stop: either a nearby point of interest
/// (icon) or a foreign route passing within walking distance (colored pill
/// with the route number).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Badge {
    Poi {
        kind: PoiKind,
        colour: Option<String>,
    },
    Transfer {
        route_ref: String,
        colour: Option<String>,
    },
}

impl Badge {
    /// Key used for sorting and width computation: the route number for a
    /// transfer pill, the kind name for an icon badge.
    pub fn display_key(&self) -> &str {
        match self {
            Badge::Poi { kind, .. } => kind.as_str(),
            Badge::Transfer { route_ref, .. } => route_ref,
        }
    }

    /// Explicitly tagged colour, if any. Resolution against the palette
    /// happens at layout time.
    pub fn colour(&self) -> Option<&str> {
        match self {
            Badge::Poi { colour, .. } | Badge::Transfer { colour, .. } => colour.as_deref(),
        }
    }

    pub fn variant(&self) -> BadgeVariant {
        match self {
            Badge::Poi { .. } => BadgeVariant::Poi,
            Badge::Transfer { .. } => BadgeVariant::Transfer,
        }
    }

    /// Two badges are duplicates iff both halves of this key match.
    pub fn identity(&self) -> (&str, BadgeVariant) {
        (self.display_key(), self.variant())
    }

    /// Icon badges render an image instead of text and always take the
    /// narrow layout slot.
    pub fn is_icon(&self) -> bool {
        matches!(self, Badge::Poi { .. })
    }
}

/// A single stop on a route, with its deduplicated badge row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    /// Name in the fallback language; empty when untagged.
    pub name_en: String,
    pub badges: Vec<Badge>,
}

/// An assembled route: header data plus stops in member order.
///
/// Stop duplicates are intentionally kept; a loop route visiting a stop
/// twice shows it twice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub reference: String,
    pub name: String,
    pub from: String,
    pub to: String,
    /// Explicit `colour` tag; overrides the name-derived theme colour.
    pub colour: Option<String>,
    pub stops: Vec<Stop>,
}

impl Route {
    /// Resolved theme colour: the explicit `colour` tag when present
    /// (named colours mapped to hex), otherwise derived from the reference.
    pub fn theme_color(&self) -> String {
        match self.colour.as_deref() {
            Some(colour) => style::resolve_osm_colour(colour).to_owned(),
            None => style::color_from_name(&self.reference).to_owned(),
        }
    }

    /// `true` when the route has no origin/destination labels and renders
    /// with the name-only identity block.
    pub fn is_name_only(&self) -> bool {
        self.from.is_empty() && self.to.is_empty()
    }
}

/// Input parameters for one scheme request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub reference: String,
    pub network: String,
    pub operator: String,
    /// Proximity radius in meters; non-positive means "use the default".
    pub radius_m: f64,
}

impl RouteQuery {
    pub fn new(reference: &str) -> Self {
        Self {
            reference: reference.to_owned(),
            ..Self::default()
        }
    }

    pub fn with_network(mut self, network: &str) -> Self {
        self.network = network.to_owned();
        self
    }

    pub fn with_operator(mut self, operator: &str) -> Self {
        self.operator = operator.to_owned();
        self
    }

    pub fn with_radius(mut self, radius_m: f64) -> Self {
        self.radius_m = radius_m;
        self
    }

    pub fn effective_radius(&self) -> f64 {
        if self.radius_m > 0.0 && self.radius_m.is_finite() {
            self.radius_m
        } else {
            DEFAULT_POI_RADIUS_M
        }
    }
}
