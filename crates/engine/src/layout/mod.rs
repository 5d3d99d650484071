//! Deterministic layout of the assembled scheme.
//!
//! All heights and offsets are pure functions of the Route tree, computed
//! by small standalone helpers so the arithmetic is testable without ever
//! emitting a command. The emission pass then folds those helpers into a
//! flat command stream with absolute coordinates.

pub mod command;

pub use command::{DrawCommand, FontWeight, TextAnchor, TextStyle};

use crate::model::{Badge, Route, Stop};
use crate::order::display_len;
use crate::style;

pub const DOC_WIDTH: i32 = 1920;

pub const HEADER_BLOCK_HEIGHT: i32 = 125;
pub const IDENTITY_BLOCK_HEIGHT: i32 = 522;
pub const ROUTE_FOOTER_HEIGHT: i32 = 125;

pub const STOP_NAME_HEIGHT: i32 = 67;
pub const FALLBACK_NAME_HEIGHT: i32 = 67;
pub const BADGE_ROW_GAP: i32 = 10;
pub const BADGE_ROW_HEIGHT: i32 = 70;
pub const STOP_FOOTER_HEIGHT: i32 = 100;

pub const BADGES_PER_ROW: usize = 15;
pub const BADGE_NARROW_SLOT: i32 = 70;
pub const BADGE_HEIGHT: i32 = 60;
pub const BADGE_CORNER_RADIUS: i32 = 30;
pub const BADGE_CHAR_WIDTH: i32 = 18;
pub const BADGE_TEXT_PADDING: i32 = 20;
pub const BADGE_SPACING: i32 = 10;
/// Keys shorter than this many graphemes take the narrow slot.
pub const NARROW_KEY_LEN: usize = 4;

pub const MARGIN_X: i32 = 100;
pub const LINE_X: i32 = 130;
pub const STOP_TEXT_X: i32 = 205;
pub const BADGE_ROW_X: i32 = 200;

const TEXT_GREY: &str = "#514d48";

/// A positioned layout with its computed document height.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SchemeLayout {
    pub total_height: i32,
    pub commands: Vec<DrawCommand>,
}

/// Horizontal slot and wrap row assigned to one badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BadgeSlot {
    pub x_offset: i32,
    pub row: usize,
}

/// Rows a badge row wraps onto beyond the first. An exact multiple of
/// [`BADGES_PER_ROW`] must not open an empty trailing row: 15 badges cost
/// the same as 14, 16 add exactly one row.
pub fn extra_badge_rows(count: usize) -> usize {
    count.div_ceil(BADGES_PER_ROW).saturating_sub(1)
}

/// Horizontal space a badge reserves, trailing spacing included.
pub fn badge_slot_width(badge: &Badge) -> i32 {
    let len = display_len(badge.display_key());
    if badge.is_icon() || len < NARROW_KEY_LEN {
        BADGE_NARROW_SLOT
    } else {
        len as i32 * BADGE_CHAR_WIDTH + BADGE_TEXT_PADDING + BADGE_SPACING
    }
}

/// Drawn pill width: the slot minus its trailing spacing.
pub fn badge_width(badge: &Badge) -> i32 {
    badge_slot_width(badge) - BADGE_SPACING
}

/// Assign each badge its x offset and wrap row. The offset accumulates left to
/// right and resets on row wrap; rows only exist where a badge occupies
/// them, which is what keeps the exact-multiple boundary from producing a
/// trailing empty row.
pub fn badge_positions(badges: &[Badge]) -> Vec<BadgeSlot> {
    let mut slots = Vec::with_capacity(badges.len());
    let mut x_offset = 0;
    for (i, badge) in badges.iter().enumerate() {
        if i > 0 && i % BADGES_PER_ROW == 0 {
            x_offset = 0;
        }
        slots.push(BadgeSlot {
            x_offset,
            row: i / BADGES_PER_ROW,
        });
        x_offset += badge_slot_width(badge);
    }
    slots
}

/// Vertical space a stop occupies, footer spacing included.
pub fn stop_block_height(stop: &Stop) -> i32 {
    let mut height = STOP_NAME_HEIGHT + BADGE_ROW_GAP + STOP_FOOTER_HEIGHT;
    if !stop.name_en.is_empty() {
        height += FALLBACK_NAME_HEIGHT;
    }
    height + extra_badge_rows(stop.badges.len()) as i32 * BADGE_ROW_HEIGHT
}

/// Vertical space a whole route occupies.
pub fn route_block_height(route: &Route) -> i32 {
    HEADER_BLOCK_HEIGHT
        + IDENTITY_BLOCK_HEIGHT
        + route.stops.iter().map(stop_block_height).sum::<i32>()
        + ROUTE_FOOTER_HEIGHT
}

/// Total document height for a set of routes. Zero routes means a
/// zero-height document, by contract.
pub fn total_height(routes: &[Route]) -> i32 {
    routes.iter().map(route_block_height).sum()
}

/// Lay out the whole document: every route stacked vertically, each
/// translated by the running total of its predecessors' heights.
pub fn layout(routes: &[Route], lang: &str) -> SchemeLayout {
    let mut commands = Vec::new();
    let mut page_offset = 0;
    for route in routes {
        emit_route(&mut commands, route, page_offset, lang);
        page_offset += route_block_height(route);
    }
    SchemeLayout {
        total_height: page_offset,
        commands,
    }
}

fn emit_route(out: &mut Vec<DrawCommand>, route: &Route, y0: i32, lang: &str) {
    let theme = route.theme_color();

    out.push(DrawCommand::Text {
        x: MARGIN_X,
        y: y0 + 90,
        content: style::header_for(lang).to_owned(),
        style: TextStyle::new(50, FontWeight::Semibold, TextAnchor::Start, "black"),
    });

    let identity_top = y0 + HEADER_BLOCK_HEIGHT;
    out.push(DrawCommand::Rect {
        x: MARGIN_X,
        y: identity_top + 35,
        width: 300,
        height: 200,
        fill: theme.clone(),
    });
    out.push(DrawCommand::Text {
        x: MARGIN_X + 150,
        y: identity_top + 185,
        content: route.reference.clone(),
        style: TextStyle::new(150, FontWeight::Normal, TextAnchor::Middle, "white"),
    });
    out.push(DrawCommand::Text {
        x: 450,
        y: identity_top + 125,
        content: route.name.clone(),
        style: TextStyle::new(50, FontWeight::Normal, TextAnchor::Start, "black"),
    });
    if !route.is_name_only() {
        out.push(DrawCommand::Text {
            x: 450,
            y: identity_top + 196,
            content: format!("{} - {}", route.from, route.to),
            style: TextStyle::new(50, FontWeight::Normal, TextAnchor::Start, TEXT_GREY),
        });
    }

    // The route line spans the identity block down to the bottom of the
    // last stop's content; the last stop's footer spacing stays below it.
    let stops_top = identity_top + IDENTITY_BLOCK_HEIGHT;
    let stops_height: i32 = route.stops.iter().map(stop_block_height).sum();
    let line_end = if route.stops.is_empty() {
        stops_top
    } else {
        stops_top + stops_height - STOP_FOOTER_HEIGHT
    };
    out.push(DrawCommand::Line {
        x1: LINE_X,
        y1: identity_top,
        x2: LINE_X,
        y2: line_end,
        stroke: theme.clone(),
        stroke_width: 20,
    });

    let last = route.stops.len().saturating_sub(1);
    let mut stop_top = stops_top;
    for (i, stop) in route.stops.iter().enumerate() {
        emit_stop(out, stop, stop_top, i == 0 || i == last, &theme);
        stop_top += stop_block_height(stop);
    }

    out.push(DrawCommand::Text {
        x: DOC_WIDTH - MARGIN_X,
        y: y0 + route_block_height(route) - 40,
        content: "© OpenStreetMap contributors".to_owned(),
        style: TextStyle::new(20, FontWeight::Normal, TextAnchor::End, "black"),
    });
}

fn emit_stop(out: &mut Vec<DrawCommand>, stop: &Stop, top: i32, endpoint: bool, theme: &str) {
    // Endpoint markers are larger with the fill inverted.
    if endpoint {
        out.push(DrawCommand::Circle {
            cx: LINE_X,
            cy: top + 33,
            radius: 30,
            fill: theme.to_owned(),
            stroke: "white".to_owned(),
            stroke_width: 10,
        });
    } else {
        out.push(DrawCommand::Circle {
            cx: LINE_X,
            cy: top + 33,
            radius: 20,
            fill: "white".to_owned(),
            stroke: theme.to_owned(),
            stroke_width: 10,
        });
    }

    out.push(DrawCommand::Text {
        x: STOP_TEXT_X,
        y: top + 50,
        content: stop.name.clone(),
        style: TextStyle::new(50, FontWeight::Semibold, TextAnchor::Start, "black"),
    });

    let mut badges_top = top + STOP_NAME_HEIGHT;
    if !stop.name_en.is_empty() {
        out.push(DrawCommand::Text {
            x: STOP_TEXT_X,
            y: badges_top + 50,
            content: stop.name_en.clone(),
            style: TextStyle::new(50, FontWeight::Normal, TextAnchor::Start, TEXT_GREY),
        });
        badges_top += FALLBACK_NAME_HEIGHT;
    }
    badges_top += BADGE_ROW_GAP;

    for (badge, slot) in stop.badges.iter().zip(badge_positions(&stop.badges)) {
        let x = BADGE_ROW_X + slot.x_offset;
        let y = badges_top + slot.row as i32 * BADGE_ROW_HEIGHT;
        let width = badge_width(badge);
        out.push(DrawCommand::RoundRect {
            x,
            y,
            width,
            height: BADGE_HEIGHT,
            radius: BADGE_CORNER_RADIUS,
            fill: style::badge_fill(badge),
        });
        match badge {
            Badge::Poi { kind, .. } => out.push(DrawCommand::Image {
                x: x + 15,
                y: y + 15,
                width: 30,
                height: 30,
                href: format!("{}.svg", kind.as_str()),
            }),
            Badge::Transfer { route_ref, .. } => out.push(DrawCommand::Text {
                x: x + width / 2,
                y: y + 41,
                content: route_ref.clone(),
                style: TextStyle::new(30, FontWeight::Normal, TextAnchor::Middle, "white"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PoiKind;

    fn transfer(route_ref: &str) -> Badge {
        Badge::Transfer {
            route_ref: route_ref.into(),
            colour: None,
        }
    }

    fn stop_with_badges(count: usize) -> Stop {
        Stop {
            name: "Остановка".into(),
            name_en: String::new(),
            badges: (0..count).map(|i| transfer(&format!("{i}"))).collect(),
        }
    }

    fn text_commands(layout: &SchemeLayout) -> Vec<&DrawCommand> {
        layout
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .collect()
    }

    #[test]
    fn test_extra_row_boundary() {
        assert_eq!(extra_badge_rows(0), 0);
        assert_eq!(extra_badge_rows(14), 0);
        assert_eq!(extra_badge_rows(15), 0);
        assert_eq!(extra_badge_rows(16), 1);
        assert_eq!(extra_badge_rows(30), 1);
        assert_eq!(extra_badge_rows(31), 2);
    }

    #[test]
    fn test_stop_height_boundary_matches_extra_rows() {
        assert_eq!(
            stop_block_height(&stop_with_badges(15)),
            stop_block_height(&stop_with_badges(14))
        );
        assert_eq!(
            stop_block_height(&stop_with_badges(16)),
            stop_block_height(&stop_with_badges(15)) + BADGE_ROW_HEIGHT
        );
    }

    #[test]
    fn test_fallback_name_adds_a_line() {
        let without = stop_with_badges(0);
        let with = Stop {
            name_en: "Station".into(),
            ..without.clone()
        };
        assert_eq!(
            stop_block_height(&with),
            stop_block_height(&without) + FALLBACK_NAME_HEIGHT
        );
    }

    #[test]
    fn test_badge_slot_widths() {
        // Short transfer key: narrow slot.
        assert_eq!(badge_slot_width(&transfer("5")), BADGE_NARROW_SLOT);
        assert_eq!(badge_slot_width(&transfer("112")), BADGE_NARROW_SLOT);
        // Icon badges are narrow regardless of kind-name length.
        let poi = Badge::Poi {
            kind: PoiKind::Train,
            colour: None,
        };
        assert_eq!(badge_slot_width(&poi), BADGE_NARROW_SLOT);
        // Four graphemes and up: measured width.
        assert_eq!(badge_slot_width(&transfer("112а")), 4 * 18 + 20 + 10);
        assert_eq!(badge_width(&transfer("112а")), 4 * 18 + 20);
    }

    #[test]
    fn test_badge_positions_accumulate_and_wrap() {
        let badges: Vec<_> = (0..17).map(|i| transfer(&format!("{i:02}"))).collect();
        let slots = badge_positions(&badges);

        // First row accumulates narrow slots left to right.
        assert_eq!(slots[0], BadgeSlot { x_offset: 0, row: 0 });
        assert_eq!(
            slots[1],
            BadgeSlot {
                x_offset: BADGE_NARROW_SLOT,
                row: 0
            }
        );
        // The 16th badge starts a fresh row at zero offset.
        assert_eq!(slots[15], BadgeSlot { x_offset: 0, row: 1 });
        assert_eq!(
            slots[16],
            BadgeSlot {
                x_offset: BADGE_NARROW_SLOT,
                row: 1
            }
        );
    }

    #[test]
    fn test_exactly_fifteen_badges_stay_on_one_row() {
        let badges: Vec<_> = (0..15).map(|i| transfer(&format!("{i:02}"))).collect();
        let slots = badge_positions(&badges);
        assert!(slots.iter().all(|s| s.row == 0));
    }

    #[test]
    fn test_route_height_is_sum_of_blocks() {
        let route = Route {
            reference: "21".into(),
            stops: vec![stop_with_badges(0), stop_with_badges(16)],
            ..Route::default()
        };
        let expected = HEADER_BLOCK_HEIGHT
            + IDENTITY_BLOCK_HEIGHT
            + stop_block_height(&route.stops[0])
            + stop_block_height(&route.stops[1])
            + ROUTE_FOOTER_HEIGHT;
        assert_eq!(route_block_height(&route), expected);
        assert_eq!(total_height(std::slice::from_ref(&route)), expected);
    }

    #[test]
    fn test_empty_scheme_is_zero_height() {
        let scheme = layout(&[], "en");
        assert_eq!(scheme.total_height, 0);
        assert!(scheme.commands.is_empty());
    }

    #[test]
    fn test_name_only_route_skips_from_to_line() {
        // Scenario 5: empty from/to drops exactly one text command from the
        // identity block.
        let named = Route {
            reference: "21".into(),
            name: "Автобус 21".into(),
            from: "Вокзал".into(),
            to: "Центр".into(),
            ..Route::default()
        };
        let name_only = Route {
            from: String::new(),
            to: String::new(),
            ..named.clone()
        };

        let with = text_commands(&layout(std::slice::from_ref(&named), "en")).len();
        let without = text_commands(&layout(std::slice::from_ref(&name_only), "en")).len();
        assert_eq!(with, without + 1);

        let from_to_present = layout(std::slice::from_ref(&named), "en")
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { content, .. } if content == "Вокзал - Центр"));
        assert!(from_to_present);
    }

    #[test]
    fn test_second_route_is_translated_by_first_height() {
        let route = Route {
            reference: "21".into(),
            stops: vec![stop_with_badges(0)],
            ..Route::default()
        };
        let scheme = layout(&[route.clone(), route.clone()], "en");
        assert_eq!(scheme.total_height, 2 * route_block_height(&route));

        // Header of the second route sits one route-height below the first.
        let headers: Vec<i32> = scheme
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { y, content, .. } if content == "Scheme of route" => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1] - headers[0], route_block_height(&route));
    }

    #[test]
    fn test_endpoint_markers_are_distinguished() {
        let route = Route {
            reference: "21".into(),
            stops: vec![stop_with_badges(0), stop_with_badges(0), stop_with_badges(0)],
            ..Route::default()
        };
        let radii: Vec<i32> = layout(std::slice::from_ref(&route), "en")
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![30, 20, 30]);
    }

    #[test]
    fn test_route_line_spans_to_last_stop_content() {
        let stop = stop_with_badges(0);
        let route = Route {
            reference: "21".into(),
            stops: vec![stop.clone(), stop.clone()],
            ..Route::default()
        };
        let scheme = layout(std::slice::from_ref(&route), "en");
        let line = scheme
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Line { y1, y2, .. } => Some((*y1, *y2)),
                _ => None,
            })
            .unwrap();

        let stops_top = HEADER_BLOCK_HEIGHT + IDENTITY_BLOCK_HEIGHT;
        assert_eq!(line.0, HEADER_BLOCK_HEIGHT);
        assert_eq!(
            line.1,
            stops_top + 2 * stop_block_height(&stop) - STOP_FOOTER_HEIGHT
        );
    }

    #[test]
    fn test_badge_commands_resolve_text_or_icon() {
        let stop = Stop {
            name: "Вокзал".into(),
            name_en: String::new(),
            badges: vec![
                Badge::Poi {
                    kind: PoiKind::Train,
                    colour: None,
                },
                transfer("5"),
            ],
        };
        let route = Route {
            reference: "21".into(),
            stops: vec![stop],
            ..Route::default()
        };
        let scheme = layout(std::slice::from_ref(&route), "en");

        let icons: Vec<&str> = scheme
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { href, .. } => Some(href.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(icons, ["train.svg"]);

        let pills = scheme
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::RoundRect { .. }))
            .count();
        assert_eq!(pills, 2);
    }
}
