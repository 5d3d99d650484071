//! Abstract draw commands with resolved absolute coordinates.
//!
//! The renderer consuming these does no layout of its own: every offset,
//! size and colour is final by the time a command is emitted.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Semibold,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: i32,
    pub weight: FontWeight,
    pub anchor: TextAnchor,
    pub fill: String,
}

impl TextStyle {
    pub fn new(size: i32, weight: FontWeight, anchor: TextAnchor, fill: &str) -> Self {
        Self {
            size,
            weight,
            anchor,
            fill: fill.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Text {
        x: i32,
        y: i32,
        content: String,
        style: TextStyle,
    },
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        fill: String,
    },
    RoundRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        radius: i32,
        fill: String,
    },
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        fill: String,
        stroke: String,
        stroke_width: i32,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        stroke: String,
        stroke_width: i32,
    },
    Image {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        href: String,
    },
}
