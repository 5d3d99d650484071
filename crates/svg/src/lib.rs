//! SVG serialization of a scheme layout.
//!
//! The engine emits draw commands with fully resolved coordinates, so this
//! crate is a straight element-per-command writer. It is the only place
//! that knows SVG syntax.

use std::fmt::{self, Write};

use stopline_engine::layout::{
    DrawCommand, FontWeight, SchemeLayout, TextAnchor, TextStyle, DOC_WIDTH,
};

/// Serialize a layout into a standalone SVG document.
pub fn render_document(layout: &SchemeLayout) -> Result<String, fmt::Error> {
    let mut svg = String::new();
    write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" \
         font-family=\"Fira Sans, sans-serif\">\n",
        w = DOC_WIDTH,
        h = layout.total_height,
    )?;
    for command in &layout.commands {
        render_command(&mut svg, command)?;
    }
    svg.push_str("</svg>\n");
    Ok(svg)
}

fn render_command(svg: &mut String, command: &DrawCommand) -> fmt::Result {
    match command {
        DrawCommand::Text {
            x,
            y,
            content,
            style,
        } => {
            write!(
                svg,
                "  <text x=\"{x}\" y=\"{y}\" font-size=\"{size}\" text-anchor=\"{anchor}\" \
                 fill=\"{fill}\"{weight}>{content}</text>\n",
                size = style.size,
                anchor = anchor_attr(style.anchor),
                fill = style.fill,
                weight = weight_attr(style),
                content = escape_text(content),
            )
        }
        DrawCommand::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            write!(
                svg,
                "  <rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"{fill}\"/>\n",
            )
        }
        DrawCommand::RoundRect {
            x,
            y,
            width,
            height,
            radius,
            fill,
        } => {
            write!(
                svg,
                "  <rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" \
                 rx=\"{radius}\" ry=\"{radius}\" fill=\"{fill}\"/>\n",
            )
        }
        DrawCommand::Circle {
            cx,
            cy,
            radius,
            fill,
            stroke,
            stroke_width,
        } => {
            write!(
                svg,
                "  <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{radius}\" fill=\"{fill}\" \
                 stroke=\"{stroke}\" stroke-width=\"{stroke_width}\"/>\n",
            )
        }
        DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => {
            write!(
                svg,
                "  <line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{stroke}\" \
                 stroke-width=\"{stroke_width}\" stroke-linecap=\"round\"/>\n",
            )
        }
        DrawCommand::Image {
            x,
            y,
            width,
            height,
            href,
        } => {
            write!(
                svg,
                "  <image x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" \
                 xlink:href=\"{href}\"/>\n",
                href = escape_text(href),
            )
        }
    }
}

fn anchor_attr(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn weight_attr(style: &TextStyle) -> &'static str {
    match style.weight {
        FontWeight::Normal => "",
        FontWeight::Semibold => " font-weight=\"600\"",
    }
}

/// Minimal XML escaping for text content and attribute values.
fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
