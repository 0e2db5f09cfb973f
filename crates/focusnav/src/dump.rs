use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    error::{Error, Result},
    key::NodeId,
    layout::LayoutCache,
    registry::Registry,
};

/// Render every root of the focus tree, with flags and geometry for each
/// node. This is a debug function.
pub fn dump(registry: &Registry, layouts: &LayoutCache, focus: Option<NodeId>) -> Result<String> {
    let mut buffer = Buffer::ansi();
    for root in registry.roots() {
        dump_node(&mut buffer, registry, layouts, *root, 0, focus)?;
    }
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(
    buffer: &mut Buffer,
    registry: &Registry,
    layouts: &LayoutCache,
    id: NodeId,
    level: usize,
    focus: Option<NodeId>,
) -> Result<()> {
    let node = registry
        .node(id)
        .ok_or_else(|| Error::Internal("missing node".into()))?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.key)?;
    buffer.reset()?;

    let mut indicators = Vec::new();
    if focus == Some(id) {
        indicators.push("FOCUSED");
    }
    if node.has_focused_child {
        indicators.push("focus-within");
    }
    if !node.flags.focusable {
        indicators.push("passive");
    }
    if node.flags.is_focus_boundary {
        indicators.push("boundary");
    }
    for (i, indicator) in indicators.iter().enumerate() {
        write!(buffer, "{}", if i == 0 { " " } else { ", " })?;
        let color = match *indicator {
            "FOCUSED" => Color::Magenta,
            "focus-within" => Color::Blue,
            "boundary" => Color::Red,
            _ => Color::Yellow,
        };
        buffer.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(buffer, "{indicator}")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    let rect = match layouts.get(id) {
        Some(r) => format!("x: {}, y: {}, w: {}, h: {}", r.x, r.y, r.width, r.height),
        None => "unmeasured".into(),
    };
    write_field(buffer, &indent, "rect:", &rect)?;
    if node.flags.is_focus_boundary && !node.flags.boundary_directions.is_empty() {
        let dirs: Vec<_> = node
            .flags
            .boundary_directions
            .iter()
            .map(|d| d.as_str())
            .collect();
        write_field(buffer, &indent, "blocks:", &dirs.join(", "))?;
    }
    if let Some(k) = &node.preferred_child {
        write_field(buffer, &indent, "preferred:", k.as_str())?;
    }
    if let Some(k) = &node.last_focused_child {
        write_field(buffer, &indent, "last focused:", k.as_str())?;
    }

    for child in &node.children {
        dump_node(buffer, registry, layouts, *child, level + 1, focus)?;
    }
    Ok(())
}
