//! Minimal element tree standing in for the host page's container.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]; the tree renders
//! to HTML for the page served by [`controllers`](crate::controllers).

use std::fmt::Write as _;

use crate::models::SeatId;
use crate::surface::{CounterDisplay, GridSurface, SeatMarker};

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    // Данные места для обработчика клика, у пустых ячеек их нет
    pub seat_id: Option<SeatId>,
}

impl Element {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
            parent: None,
            seat_id: None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
    seat_action: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty `<div class="room">` mount point.
    pub fn new() -> Self {
        let mut root = Element::new("div");
        root.classes.push("room".to_string());
        Self {
            nodes: vec![root],
            root: 0,
            seat_action: None,
        }
    }

    /// Seats get a submit button posting to `{base}/{id}/toggle` around their icon.
    pub fn with_seat_action(mut self, base: impl Into<String>) -> Self {
        self.seat_action = Some(base.into());
        self
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|el| el.children.as_slice())
            .unwrap_or_default()
    }

    /// Rows appended to the mount point, in order.
    pub fn rows(&self) -> &[NodeId] {
        self.children(self.root)
    }

    /// Removes everything below the mount point.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[self.root].children.clear();
    }

    pub fn create_element(&mut self, tag: &'static str) -> NodeId {
        self.nodes.push(Element::new(tag));
        self.nodes.len() - 1
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let el = &mut self.nodes[id];
        if !el.has_class(class) {
            el.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.nodes[id].classes.retain(|c| c != class);
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let el = &mut self.nodes[id];
        match el.attrs.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => el.attrs.push((name.to_string(), value)),
        }
    }

    /// Seat data for a click landing on `target`: the element itself or one
    /// of its ancestors carrying a seat id (the icon sits inside the seat).
    pub fn click_target(&self, target: NodeId) -> Option<SeatId> {
        let mut current = Some(target);
        while let Some(id) = current {
            let el = self.nodes.get(id)?;
            if el.seat_id.is_some() {
                return el.seat_id;
            }
            if id == self.root {
                return None;
            }
            current = el.parent;
        }
        None
    }

    /// Seat element carrying `seat`, if any.
    pub fn find_seat(&self, seat: SeatId) -> Option<NodeId> {
        self.nodes.iter().position(|el| el.seat_id == Some(seat))
    }

    pub fn render_html(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, out: &mut String) {
        let el = &self.nodes[id];
        let _ = write!(out, "<{}", el.tag);
        if !el.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&el.classes.join(" ")));
        }
        if let Some(seat) = el.seat_id {
            let _ = write!(out, " data-seat-id=\"{seat}\"");
        }
        for (name, value) in &el.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');

        if is_void(el.tag) {
            return;
        }
        for &child in &el.children {
            self.render_node(child, out);
        }
        let _ = write!(out, "</{}>", el.tag);
    }
}

impl GridSurface for Document {
    type Row = NodeId;
    type Cell = NodeId;

    fn append_row(&mut self) -> NodeId {
        let row = self.create_element("div");
        self.add_class(row, "row");
        self.append_child(self.root, row);
        row
    }

    fn append_seat(&mut self, row: &NodeId, seat: SeatId, icon_src: &str) -> NodeId {
        let chair = self.create_element("span");
        self.add_class(chair, "chair");
        self.add_class(chair, SeatMarker::Available.class_name());
        self.nodes[chair].seat_id = Some(seat);

        let img = self.create_element("img");
        self.set_attr(img, "src", icon_src);
        self.set_attr(img, "alt", format!("seat {seat}"));

        match self.seat_action.clone() {
            Some(base) => {
                let button = self.create_element("button");
                self.set_attr(button, "type", "submit");
                self.set_attr(button, "formaction", format!("{base}/{seat}/toggle"));
                self.append_child(button, img);
                self.append_child(chair, button);
            }
            None => self.append_child(chair, img),
        }

        self.append_child(*row, chair);
        chair
    }

    fn append_gap(&mut self, row: &NodeId) {
        let gap = self.create_element("span");
        self.add_class(gap, "chair");
        self.add_class(gap, SeatMarker::Empty.class_name());
        self.append_child(*row, gap);
    }

    fn set_marker(&mut self, cell: &NodeId, marker: SeatMarker) {
        for other in [SeatMarker::Available, SeatMarker::Occupied, SeatMarker::Empty] {
            if other != marker {
                self.remove_class(*cell, other.class_name());
            }
        }
        self.add_class(*cell, marker.class_name());
    }
}

/// Counter element contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDisplay {
    text: String,
}

impl TextDisplay {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn render_html(&self) -> String {
        format!("<span class=\"counter\">{}</span>", escape(&self.text))
    }
}

impl CounterDisplay for TextDisplay {
    fn set_text(&mut self, text: &str) {
        self.text.set_text(text);
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "input")
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
