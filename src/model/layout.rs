//! Tree-to-graph layout: flattens a JSON value into positioned nodes and edges.

use log::info;
use serde_json::{Number, Value};

use super::path::{NodePath, Segment};

/// Display key used for the node at the empty path.
pub const ROOT_KEY: &str = "root";

/// Kind of JSON value behind a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
	/// `null`
	Null,
	/// `true` / `false`
	Bool,
	/// Any number.
	Number,
	/// Any string.
	String,
	/// Array.
	Array,
	/// Object.
	Object,
}

impl ValueKind {
	/// Kind of `value`.
	pub fn of(value: &Value) -> Self {
		match value {
			Value::Null => ValueKind::Null,
			Value::Bool(_) => ValueKind::Bool,
			Value::Number(_) => ValueKind::Number,
			Value::String(_) => ValueKind::String,
			Value::Array(_) => ValueKind::Array,
			Value::Object(_) => ValueKind::Object,
		}
	}

	/// Colour category of this kind.
	pub fn category(self) -> NodeCategory {
		match self {
			ValueKind::Null | ValueKind::Bool | ValueKind::Number | ValueKind::String => {
				NodeCategory::Primitive
			}
			ValueKind::Array => NodeCategory::Array,
			ValueKind::Object => NodeCategory::Object,
		}
	}
}

/// Presentation grouping used to pick a node's fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeCategory {
	/// Leaf values.
	Primitive,
	/// Arrays.
	Array,
	/// Objects.
	Object,
}

impl NodeCategory {
	/// Fill colour as a CSS colour string.
	pub fn fill(self) -> &'static str {
		match self {
			NodeCategory::Primitive => "#FF9800",
			NodeCategory::Array => "#4CAF50",
			NodeCategory::Object => "#2196F3",
		}
	}
}

/// Spacing and sizing of the laid-out tree, in graph units.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Horizontal distance between neighbouring slots on one level.
	pub node_width: f64,
	/// Vertical distance between levels.
	pub level_height: f64,
	/// Drawn box width; smaller than `node_width` to leave a gap.
	pub box_width: f64,
	/// Drawn box height.
	pub box_height: f64,
	/// Labels longer than this are cut and end with `…`.
	pub max_label_chars: usize,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			node_width: 200.0,
			level_height: 120.0,
			box_width: 176.0,
			box_height: 44.0,
			max_label_chars: 24,
		}
	}
}

/// A positioned tree vertex. `(x, y)` is the top-left corner of its box.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Rendered path; unique within one graph.
	pub id: String,
	/// Structural path the id was rendered from.
	pub path: NodePath,
	/// Text drawn inside the box.
	pub label: String,
	/// Level in the tree, 0 for the top row.
	pub depth: usize,
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Kind of value this node shows.
	pub kind: ValueKind,
}

impl GraphNode {
	/// Fill colour from the value kind.
	pub fn fill(&self) -> &'static str {
		self.kind.category().fill()
	}
}

/// Parent to child link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// `source->target`.
	pub id: String,
	/// Parent node id.
	pub source: String,
	/// Child node id.
	pub target: String,
}

/// Axis-aligned box in graph units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Width.
	pub width: f64,
	/// Height.
	pub height: f64,
}

impl Bounds {
	/// Centre point.
	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

/// Output of one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeGraph {
	/// Nodes in depth-first pre-order.
	pub nodes: Vec<GraphNode>,
	/// One edge per parent-child pair.
	pub edges: Vec<GraphEdge>,
	/// Drawn box size `(width, height)` shared by every node.
	pub node_size: (f64, f64),
}

impl TreeGraph {
	/// Node with the given id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Index of the node with the given id.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	/// Centre of a node's box.
	pub fn position_of(&self, id: &str) -> Option<(f64, f64)> {
		self.node(id).map(|n| self.center_of(n))
	}

	/// Centre of `node`'s box.
	pub fn center_of(&self, node: &GraphNode) -> (f64, f64) {
		(node.x + self.node_size.0 / 2.0, node.y + self.node_size.1 / 2.0)
	}

	/// Box enclosing every node, `None` when the graph is empty.
	pub fn bounds(&self) -> Option<Bounds> {
		let first = self.nodes.first()?;
		let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
		for node in &self.nodes[1..] {
			min_x = min_x.min(node.x);
			min_y = min_y.min(node.y);
			max_x = max_x.max(node.x);
			max_y = max_y.max(node.y);
		}
		Some(Bounds {
			x: min_x,
			y: min_y,
			width: max_x - min_x + self.node_size.0,
			height: max_y - min_y + self.node_size.1,
		})
	}

	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

struct Builder<'a> {
	config: &'a LayoutConfig,
	level_counters: Vec<usize>,
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
}

/// A value waiting to be placed, with the id of the node that links to it.
struct Pending<'v> {
	value: &'v Value,
	path: NodePath,
	depth: usize,
	parent: Option<String>,
}

impl Builder<'_> {
	fn next_slot(&mut self, depth: usize) -> usize {
		if self.level_counters.len() <= depth {
			self.level_counters.resize(depth + 1, 0);
		}
		let slot = self.level_counters[depth];
		self.level_counters[depth] += 1;
		slot
	}

	/// Pre-order walk of `value`, using an explicit stack so nesting depth is
	/// bounded by memory rather than the call stack.
	fn visit(&mut self, value: &Value, path: NodePath, depth: usize) {
		let mut stack = vec![Pending {
			value,
			path,
			depth,
			parent: None,
		}];
		while let Some(Pending { value, path, depth, parent }) = stack.pop() {
			let id = self.place(value, &path, depth);
			if let Some(parent) = parent {
				self.link(parent, id.clone());
			}

			let first_child = stack.len();
			match value {
				Value::Array(items) => {
					stack.extend(items.iter().enumerate().map(|(i, item)| Pending {
						value: item,
						path: path.index(i),
						depth: depth + 1,
						parent: Some(id.clone()),
					}));
				}
				Value::Object(members) => {
					stack.extend(members.iter().map(|(key, member)| Pending {
						value: member,
						path: path.key(key.as_str()),
						depth: depth + 1,
						parent: Some(id.clone()),
					}));
				}
				Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
			}
			// pop order must match document order
			stack[first_child..].reverse();
		}
	}

	fn place(&mut self, value: &Value, path: &NodePath, depth: usize) -> String {
		let slot = self.next_slot(depth);
		let id = path.to_string();
		let key = path.last().map(Segment::display_key).unwrap_or_else(|| ROOT_KEY.into());
		self.nodes.push(GraphNode {
			id: id.clone(),
			label: truncate(&label_for(&key, value), self.config.max_label_chars),
			depth,
			x: slot as f64 * self.config.node_width,
			y: depth as f64 * self.config.level_height,
			kind: ValueKind::of(value),
			path: path.clone(),
		});
		id
	}

	fn link(&mut self, source: String, target: String) {
		self.edges.push(GraphEdge {
			id: format!("{source}->{target}"),
			source,
			target,
		});
	}
}

fn label_for(key: &str, value: &Value) -> String {
	match value {
		Value::Null => format!("{key}: null"),
		Value::Bool(b) => format!("{key}: {b}"),
		Value::Number(n) => format!("{key}: {}", number_text(n)),
		Value::String(s) => format!("{key}: {s}"),
		Value::Array(items) => format!("{key} {{{}}}", items.len()),
		Value::Object(members) => format!("{key} {{{}}}", members.len()),
	}
}

/// Number text the way a browser prints it: `1.0` is `1`, `-0` is `0` and
/// values past the `f64` range are `Infinity`.
fn number_text(n: &Number) -> String {
	let raw = n.to_string();
	let Ok(f) = raw.parse::<f64>() else {
		return raw;
	};
	if f == 0.0 {
		return "0".into();
	}
	if n.is_i64() || n.is_u64() {
		return raw;
	}
	if f.is_infinite() {
		return if f > 0.0 { "Infinity" } else { "-Infinity" }.into();
	}
	if f.fract() == 0.0 && f.abs() < 1e21 {
		return format!("{f:.0}");
	}
	f.to_string()
}

fn truncate(label: &str, max_chars: usize) -> String {
	if label.chars().count() <= max_chars {
		return label.to_owned();
	}
	let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
	out.push('…');
	out
}

/// Lay out `value` as a top-down tree.
///
/// A non-empty object root contributes its members as the top row; any other
/// root becomes a single top node at the empty path. Output is deterministic.
pub fn build_graph(value: &Value, config: &LayoutConfig) -> TreeGraph {
	let mut builder = Builder {
		config,
		level_counters: Vec::new(),
		nodes: Vec::new(),
		edges: Vec::new(),
	};

	match value {
		Value::Object(members) if !members.is_empty() => {
			for (key, member) in members {
				builder.visit(member, NodePath::root().key(key.as_str()), 0);
			}
		}
		_ => {
			builder.visit(value, NodePath::root(), 0);
		}
	}

	info!(
		"Built tree graph: {} nodes, {} edges, {} levels",
		builder.nodes.len(),
		builder.edges.len(),
		builder.level_counters.len()
	);
	TreeGraph {
		nodes: builder.nodes,
		edges: builder.edges,
		node_size: (config.box_width, config.box_height),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::parse::parse_document;
	use serde_json::json;
	use std::collections::HashSet;

	fn ids(graph: &TreeGraph) -> Vec<&str> {
		graph.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	fn edge_pairs(graph: &TreeGraph) -> Vec<(&str, &str)> {
		graph
			.edges
			.iter()
			.map(|e| (e.source.as_str(), e.target.as_str()))
			.collect()
	}

	#[test]
	fn object_root_members_form_the_top_row() {
		let graph = build_graph(&json!({"user": {"name": "Ana", "age": 3}}), &LayoutConfig::default());
		assert_eq!(ids(&graph), ["user", "user.name", "user.age"]);
		assert_eq!(edge_pairs(&graph), [("user", "user.name"), ("user", "user.age")]);
		assert_eq!(graph.nodes[0].depth, 0);
		assert_eq!(graph.nodes[0].label, "user {2}");
		assert_eq!(graph.nodes[1].label, "name: Ana");
		assert_eq!(graph.nodes[2].label, "age: 3");
	}

	#[test]
	fn array_root_is_a_single_top_node() {
		let graph = build_graph(&json!([1, 2, 3]), &LayoutConfig::default());
		assert_eq!(ids(&graph), ["", "[0]", "[1]", "[2]"]);
		assert_eq!(graph.nodes[0].label, "root {3}");
		assert_eq!(graph.nodes[2].label, "[1]: 2");
		assert!(graph.edges.iter().all(|e| e.source.is_empty()));
		assert_eq!(graph.edges[0].id, "->[0]");
	}

	#[test]
	fn primitive_and_empty_roots_get_the_empty_path() {
		let config = LayoutConfig::default();
		let graph = build_graph(&json!(42), &config);
		assert_eq!(ids(&graph), [""]);
		assert_eq!(graph.nodes[0].label, "root: 42");

		let graph = build_graph(&json!({}), &config);
		assert_eq!(ids(&graph), [""]);
		assert_eq!(graph.nodes[0].label, "root {0}");
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn positions_follow_per_level_counters() {
		let config = LayoutConfig::default();
		let graph = build_graph(&json!({"a": [10, 20], "b": {"c": null}}), &config);
		let pos: Vec<(&str, f64, f64)> = graph.nodes.iter().map(|n| (n.id.as_str(), n.x, n.y)).collect();
		assert_eq!(
			pos,
			[
				("a", 0.0, 0.0),
				("a[0]", 0.0, 120.0),
				("a[1]", 200.0, 120.0),
				("b", 200.0, 0.0),
				("b.c", 400.0, 120.0),
			]
		);
	}

	#[test]
	fn every_non_top_node_has_one_parent() {
		let doc = json!({"items": [{"name": "x", "tags": ["a", "b"]}, {"name": "y"}], "n": 1});
		let graph = build_graph(&doc, &LayoutConfig::default());
		for node in &graph.nodes {
			let incoming = graph.edges.iter().filter(|e| e.target == node.id).count();
			assert_eq!(incoming, usize::from(node.depth > 0), "node {}", node.id);
		}
		let unique: HashSet<&str> = ids(&graph).into_iter().collect();
		assert_eq!(unique.len(), graph.nodes.len());
	}

	#[test]
	fn separator_keys_do_not_collide() {
		let graph = build_graph(&json!({"a.b": 1, "a": {"b": 2}}), &LayoutConfig::default());
		assert_eq!(ids(&graph), [r#"["a.b"]"#, "a", "a.b"]);
	}

	#[test]
	fn build_is_deterministic() {
		let doc = json!({"k": [true, null, "s", {"deep": [1.5]}]});
		let config = LayoutConfig::default();
		assert_eq!(build_graph(&doc, &config), build_graph(&doc, &config));
	}

	#[test]
	fn colours_follow_value_kind() {
		let graph = build_graph(&json!({"o": {}, "a": [], "s": "x", "z": null}), &LayoutConfig::default());
		let fills: Vec<&str> = graph.nodes.iter().map(GraphNode::fill).collect();
		assert_eq!(fills, ["#2196F3", "#4CAF50", "#FF9800", "#FF9800"]);
	}

	#[test]
	fn number_labels_match_browser_text() {
		let doc = parse_document(
			r#"{"a": 1.0, "b": 1.5, "c": -0, "d": 1e400, "e": -1e400, "f": 2E3, "g": 42, "h": -7.000}"#,
		)
		.unwrap();
		let graph = build_graph(&doc, &LayoutConfig::default());
		let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
		assert_eq!(
			labels,
			["a: 1", "b: 1.5", "c: 0", "d: Infinity", "e: -Infinity", "f: 2000", "g: 42", "h: -7"]
		);
	}

	#[test]
	fn deep_nesting_lays_out_one_node_per_level() {
		let depth = 400;
		let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
		let graph = build_graph(&parse_document(&text).unwrap(), &LayoutConfig::default());
		assert_eq!(graph.nodes.len(), depth);
		assert_eq!(graph.edges.len(), depth - 1);
		let last = graph.nodes.last().unwrap();
		assert_eq!(last.depth, depth - 1);
		assert_eq!(last.id, "[0]".repeat(depth - 1));
		assert_eq!(last.label, format!("{} {{0}}", "[0]"));
	}

	#[test]
	fn siblings_keep_document_order() {
		let graph = build_graph(&json!({"r": [{"a": 1}, {"b": 2}], "s": 3}), &LayoutConfig::default());
		assert_eq!(
			ids(&graph),
			["r", "r[0]", "r[0].a", "r[1]", "r[1].b", "s"]
		);
		assert_eq!(
			edge_pairs(&graph),
			[
				("r", "r[0]"),
				("r[0]", "r[0].a"),
				("r", "r[1]"),
				("r[1]", "r[1].b"),
			]
		);
	}

	#[test]
	fn long_labels_are_truncated() {
		let config = LayoutConfig {
			max_label_chars: 10,
			..LayoutConfig::default()
		};
		let graph = build_graph(&json!({"k": "abcdefghijklmnop"}), &config);
		assert_eq!(graph.nodes[0].label, "k: abcdef…");
		assert_eq!(graph.nodes[0].label.chars().count(), 10);
	}

	#[test]
	fn bounds_cover_all_boxes() {
		let config = LayoutConfig::default();
		let graph = build_graph(&json!([1, 2]), &config);
		let bounds = graph.bounds().unwrap();
		assert_eq!(bounds.x, 0.0);
		assert_eq!(bounds.width, 200.0 + config.box_width);
		assert_eq!(bounds.height, 120.0 + config.box_height);
		assert_eq!(graph.position_of("[1]"), Some((200.0 + 88.0, 120.0 + 22.0)));
		assert!(TreeGraph::default().bounds().is_none());
	}
}
