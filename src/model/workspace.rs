//! Application state: input → document → graph → highlight.

use serde_json::Value;

use super::layout::{GraphNode, LayoutConfig, TreeGraph, build_graph};
use super::parse::{InputError, parse_document};
use super::search::{SearchOutcome, find_node, normalize_query};

/// Where the app is in its input/search cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Nothing parsed, or the last input was rejected.
	Empty,
	/// A graph is shown with no search applied.
	Rendered,
	/// The last search matched one node.
	Highlighted,
	/// The last search matched nothing.
	NoMatch,
}

/// Everything the page derives from user input.
///
/// Each operation replaces the affected fields together, so the document,
/// graph, error and highlight never disagree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workspace {
	layout: LayoutConfig,
	document: Option<Value>,
	graph: Option<TreeGraph>,
	error: Option<InputError>,
	highlight: Option<String>,
	last_search: Option<SearchOutcome>,
}

impl Workspace {
	/// Empty workspace laying out with `layout`.
	pub fn with_layout(layout: LayoutConfig) -> Self {
		Self {
			layout,
			..Self::default()
		}
	}

	/// Parse `text` and lay it out, discarding all previous state.
	pub fn generate(&mut self, text: &str) -> Result<&TreeGraph, InputError> {
		self.highlight = None;
		self.last_search = None;
		match parse_document(text) {
			Ok(document) => {
				let graph = build_graph(&document, &self.layout);
				self.document = Some(document);
				self.error = None;
				Ok(self.graph.insert(graph))
			}
			Err(err) => {
				self.document = None;
				self.graph = None;
				self.error = Some(err.clone());
				Err(err)
			}
		}
	}

	/// Highlight the node matching `query`, or clear the highlight on a miss.
	pub fn search(&mut self, query: &str) -> SearchOutcome {
		let hit = self
			.graph
			.as_ref()
			.and_then(|graph| find_node(query, &graph.nodes))
			.map(|node| node.id.clone());
		let outcome = match hit {
			Some(id) => SearchOutcome::Match(id),
			None => SearchOutcome::NoMatch(normalize_query(query)),
		};
		self.highlight = match &outcome {
			SearchOutcome::Match(id) => Some(id.clone()),
			SearchOutcome::NoMatch(_) => None,
		};
		self.last_search = Some(outcome.clone());
		outcome
	}

	/// Drop the highlight and search result, keeping the graph.
	pub fn clear_search(&mut self) {
		self.highlight = None;
		self.last_search = None;
	}

	/// Current phase.
	pub fn phase(&self) -> Phase {
		match (&self.graph, &self.last_search) {
			(None, _) => Phase::Empty,
			(Some(_), None) => Phase::Rendered,
			(Some(_), Some(SearchOutcome::Match(_))) => Phase::Highlighted,
			(Some(_), Some(SearchOutcome::NoMatch(_))) => Phase::NoMatch,
		}
	}

	/// Parsed document, if the last input was valid.
	pub fn document(&self) -> Option<&Value> {
		self.document.as_ref()
	}

	/// Laid-out graph, if the last input was valid.
	pub fn graph(&self) -> Option<&TreeGraph> {
		self.graph.as_ref()
	}

	/// Rejection of the last input.
	pub fn error(&self) -> Option<&InputError> {
		self.error.as_ref()
	}

	/// Id of the highlighted node.
	pub fn highlight(&self) -> Option<&str> {
		self.highlight.as_deref()
	}

	/// Outcome of the last search since the last generate.
	pub fn last_search(&self) -> Option<&SearchOutcome> {
		self.last_search.as_ref()
	}

	/// Nodes currently highlighted; at most one.
	pub fn highlighted_nodes(&self) -> impl Iterator<Item = &GraphNode> {
		let id = self.highlight.as_deref();
		self.graph
			.iter()
			.flat_map(|graph| graph.nodes.iter())
			.filter(move |node| Some(node.id.as_str()) == id)
	}
}
