//! Path search over laid-out nodes.
//!
//! Queries are compared to node ids by exact equality after a light prefix
//! cleanup; there is no wildcard, slice or recursive-descent support.

use super::layout::GraphNode;

/// Trim the query and drop one leading `$.`, `$` or `.`.
pub fn normalize_query(query: &str) -> String {
	let query = query.trim();
	query
		.strip_prefix("$.")
		.or_else(|| query.strip_prefix('$'))
		.or_else(|| query.strip_prefix('.'))
		.unwrap_or(query)
		.to_owned()
}

/// First node whose id equals the normalized query.
pub fn find_node<'a>(query: &str, nodes: &'a [GraphNode]) -> Option<&'a GraphNode> {
	let wanted = normalize_query(query);
	nodes.iter().find(|node| node.id == wanted)
}

/// Result of a search request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
	/// Id of the matched node.
	Match(String),
	/// Normalized query that matched nothing.
	NoMatch(String),
}

impl SearchOutcome {
	/// Status line shown under the search box.
	pub fn status_message(&self) -> String {
		match self {
			SearchOutcome::Match(id) if id.is_empty() => "Match found: root".into(),
			SearchOutcome::Match(id) => format!("Match found: {id}"),
			SearchOutcome::NoMatch(query) if query.is_empty() => "No match found".into(),
			SearchOutcome::NoMatch(query) => format!("No match found for \"{query}\""),
		}
	}

	/// True for [`SearchOutcome::Match`].
	pub fn is_match(&self) -> bool {
		matches!(self, SearchOutcome::Match(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::layout::{LayoutConfig, build_graph};
	use serde_json::json;

	#[test]
	fn strips_root_prefixes() {
		assert_eq!(normalize_query("$.user.age"), "user.age");
		assert_eq!(normalize_query("$[0]"), "[0]");
		assert_eq!(normalize_query(".user"), "user");
		assert_eq!(normalize_query("  user.name \t"), "user.name");
		assert_eq!(normalize_query("$"), "");
	}

	#[test]
	fn strips_only_one_prefix() {
		assert_eq!(normalize_query("$..a"), ".a");
	}

	#[test]
	fn normalization_is_idempotent_on_node_ids() {
		let doc = json!({"items": [{"name": "x"}], "a.b": {"$id": 1, " k": [2]}, "": 0});
		let graph = build_graph(&doc, &LayoutConfig::default());
		for node in &graph.nodes {
			assert_eq!(normalize_query(&node.id), node.id);
			assert_eq!(normalize_query(&normalize_query(&node.id)), node.id);
			assert_eq!(find_node(&node.id, &graph.nodes).map(|n| &n.id), Some(&node.id));
		}
	}

	#[test]
	fn finds_nodes_by_exact_path() {
		let graph = build_graph(&json!({"user": {"name": "Ana", "age": 3}}), &LayoutConfig::default());
		assert_eq!(find_node("user.name", &graph.nodes).unwrap().id, "user.name");
		assert_eq!(find_node("$.user.age", &graph.nodes).unwrap().id, "user.age");
		assert!(find_node("user.missing", &graph.nodes).is_none());
		assert!(find_node("user.*", &graph.nodes).is_none());
		assert!(find_node("$..name", &graph.nodes).is_none());
	}

	#[test]
	fn finds_array_elements() {
		let graph = build_graph(&json!([1, 2, 3]), &LayoutConfig::default());
		let hit = find_node("[1]", &graph.nodes).unwrap();
		assert_eq!(hit.label, "[1]: 2");
		assert_eq!(find_node("$", &graph.nodes).unwrap().id, "");
	}

	#[test]
	fn status_messages() {
		assert_eq!(SearchOutcome::Match("a.b".into()).status_message(), "Match found: a.b");
		assert_eq!(
			SearchOutcome::NoMatch("x".into()).status_message(),
			"No match found for \"x\""
		);
		assert!(!SearchOutcome::NoMatch(String::new()).is_match());
	}
}
