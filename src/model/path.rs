//! Structural node paths and their dotted/bracketed string form.
//!
//! The rendered form doubles as the node id and as the search key, so it has
//! to be unambiguous: keys that would read as separators are written as
//! `["quoted"]` segments instead of `.key`.

use std::fmt;

/// One step from a parent value to a child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
	/// Object member.
	Key(String),
	/// Array element.
	Index(usize),
}

impl Segment {
	/// Short text used as the "key" part of a node label.
	pub fn display_key(&self) -> String {
		match self {
			Segment::Key(key) => key.clone(),
			Segment::Index(i) => format!("[{i}]"),
		}
	}
}

/// Position of a value inside a document. The empty path is the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<Segment>);

impl NodePath {
	/// The document root.
	pub fn root() -> Self {
		Self::default()
	}

	/// Path of an object member below `self`.
	pub fn key(&self, key: impl Into<String>) -> Self {
		self.child(Segment::Key(key.into()))
	}

	/// Path of an array element below `self`.
	pub fn index(&self, index: usize) -> Self {
		self.child(Segment::Index(index))
	}

	fn child(&self, segment: Segment) -> Self {
		let mut segments = self.0.clone();
		segments.push(segment);
		Self(segments)
	}

	/// Segments from the root down.
	pub fn segments(&self) -> &[Segment] {
		&self.0
	}

	/// Final segment, `None` for the root.
	pub fn last(&self) -> Option<&Segment> {
		self.0.last()
	}

	/// Number of segments.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True for the root path.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Whether a key must be written as `["..."]` to stay unambiguous.
fn needs_quoting(key: &str) -> bool {
	key.is_empty()
		|| key.starts_with('$')
		|| key.trim() != key
		|| key.contains(['.', '[', ']', '"', '\\'])
}

fn write_quoted(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
	f.write_str("[\"")?;
	for c in key.chars() {
		if matches!(c, '"' | '\\') {
			f.write_str("\\")?;
		}
		write!(f, "{c}")?;
	}
	f.write_str("\"]")
}

impl fmt::Display for NodePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, segment) in self.0.iter().enumerate() {
			match segment {
				Segment::Index(index) => write!(f, "[{index}]")?,
				Segment::Key(key) if needs_quoting(key) => write_quoted(f, key)?,
				Segment::Key(key) if i == 0 => f.write_str(key)?,
				Segment::Key(key) => write!(f, ".{key}")?,
			}
		}
		Ok(())
	}
}
