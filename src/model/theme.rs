//! Light/dark theme and the canvas colours that go with it.

/// Page-wide colour scheme; not persisted between sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	/// Default.
	#[default]
	Light,
	/// Dark.
	Dark,
}

/// Colours the canvas renderer needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
	/// Canvas background.
	pub background: &'static str,
	/// Edge stroke.
	pub edge: &'static str,
	/// Label text inside node boxes.
	pub label: &'static str,
	/// Outline of the highlighted node.
	pub highlight: &'static str,
	/// Background dots.
	pub grid: &'static str,
	/// Minimap panel fill.
	pub minimap: &'static str,
	/// Minimap border and viewport frame.
	pub minimap_frame: &'static str,
}

impl Theme {
	/// The other theme.
	pub fn toggle(self) -> Self {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}

	/// Value for the `data-theme` attribute.
	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
		}
	}

	/// Caption of the toggle button: names the theme it switches to.
	pub fn toggle_label(self) -> &'static str {
		match self {
			Theme::Light => "🌙 Dark",
			Theme::Dark => "☀️ Light",
		}
	}

	/// Canvas colours.
	pub fn palette(self) -> Palette {
		match self {
			Theme::Light => Palette {
				background: "#f7f7f9",
				edge: "#b1b1b7",
				label: "#ffffff",
				highlight: "#e91e63",
				grid: "#c8c8d0",
				minimap: "rgba(255, 255, 255, 0.92)",
				minimap_frame: "#6c6c7a",
			},
			Theme::Dark => Palette {
				background: "#1a1a2e",
				edge: "rgba(100, 180, 255, 0.6)",
				label: "#ffffff",
				highlight: "#ffeb3b",
				grid: "#34344e",
				minimap: "rgba(20, 20, 36, 0.92)",
				minimap_frame: "#9aa8c8",
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn toggles_between_two_themes() {
		assert_eq!(Theme::default(), Theme::Light);
		assert_eq!(Theme::Light.toggle(), Theme::Dark);
		assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
		assert_eq!(Theme::Dark.as_str(), "dark");
		assert_eq!(Theme::Dark.toggle_label(), "☀️ Light");
		assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
	}
}
