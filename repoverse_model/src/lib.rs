//! Shared input contract for the RepoVerse generators.
//!
//! The data supplier (whatever fetches the profile and repository list) hands
//! these records to the renderer by value and never sees them again. This
//! crate keeps the wire shape and the closed lookup tables in one place so
//! suppliers and renderers stay interoperable.

use serde::{Deserialize, Serialize};

/// Glow color applied when a body's mood tag is not in the closed mood set.
pub const DEFAULT_GLOW_COLOR: &str = "#ffffff";

/// The profile shown at the center of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub name: String,
    pub username: String,
    pub avatar_url: String,
}

/// One orbiting item. Array position doubles as the body's index: it fixes
/// draw order, HUD cycle order, and the per-body resource ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyRecord {
    pub name: String,
    pub html_url: String,
    /// Primary fill color, any CSS color string.
    pub color: String,
    /// Disc radius in canvas pixels.
    pub radius: f64,
    /// Distance from the center body in canvas pixels.
    pub orbit_radius: f64,
    /// Higher values revolve faster; must be positive (caller's contract).
    pub orbit_speed: f64,
    /// Mood tag; unknown tags fall back to [`DEFAULT_GLOW_COLOR`].
    pub mood: String,
    /// Texture tag; anything but `ringed`/`cracked` means no overlay.
    #[serde(default)]
    pub texture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub size_kb: u64,
}

/// Closed mood set. Tags outside this set are not an error; they resolve to
/// the default glow via [`glow_color_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    Happy,
    Focused,
    Calm,
    Stressed,
    Energetic,
}

impl Mood {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "happy" => Some(Self::Happy),
            "focused" => Some(Self::Focused),
            "calm" => Some(Self::Calm),
            "stressed" => Some(Self::Stressed),
            "energetic" => Some(Self::Energetic),
            _ => None,
        }
    }

    pub const fn glow_color(self) -> &'static str {
        match self {
            Self::Happy => "#FFD700",
            Self::Focused => "#00FF94",
            Self::Calm => "#00C2FF",
            Self::Stressed => "#FF4500",
            Self::Energetic => "#FF00E6",
        }
    }
}

/// Resolve a raw mood tag to its glow color, falling back to the default.
pub fn glow_color_for(tag: &str) -> &'static str {
    Mood::parse(tag)
        .map(Mood::glow_color)
        .unwrap_or(DEFAULT_GLOW_COLOR)
}

/// Surface overlays a body may carry. A body resolves to at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Texture {
    Ringed,
    Cracked,
}

impl Texture {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "ringed" => Some(Self::Ringed),
            "cracked" => Some(Self::Cracked),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_record_parses_wire_form() {
        let body: BodyRecord = serde_json::from_str(
            r##"{
                "name": "nebula-cache",
                "htmlUrl": "https://example.com/nebula-cache",
                "color": "#8A2BE2",
                "radius": 14.0,
                "orbitRadius": 120.0,
                "orbitSpeed": 500.0,
                "mood": "focused",
                "texture": "ringed",
                "language": "Rust",
                "stargazersCount": 42,
                "sizeKb": 1337
            }"##,
        )
        .expect("wire form parses");

        assert_eq!(body.name, "nebula-cache");
        assert_eq!(body.orbit_speed, 500.0);
        assert_eq!(body.language.as_deref(), Some("Rust"));
        assert_eq!(Texture::parse(&body.texture), Some(Texture::Ringed));
    }

    #[test]
    fn texture_and_language_default_when_absent() {
        let body: BodyRecord = serde_json::from_str(
            r##"{
                "name": "bare",
                "htmlUrl": "https://example.com/bare",
                "color": "#123456",
                "radius": 8.0,
                "orbitRadius": 90.0,
                "orbitSpeed": 250.0,
                "mood": "calm",
                "stargazersCount": 0,
                "sizeKb": 12
            }"##,
        )
        .expect("record without optional fields parses");

        assert!(body.texture.is_empty());
        assert_eq!(Texture::parse(&body.texture), None);
        assert!(body.language.is_none());
    }

    #[test]
    fn known_moods_map_to_fixed_colors() {
        assert_eq!(glow_color_for("happy"), "#FFD700");
        assert_eq!(glow_color_for("focused"), "#00FF94");
        assert_eq!(glow_color_for("calm"), "#00C2FF");
        assert_eq!(glow_color_for("stressed"), "#FF4500");
        assert_eq!(glow_color_for("energetic"), "#FF00E6");
    }

    #[test]
    fn unknown_mood_falls_back_to_default_glow() {
        assert_eq!(glow_color_for("unknown-value"), DEFAULT_GLOW_COLOR);
        assert_eq!(glow_color_for(""), DEFAULT_GLOW_COLOR);
        assert_eq!(glow_color_for("HAPPY"), DEFAULT_GLOW_COLOR);
    }
}
