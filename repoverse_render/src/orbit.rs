//! Orbit layout: converts body records into per-body render descriptors.
//!
//! The descriptors carry everything the composer needs to emit one body's
//! layered markup (resolved glow color, orbital period, gradient id, and the
//! metric fields the HUD prints), so the composer stays pure assembly.

use repoverse_model::{BodyRecord, Texture, glow_color_for};
use serde::Serialize;

/// Orbital period law: `period_seconds = ORBIT_SPEED_CONSTANT / orbit_speed`.
/// Speed sits in the denominator so larger speed values revolve faster.
pub const ORBIT_SPEED_CONSTANT: f64 = 1000.0;

/// Period of the mood-glow opacity pulse, independent of the orbital period.
pub const GLOW_PULSE_SECONDS: f64 = 3.0;

/// Spin period of the dashed active-indicator ring.
pub const INDICATOR_SPIN_SECONDS: f64 = 10.0;

/// Render descriptor for one orbiting body.
#[derive(Debug, Clone, Serialize)]
pub struct BodyLayout {
    pub index: usize,
    pub name: String,
    pub link: String,
    pub color: String,
    pub radius: f64,
    pub orbit_radius: f64,
    /// Seconds per revolution. The hover label counter-rotates with this
    /// exact value; any difference would make the label drift.
    pub period_seconds: f64,
    pub glow_color: &'static str,
    /// Gradient id unique within the document, derived from the index.
    pub gradient_id: String,
    pub texture: Option<Texture>,
    pub mood: String,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub size_kb: u64,
}

/// Build a render descriptor per body, in index order. Pure and total:
/// numeric fields arrive pre-validated by the caller.
pub fn layout_bodies(bodies: &[BodyRecord]) -> Vec<BodyLayout> {
    bodies
        .iter()
        .enumerate()
        .map(|(index, body)| BodyLayout {
            index,
            name: body.name.clone(),
            link: body.html_url.clone(),
            color: body.color.clone(),
            radius: body.radius,
            orbit_radius: body.orbit_radius,
            period_seconds: ORBIT_SPEED_CONSTANT / body.orbit_speed,
            glow_color: glow_color_for(&body.mood),
            gradient_id: format!("body-fill-{index}"),
            texture: Texture::parse(&body.texture),
            mood: body.mood.clone(),
            language: body.language.clone(),
            stargazers_count: body.stargazers_count,
            size_kb: body.size_kb,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use repoverse_model::DEFAULT_GLOW_COLOR;

    fn body(name: &str, speed: f64, mood: &str, texture: &str) -> BodyRecord {
        BodyRecord {
            name: name.to_string(),
            html_url: format!("https://example.com/{name}"),
            color: "#8A2BE2".to_string(),
            radius: 12.0,
            orbit_radius: 110.0,
            orbit_speed: speed,
            mood: mood.to_string(),
            texture: texture.to_string(),
            language: Some("Rust".to_string()),
            stargazers_count: 7,
            size_kb: 512,
        }
    }

    #[test]
    fn period_follows_inverse_speed_law() {
        let layouts = layout_bodies(&[body("a", 500.0, "happy", ""), body("b", 1000.0, "happy", "")]);
        assert_eq!(layouts[0].period_seconds, 2.0);
        assert_eq!(layouts[1].period_seconds, 1.0);
    }

    #[test]
    fn period_strictly_decreases_as_speed_increases() {
        let speeds = [125.0, 250.0, 400.0, 999.0, 2000.0];
        let layouts =
            layout_bodies(&speeds.map(|s| body("x", s, "calm", "")).to_vec());
        for pair in layouts.windows(2) {
            assert!(
                pair[1].period_seconds < pair[0].period_seconds,
                "expected strictly shorter period for faster body: {} vs {}",
                pair[1].period_seconds,
                pair[0].period_seconds
            );
        }
    }

    #[test]
    fn unknown_mood_resolves_to_default_glow() {
        let layouts = layout_bodies(&[body("a", 300.0, "unknown-value", "")]);
        assert_eq!(layouts[0].glow_color, DEFAULT_GLOW_COLOR);
    }

    #[test]
    fn gradient_ids_are_unique_per_index() {
        let layouts = layout_bodies(&[
            body("a", 100.0, "happy", ""),
            body("b", 200.0, "calm", ""),
            body("c", 300.0, "focused", ""),
        ]);
        let mut ids: Vec<&str> = layouts.iter().map(|l| l.gradient_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), layouts.len());
    }

    #[test]
    fn texture_tags_resolve_to_at_most_one_overlay() {
        let layouts = layout_bodies(&[
            body("a", 100.0, "happy", "ringed"),
            body("b", 200.0, "happy", "cracked"),
            body("c", 300.0, "happy", "molten"),
        ]);
        assert_eq!(layouts[0].texture, Some(Texture::Ringed));
        assert_eq!(layouts[1].texture, Some(Texture::Cracked));
        assert_eq!(layouts[2].texture, None);
    }
}
