//! Document composer: assembles the final SVG from the orbit descriptors and
//! the HUD schedule.
//!
//! Everything here is string assembly. Shared defs are emitted once, bodies
//! in index order, HUD panels gated by their timelines. All color, timing,
//! and text content is inlined as literal values, so the document stands on
//! its own with no stylesheet or script.

use std::fmt::Write;

use repoverse_model::{BodyRecord, ProfileRecord, Texture};

use crate::escape::escape_xml;
use crate::hud::{DEFAULT_DWELL_SECONDS, HudSchedule, PanelTimeline, schedule_panels};
use crate::orbit::{BodyLayout, GLOW_PULSE_SECONDS, INDICATOR_SPIN_SECONDS, layout_bodies};

pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

const CENTER_X: f64 = CANVAS_WIDTH / 2.0;
const CENTER_Y: f64 = CANVAS_HEIGHT / 2.0;
const CENTER_RADIUS: f64 = 40.0;
const CENTER_PULSE_SECONDS: f64 = 4.0;

const BACKGROUND_COLOR: &str = "#030014";

const PANEL_X: f64 = 10.0;
const PANEL_WIDTH: f64 = 300.0;
const PANEL_HEIGHT: f64 = 80.0;
const PROGRESS_BAR_WIDTH: f64 = 200.0;

/// Fixed decorative starfield: (cx, cy, r, opacity).
const STARFIELD: [(f64, f64, f64, f64); 7] = [
    (100.0, 100.0, 1.0, 0.5),
    (500.0, 200.0, 1.5, 0.7),
    (700.0, 500.0, 1.0, 0.4),
    (200.0, 400.0, 2.0, 0.6),
    (600.0, 100.0, 1.0, 0.5),
    (50.0, 550.0, 1.5, 0.8),
    (750.0, 50.0, 1.0, 0.6),
];

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Seconds each body's HUD panel stays visible.
    pub dwell_seconds: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dwell_seconds: DEFAULT_DWELL_SECONDS,
        }
    }
}

/// Render the full document. Deterministic: identical inputs produce
/// byte-identical output. An empty body list still yields a complete,
/// well-formed document, just with no orbiting bodies and no HUD.
pub fn render_universe(
    profile: &ProfileRecord,
    bodies: &[BodyRecord],
    options: &RenderOptions,
) -> String {
    let layouts = layout_bodies(bodies);
    let schedule = schedule_panels(bodies.len(), options.dwell_seconds).ok();
    log::debug!(
        "[compose] rendering {} bodies for @{}",
        layouts.len(),
        profile.username
    );

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
        w = num(CANVAS_WIDTH),
        h = num(CANVAS_HEIGHT),
    );

    write_defs(&mut out);
    write_background(&mut out, profile);
    write_center_body(&mut out, profile);

    if let Some(schedule) = &schedule {
        for (layout, panel) in layouts.iter().zip(&schedule.panels) {
            write_orbiting_body(&mut out, layout, panel, schedule.total_cycle_seconds);
        }
        write_hud(&mut out, &layouts, schedule);
    }

    write_footer(&mut out, profile);
    out.push_str("</svg>\n");
    out
}

/// Shared defs, emitted once regardless of body count. Per-body gradients
/// live next to their bodies so ids never collide.
fn write_defs(out: &mut String) {
    out.push_str(concat!(
        "  <defs>\n",
        "    <radialGradient id=\"core-gradient\">\n",
        "      <stop offset=\"0%\" stop-color=\"#FDB813\" />\n",
        "      <stop offset=\"80%\" stop-color=\"#F5821F\" />\n",
        "      <stop offset=\"100%\" stop-color=\"rgba(245,130,31,0)\" />\n",
        "    </radialGradient>\n",
        "    <filter id=\"soft-glow\">\n",
        "      <feGaussianBlur stdDeviation=\"2.5\" result=\"coloredBlur\" />\n",
        "      <feMerge>\n",
        "        <feMergeNode in=\"coloredBlur\" />\n",
        "        <feMergeNode in=\"SourceGraphic\" />\n",
        "      </feMerge>\n",
        "    </filter>\n",
        "    <linearGradient id=\"panel-fade\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"0%\">\n",
        "      <stop offset=\"0%\" stop-color=\"rgba(0,0,0,0)\" />\n",
        "      <stop offset=\"10%\" stop-color=\"rgba(0,20,40,0.8)\" />\n",
        "      <stop offset=\"90%\" stop-color=\"rgba(0,20,40,0.8)\" />\n",
        "      <stop offset=\"100%\" stop-color=\"rgba(0,0,0,0)\" />\n",
        "    </linearGradient>\n",
        "  </defs>\n",
    ));
}

fn write_background(out: &mut String, profile: &ProfileRecord) {
    let _ = writeln!(
        out,
        r#"  <rect width="100%" height="100%" fill="{BACKGROUND_COLOR}" />"#
    );
    let _ = writeln!(
        out,
        r#"  <text x="{x}" y="{y}" text-anchor="middle" fill="white" opacity="0.05" font-family="Arial, sans-serif" font-size="40" font-weight="bold">&#169; {name}</text>"#,
        x = num(CENTER_X),
        y = num(CENTER_Y + 150.0),
        name = escape_xml(&profile.name),
    );
    for (cx, cy, r, opacity) in STARFIELD {
        let _ = writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="white" opacity="{}" />"#,
            num(cx),
            num(cy),
            num(r),
            num(opacity),
        );
    }
}

fn write_center_body(out: &mut String, profile: &ProfileRecord) {
    let avatar = escape_xml(&profile.avatar_url);
    let _ = writeln!(out, r#"  <g filter="url(#soft-glow)">"#);
    let _ = writeln!(
        out,
        r#"    <circle cx="{cx}" cy="{cy}" r="{r}" fill="url(#core-gradient)">"#,
        cx = num(CENTER_X),
        cy = num(CENTER_Y),
        r = num(CENTER_RADIUS),
    );
    let _ = writeln!(
        out,
        r#"      <animate attributeName="r" values="{r};{r2};{r}" dur="{dur}" repeatCount="indefinite" />"#,
        r = num(CENTER_RADIUS),
        r2 = num(CENTER_RADIUS + 2.0),
        dur = seconds(CENTER_PULSE_SECONDS),
    );
    out.push_str("    </circle>\n");
    let _ = writeln!(
        out,
        r#"    <image href="{avatar}" x="{x}" y="{y}" height="{side}" width="{side}" clip-path="circle({clip}px at center)" opacity="0.8" />"#,
        x = num(CENTER_X - CENTER_RADIUS),
        y = num(CENTER_Y - CENTER_RADIUS),
        side = num(CENTER_RADIUS * 2.0),
        clip = num(CENTER_RADIUS),
    );
    out.push_str("  </g>\n");
    let _ = writeln!(
        out,
        r#"  <text x="{x}" y="{y}" text-anchor="middle" fill="white" font-family="Arial, sans-serif" font-size="14" font-weight="bold">{name}</text>"#,
        x = num(CENTER_X),
        y = num(CENTER_Y + 60.0),
        name = escape_xml(&profile.name),
    );
    let _ = writeln!(
        out,
        r##"  <text x="{x}" y="{y}" text-anchor="middle" fill="#aaa" font-family="Arial, sans-serif" font-size="10">@{username}</text>"##,
        x = num(CENTER_X),
        y = num(CENTER_Y + 75.0),
        username = escape_xml(&profile.username),
    );
}

/// One body's layered markup: static orbit ring, then the rotating group
/// holding disc, atmosphere rim, optional texture overlay, pulsing mood
/// glow, the dashed active indicator, and the counter-rotated hover label.
fn write_orbiting_body(
    out: &mut String,
    layout: &BodyLayout,
    panel: &PanelTimeline,
    total_cycle_seconds: f64,
) {
    let body_x = num(CENTER_X + layout.orbit_radius);
    let body_y = num(CENTER_Y);
    let color = escape_xml(&layout.color);
    let period = seconds(layout.period_seconds);

    let _ = writeln!(
        out,
        r#"  <a href="{href}" target="_blank">"#,
        href = escape_xml(&layout.link),
    );
    let _ = writeln!(
        out,
        concat!(
            "    <defs>\n",
            "      <radialGradient id=\"{id}\" cx=\"30%\" cy=\"30%\" r=\"70%\">\n",
            "        <stop offset=\"0%\" stop-color=\"{color}\" stop-opacity=\"1\" />\n",
            "        <stop offset=\"50%\" stop-color=\"{color}\" stop-opacity=\"0.8\" />\n",
            "        <stop offset=\"100%\" stop-color=\"#000\" stop-opacity=\"1\" />\n",
            "      </radialGradient>\n",
            "    </defs>",
        ),
        id = layout.gradient_id,
        color = color,
    );

    // Static orbit path, then everything that revolves.
    let _ = writeln!(
        out,
        r#"    <circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="rgba(255,255,255,0.1)" stroke-width="1" />"#,
        cx = num(CENTER_X),
        cy = num(CENTER_Y),
        r = num(layout.orbit_radius),
    );
    out.push_str("    <g>\n");
    let _ = writeln!(
        out,
        r#"      <animateTransform attributeName="transform" type="rotate" from="0 {cx} {cy}" to="360 {cx} {cy}" dur="{period}" repeatCount="indefinite" />"#,
        cx = num(CENTER_X),
        cy = num(CENTER_Y),
    );

    let _ = writeln!(
        out,
        r#"      <circle cx="{body_x}" cy="{body_y}" r="{r}" fill="url(#{id})"><title>{name} ({language})</title></circle>"#,
        r = num(layout.radius),
        id = layout.gradient_id,
        name = escape_xml(&layout.name),
        language = escape_xml(layout.language.as_deref().unwrap_or("N/A")),
    );
    let _ = writeln!(
        out,
        r#"      <circle cx="{body_x}" cy="{body_y}" r="{r}" fill="none" stroke="{glow}" stroke-width="2" opacity="0.3" />"#,
        r = num(layout.radius),
        glow = layout.glow_color,
    );

    write_texture_overlay(out, layout, &body_x, &body_y);

    let _ = writeln!(
        out,
        r#"      <circle cx="{body_x}" cy="{body_y}" r="{r}" fill="none" stroke="{glow}" stroke-width="1" opacity="0.4" filter="url(#soft-glow)">"#,
        r = num(layout.radius * 1.2),
        glow = layout.glow_color,
    );
    let _ = writeln!(
        out,
        r#"        <animate attributeName="opacity" values="0.2;0.5;0.2" dur="{dur}" repeatCount="indefinite" />"#,
        dur = seconds(GLOW_PULSE_SECONDS),
    );
    out.push_str("      </circle>\n");

    // Dashed ring marking this body's HUD turn. It reuses the panel's
    // hard-cut keyframes so ring and panel flip at the same instants.
    let _ = writeln!(
        out,
        r#"      <circle cx="{body_x}" cy="{body_y}" r="{r}" fill="none" stroke="white" stroke-width="1.5" stroke-dasharray="3 3" opacity="0">"#,
        r = num(layout.radius + 10.0),
    );
    let _ = writeln!(
        out,
        r#"        <animate attributeName="opacity" values="{values}" keyTimes="{times}" dur="{dur}" repeatCount="indefinite" />"#,
        values = join_nums(&panel.values),
        times = join_nums(&panel.key_times),
        dur = seconds(total_cycle_seconds),
    );
    let _ = writeln!(
        out,
        r#"        <animateTransform attributeName="transform" type="rotate" from="0 {body_x} {body_y}" to="360 {body_x} {body_y}" dur="{dur}" repeatCount="indefinite" />"#,
        dur = seconds(INDICATOR_SPIN_SECONDS),
    );
    out.push_str("      </circle>\n");

    // Hover label. The counter-rotation runs at the orbital period in the
    // opposite direction, so the net rotation cancels and the text stays
    // upright. Visibility is a binary mouseover toggle.
    out.push_str("      <g opacity=\"0\">\n");
    out.push_str(
        "        <set attributeName=\"opacity\" to=\"1\" begin=\"mouseover\" end=\"mouseout\" />\n",
    );
    let _ = writeln!(
        out,
        r#"        <animateTransform attributeName="transform" type="rotate" from="360 {body_x} {body_y}" to="0 {body_x} {body_y}" dur="{period}" repeatCount="indefinite" />"#,
    );
    let _ = writeln!(
        out,
        r#"        <text x="{body_x}" y="{label_y}" text-anchor="middle" fill="white" font-family="Arial, sans-serif" font-size="12" font-weight="bold">{name}</text>"#,
        label_y = num(CENTER_Y + layout.radius + 15.0),
        name = escape_xml(&layout.name),
    );
    out.push_str("      </g>\n");

    out.push_str("    </g>\n");
    out.push_str("  </a>\n");
}

fn write_texture_overlay(out: &mut String, layout: &BodyLayout, body_x: &str, body_y: &str) {
    match layout.texture {
        Some(Texture::Ringed) => {
            let _ = writeln!(
                out,
                r#"      <ellipse cx="{body_x}" cy="{body_y}" rx="{rx}" ry="{ry}" fill="none" stroke="rgba(255,255,255,0.6)" stroke-width="2" transform="rotate(-15, {body_x}, {body_y})" />"#,
                rx = num(layout.radius * 1.6),
                ry = num(layout.radius * 0.4),
            );
        }
        Some(Texture::Cracked) => {
            let x = CENTER_X + layout.orbit_radius;
            let _ = writeln!(
                out,
                r#"      <path d="M{x0} {y0} L{x1} {y1} M{x2} {y2} L{x3} {y3}" stroke="rgba(0,0,0,0.3)" stroke-width="1" />"#,
                x0 = num(x - 5.0),
                y0 = num(CENTER_Y - 5.0),
                x1 = num(x + 5.0),
                y1 = num(CENTER_Y + 5.0),
                x2 = num(x + 2.0),
                y2 = num(CENTER_Y - 8.0),
                x3 = num(x - 2.0),
                y3 = num(CENTER_Y + 2.0),
            );
        }
        None => {}
    }
}

/// HUD: one shared panel background, then per body a panel group gated by
/// its visibility timeline, plus the window-locked progress bar.
fn write_hud(out: &mut String, layouts: &[BodyLayout], schedule: &HudSchedule) {
    let panel_y = CANVAS_HEIGHT - 90.0;
    let _ = writeln!(
        out,
        r#"  <rect x="{x}" y="{y}" width="{w}" height="{h}" fill="url(#panel-fade)" stroke="rgba(0,255,255,0.2)" stroke-width="1" rx="5" />"#,
        x = num(PANEL_X),
        y = num(panel_y),
        w = num(PANEL_WIDTH),
        h = num(PANEL_HEIGHT),
    );

    for (layout, panel) in layouts.iter().zip(&schedule.panels) {
        out.push_str("  <g opacity=\"0\">\n");
        let _ = writeln!(
            out,
            r#"    <animate attributeName="opacity" values="{values}" keyTimes="{times}" dur="{dur}" repeatCount="indefinite" />"#,
            values = join_nums(&panel.values),
            times = join_nums(&panel.key_times),
            dur = seconds(schedule.total_cycle_seconds),
        );
        let _ = writeln!(
            out,
            r#"    <text x="20" y="{y}" fill="{glow}" font-family="Courier New, monospace" font-size="16" font-weight="bold">&gt; {name}</text>"#,
            y = num(CANVAS_HEIGHT - 80.0),
            glow = layout.glow_color,
            name = escape_xml(&layout.name),
        );
        let _ = writeln!(
            out,
            r##"    <text x="20" y="{y}" fill="#ccc" font-family="Courier New, monospace" font-size="12">LANG: {language} | STARS: {stars}</text>"##,
            y = num(CANVAS_HEIGHT - 60.0),
            language = escape_xml(layout.language.as_deref().unwrap_or("N/A")),
            stars = layout.stargazers_count,
        );
        let _ = writeln!(
            out,
            r##"    <text x="20" y="{y}" fill="#ccc" font-family="Courier New, monospace" font-size="12">MOOD: {mood} | SIZE: {size}kb</text>"##,
            y = num(CANVAS_HEIGHT - 45.0),
            mood = escape_xml(&layout.mood.to_uppercase()),
            size = layout.size_kb,
        );
        let _ = writeln!(
            out,
            r#"    <rect x="20" y="{y}" width="0" height="2" fill="{glow}">"#,
            y = num(CANVAS_HEIGHT - 35.0),
            glow = layout.glow_color,
        );
        let _ = writeln!(
            out,
            r#"      <animate attributeName="width" values="0;{bar}" begin="{begin}" dur="{dur}" fill="freeze" />"#,
            bar = num(PROGRESS_BAR_WIDTH),
            begin = seconds(panel.window_start_seconds),
            dur = seconds(schedule.dwell_seconds),
        );
        out.push_str("    </rect>\n");
        out.push_str("  </g>\n");
    }
}

fn write_footer(out: &mut String, profile: &ProfileRecord) {
    let _ = writeln!(
        out,
        r##"  <text x="{x}" y="{y}" text-anchor="end" fill="#333" font-family="Arial, sans-serif" font-size="10">RepoVerse</text>"##,
        x = num(CANVAS_WIDTH - 10.0),
        y = num(CANVAS_HEIGHT - 10.0),
    );
    let _ = writeln!(
        out,
        r#"  <g transform="translate({x}, 20)">"#,
        x = num(CANVAS_WIDTH - 70.0),
    );
    out.push_str(
        "    <circle cx=\"25\" cy=\"25\" r=\"27\" fill=\"none\" stroke=\"rgba(255,255,255,0.2)\" stroke-width=\"1\" />\n",
    );
    let _ = writeln!(
        out,
        r#"    <image href="{avatar}" x="0" y="0" height="50" width="50" clip-path="circle(25px at center)" />"#,
        avatar = escape_xml(&profile.avatar_url),
    );
    out.push_str("  </g>\n");
}

/// Format a coordinate or timing value: integers without a fraction, other
/// values with up to six decimals, trailing zeros trimmed.
fn num(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

fn seconds(value: f64) -> String {
    format!("{}s", num(value))
}

fn join_nums(values: &[f64]) -> String {
    values.iter().map(|v| num(*v)).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_trims_trailing_zeros() {
        assert_eq!(num(400.0), "400");
        assert_eq!(num(2.5), "2.5");
        assert_eq!(num(1.0 / 3.0), "0.333333");
        assert_eq!(num(1.0 / 3.0 - 0.001), "0.332333");
        assert_eq!(num(0.0), "0");
    }

    #[test]
    fn seconds_appends_the_unit() {
        assert_eq!(seconds(12.0), "12s");
        assert_eq!(seconds(2.5), "2.5s");
    }

    #[test]
    fn join_nums_uses_smil_separators() {
        assert_eq!(join_nums(&[1.0, 1.0, 0.0, 0.0]), "1; 1; 0; 0");
    }
}
