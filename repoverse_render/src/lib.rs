//! RepoVerse renderer: turns a profile record plus a list of body records
//! into one self-contained animated SVG document.
//!
//! Generation is a pure function of its inputs. All motion in the output is
//! declarative SMIL replayed by whatever displays the document; nothing here
//! schedules or times anything at runtime.

pub mod compose;
pub mod hud;
pub mod orbit;

mod escape;

pub use compose::{CANVAS_HEIGHT, CANVAS_WIDTH, RenderOptions, render_universe};
pub use hud::{
    CyclePosition, DEFAULT_DWELL_SECONDS, HARD_CUT_EPSILON, HudSchedule, PanelTimeline,
    ScheduleError, schedule_panels,
};
pub use orbit::{BodyLayout, GLOW_PULSE_SECONDS, ORBIT_SPEED_CONSTANT, layout_bodies};
pub use repoverse_model::{BodyRecord, ProfileRecord};
