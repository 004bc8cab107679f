//! Badge sheet layout.
//!
//! Turns the flat attendee sequence into pages of badge cells. Placement is
//! pure index arithmetic on [`GridSpec`](badge_model::GridSpec); each cell
//! carries everything the document writer needs to draw it.

mod cell;
mod config;
mod plan;

pub use cell::{BadgeCell, LogoRegion, TextLine, TextRegion};
pub use config::LayoutConfig;
pub use plan::{BadgePage, BadgePlan, plan_badges};
