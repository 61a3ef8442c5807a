//! # oxide-growth
//!
//! Oxide thickness statistics from TCAD simulation exports.
//!
//! Each input CSV holds alternating X/Y columns, one pair per simulation
//! run, with the run parameters encoded in the X header
//! (`Pres_<p>_O2_<o2>_N2_<n2>_Temp_<t>_time_<s>`). Samples with Y above
//! the oxide threshold form the grown layer; its X extent relative to the
//! original silicon surface at x = 0 gives the inward and outward growth.
//!
//! Two passes are provided:
//!
//! - [`pipeline::run_growth_check`]: inside/outside split per run, checked
//!   against the expected 44 % inward share.
//! - [`pipeline::run_thickness_extraction`]: raw oxide thickness per
//!   parameter set, deduplicated.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;

pub use error::{OxideError, Result};
