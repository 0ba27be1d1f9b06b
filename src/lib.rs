#![deny(missing_docs)]

//! irc2xyz - GRRM IRC Log to XYZ Trajectory Converter
//!
//! irc2xyz reads a GRRM log containing an Intrinsic Reaction Coordinate
//! (IRC) trace and writes two multi-frame XYZ trajectory files:
//!
//! - forward IRC (transition state → products)
//! - backward IRC (transition state → reactants)
//!
//! suitable for visualization in molecular viewers.
//!
//! # Overview
//!
//! A GRRM IRC log is loosely formatted text holding three structural
//! blocks, each delimited by free-text sentinel lines: the initial
//! transition-state geometry (`INITIAL STRUCTURE`), the forward IRC steps
//! (`IRC FOLLOWING (FORWARD)` up to `EQ EXIST WITHIN STEPSIZE`), and the
//! backward IRC steps (`IRC FOLLOWING (BACKWARD)` up to
//! `Energy profile along IRC`). The parser extracts atomic coordinates and
//! scalar energies from each block; the trajectory writer serializes the
//! assembled frame sequences.
//!
//! Both output trajectories start with the same transition-state frame. The
//! forward file keeps the log's chronological step order; the backward file
//! reverses it so that it, too, reads monotonically along the path.
//!
//! # Quick Start
//!
//! ```no_run
//! use irc2xyz::parser::parse_irc_log;
//! use irc2xyz::trajectory::{assemble_trajectories, write_trajectory};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = parse_irc_log(Path::new("1.log"))?;
//!     let (forward, backward) = assemble_trajectories(&log);
//!     write_trajectory(&forward, Path::new("irc_forward.xyz"))?;
//!     write_trajectory(&backward, Path::new("irc_backward.xyz"))?;
//!     Ok(())
//! }
//! ```
//!
//! # Output Format
//!
//! Each frame of an output file is:
//!
//! ```text
//! <atom count>
//! Energy=<energy:.6f> Label=<TS|FWD|BWD>
//! <Element> <x:.6f> <y:.6f> <z:.6f>
//! ... (one line per atom)
//! ```
//!
//! frames concatenated with no separator beyond their own fixed structure.
//!
//! # Modules
//!
//! - [`geometry`] - Core geometry data structures
//! - [`parser`] - GRRM log block scanning and extraction
//! - [`trajectory`] - Frame assembly and XYZ serialization
//! - [`settings`] - Configuration of default file paths

pub mod geometry;
pub mod parser;
/// Configuration management system
pub mod settings;
pub mod trajectory;

pub use geometry::{Geometry, Step};
pub use parser::{parse_irc_log, IrcLog, ParseError};
pub use trajectory::{assemble_trajectories, write_trajectory, Frame, FrameLabel};
