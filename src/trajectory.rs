//! Trajectory assembly and multi-frame XYZ output.
//!
//! This module turns a parsed [`IrcLog`] into two frame sequences and
//! serializes each to a multi-frame XYZ file suitable for molecular viewers:
//!
//! - **forward**: the transition state followed by the forward steps in log
//!   order (TS toward products)
//! - **backward**: the transition state followed by the backward steps in
//!   *reversed* log order, so the file reads monotonically along the path
//!
//! Each frame occupies the atom count line, a comment line with the frame's
//! energy and provenance label, then one line per atom.

use crate::geometry::Geometry;
use crate::parser::IrcLog;
use log::warn;
use std::fmt;
use std::fs;
use std::io::Result;
use std::path::Path;

/// Provenance of one trajectory frame.
///
/// Used only for annotation in the output comment line, never for
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLabel {
    /// The transition-state structure heading both trajectories
    TransitionState,
    /// A step on the forward IRC branch
    Forward,
    /// A step on the backward IRC branch
    Backward,
}

impl fmt::Display for FrameLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FrameLabel::TransitionState => "TS",
            FrameLabel::Forward => "FWD",
            FrameLabel::Backward => "BWD",
        };
        write!(f, "{}", tag)
    }
}

/// One labeled snapshot written into an output trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Energy in the log's native unit
    pub energy: f64,
    /// Atomic structure of this snapshot
    pub geometry: Geometry,
    /// Where along the path this frame came from
    pub label: FrameLabel,
}

/// Build the forward and backward frame sequences from a parsed log.
///
/// Both sequences begin with an identical transition-state frame. The
/// forward sequence keeps the log's chronological step order; the backward
/// sequence reverses it, which downstream viewers rely on for monotonic
/// step ordering.
///
/// Atom counts are not enforced here, but a disagreement between frames is
/// logged since it means the source log mixed structures of different size.
///
/// # Arguments
///
/// * `log` - Parsed log content
///
/// # Returns
///
/// The (forward, backward) frame sequences, ready for [`write_trajectory`].
pub fn assemble_trajectories(log: &IrcLog) -> (Vec<Frame>, Vec<Frame>) {
    let ts_frame = Frame {
        energy: log.transition_state.energy,
        geometry: log.transition_state.geometry.clone(),
        label: FrameLabel::TransitionState,
    };

    let mut forward = Vec::with_capacity(1 + log.forward.len());
    forward.push(ts_frame.clone());
    forward.extend(log.forward.iter().map(|step| Frame {
        energy: step.energy,
        geometry: step.geometry.clone(),
        label: FrameLabel::Forward,
    }));

    let mut backward = Vec::with_capacity(1 + log.backward.len());
    backward.push(ts_frame);
    backward.extend(log.backward.iter().rev().map(|step| Frame {
        energy: step.energy,
        geometry: step.geometry.clone(),
        label: FrameLabel::Backward,
    }));

    warn_on_mixed_atom_counts(&forward, "forward");
    warn_on_mixed_atom_counts(&backward, "backward");

    (forward, backward)
}

/// Log a warning if frames within one trajectory disagree on atom count.
fn warn_on_mixed_atom_counts(frames: &[Frame], which: &str) {
    if let Some(first) = frames.first() {
        let expected = first.geometry.num_atoms;
        if frames.iter().any(|f| f.geometry.num_atoms != expected) {
            warn!(
                "{} trajectory mixes atom counts; the source log is inconsistent and viewers may mis-render it",
                which
            );
        }
    }
}

/// Render a frame sequence as multi-frame XYZ text.
///
/// Per frame: the atom count, a comment line `Energy=<e> Label=<label>`
/// with the energy in fixed 6-decimal notation, then `El x y z` per atom,
/// coordinates also 6-decimal. Frames are concatenated with no separator.
fn render_trajectory(frames: &[Frame]) -> String {
    let mut content = String::new();
    for frame in frames {
        content.push_str(&format!("{}\n", frame.geometry.num_atoms));
        content.push_str(&format!(
            "Energy={:.6} Label={}\n",
            frame.energy, frame.label
        ));
        for i in 0..frame.geometry.num_atoms {
            let [x, y, z] = frame.geometry.get_atom_coords(i);
            content.push_str(&format!(
                "{} {:.6} {:.6} {:.6}\n",
                frame.geometry.elements[i], x, y, z
            ));
        }
    }
    content
}

/// Write a frame sequence to a multi-frame XYZ file.
///
/// An empty frame slice produces an empty file, not an error. Atom-count
/// consistency across frames is the caller's responsibility. The content is
/// accumulated in memory and written in one call, so the file handle is
/// closed before this function returns on every path.
///
/// # Arguments
///
/// * `frames` - Ordered frames to serialize
/// * `path` - Output file path
///
/// # Returns
///
/// Returns `Ok(())` on success, or an `std::io::Error` if writing fails.
pub fn write_trajectory(frames: &[Frame], path: &Path) -> Result<()> {
    fs::write(path, render_trajectory(frames))
}
