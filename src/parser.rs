//! GRRM log parsing for IRC trajectories.
//!
//! This module locates and extracts the three structural blocks of a GRRM
//! IRC log:
//!
//! - **Initial structure**: the transition-state geometry and its energy
//! - **Forward steps**: IRC steps from the TS toward products
//! - **Backward steps**: IRC steps from the TS toward reactants
//!
//! # Log Format
//!
//! GRRM logs are loosely formatted text; section boundaries are free-text
//! header lines identified here by literal sentinel substrings:
//!
//! ```text
//! INITIAL STRUCTURE
//! C    0.000000   0.000000   0.000000
//! H    1.089000   0.000000   0.000000
//! ENERGY    =   -40.518400
//!
//! IRC FOLLOWING (FORWARD)
//! # STEP 1
//! C    0.010000   0.000000   0.000000
//! H    1.099000   0.000000   0.000000
//! ENERGY    =   -40.518100
//! EQ EXIST WITHIN STEPSIZE
//!
//! IRC FOLLOWING (BACKWARD)
//! # STEP 1
//! ...
//! Energy profile along IRC
//! ```
//!
//! Atom lines are recognized by their first whitespace token matching an
//! element symbol (one uppercase letter, optional one lowercase letter);
//! anything else inside a block is skipped. Energies are the third
//! whitespace token of the block's `ENERGY` line, carried verbatim.
//!
//! # Scanning Design
//!
//! Each block is scanned by a small explicit state machine over a slice of
//! lines ([`scan_initial_block`], [`scan_step_block`]); the step scanner is
//! one reusable primitive invoked with different sentinel pairs for the
//! forward and backward sections. Outcomes are tagged explicitly:
//!
//! - a block whose start sentinel never appears is [`BlockOutcome::NotFound`],
//! - malformed content *inside* a found block (truncated step, short
//!   `ENERGY` line, unparseable number) is [`ParseError::Malformed`] with
//!   the 1-based line number.
//!
//! [`parse_irc_log`] maps a missing initial-structure block to
//! [`ParseError::MissingTransitionState`], while a missing forward or
//! backward section simply yields no steps for that branch.

use crate::geometry::{Geometry, Step};
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Sentinel marking the transition-state geometry block.
const TS_MARKER: &str = "INITIAL STRUCTURE";
/// Sentinel opening the forward IRC section.
const FORWARD_START: &str = "IRC FOLLOWING (FORWARD)";
/// Sentinel closing the forward IRC section.
const FORWARD_END: &str = "EQ EXIST WITHIN STEPSIZE";
/// Sentinel opening the backward IRC section.
const BACKWARD_START: &str = "IRC FOLLOWING (BACKWARD)";
/// Sentinel closing the backward IRC section.
const BACKWARD_END: &str = "Energy profile along IRC";
/// Header introducing one IRC step inside a section.
const STEP_HEADER: &str = "# STEP";
/// Substring identifying the energy line of a block.
const ENERGY_MARKER: &str = "ENERGY";

lazy_static! {
    /// Element symbol: one uppercase letter, optional one lowercase letter.
    static ref ELEMENT_RE: Regex = Regex::new(r"^[A-Z][a-z]?$").unwrap();
}

/// Error type for log parsing operations.
#[derive(Error, Debug)]
pub enum ParseError {
    /// I/O error when reading the log file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The log contains no `INITIAL STRUCTURE` block
    #[error("no transition state found: log contains no \"INITIAL STRUCTURE\" block")]
    MissingTransitionState,
    /// A located block contains content the scanner cannot interpret
    #[error("malformed {block} block at line {line}: {reason}")]
    Malformed {
        /// Which block was being scanned
        block: &'static str,
        /// 1-based line number in the log
        line: usize,
        /// What was wrong with the content
        reason: String,
    },
}

/// Type alias for parse operation results
type Result<T> = std::result::Result<T, ParseError>;

/// Outcome of scanning for one labeled block.
///
/// Distinguishes "the block's start sentinel never appears in the log" from
/// a successfully scanned block. Malformed content inside a found block is
/// reported separately as [`ParseError::Malformed`], so the three states a
/// block can be in (found, absent, broken) are never conflated.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockOutcome<T> {
    /// The block was located and scanned to completion
    Found(T),
    /// The block's start sentinel does not occur in the log
    NotFound,
}

/// Complete parsed content of one GRRM IRC log.
///
/// Aggregates the three structural blocks. Forward and backward step lists
/// are in chronological log order; reordering for output is the trajectory
/// assembly's concern, not the parser's.
#[derive(Debug, Clone)]
pub struct IrcLog {
    /// Transition-state geometry and energy from the `INITIAL STRUCTURE` block
    pub transition_state: Step,
    /// Forward IRC steps in log order (TS toward products); empty if the
    /// forward section is absent
    pub forward: Vec<Step>,
    /// Backward IRC steps in log order (TS toward reactants); empty if the
    /// backward section is absent
    pub backward: Vec<Step>,
}

/// Parse a GRRM IRC log file.
///
/// Reads the whole file into memory and extracts the transition-state
/// geometry plus the forward and backward IRC step sequences.
///
/// # Arguments
///
/// * `path` - Path to the GRRM log file (e.g., "1.log")
///
/// # Returns
///
/// Returns `Ok(IrcLog)` on success, or `Err(ParseError)` if:
/// - The file cannot be read (I/O error)
/// - No `INITIAL STRUCTURE` block exists
/// - A located block is malformed (truncated step, bad number)
///
/// A missing forward or backward section is not an error; the corresponding
/// step list is empty and a warning is logged.
///
/// # Examples
///
/// ```no_run
/// use irc2xyz::parser::parse_irc_log;
/// use std::path::Path;
///
/// let log = parse_irc_log(Path::new("1.log"))?;
/// println!(
///     "TS energy {:.6}, {} forward and {} backward steps",
///     log.transition_state.energy,
///     log.forward.len(),
///     log.backward.len()
/// );
/// # Ok::<(), irc2xyz::parser::ParseError>(())
/// ```
pub fn parse_irc_log(path: &Path) -> Result<IrcLog> {
    let content = fs::read_to_string(path)?;
    parse_irc_content(&content)
}

/// Parse GRRM IRC log content already held in memory.
///
/// Same contract as [`parse_irc_log`] minus the file read; useful for tests
/// and for callers that obtain the log text some other way.
pub fn parse_irc_content(content: &str) -> Result<IrcLog> {
    let lines: Vec<&str> = content.lines().collect();

    let transition_state = match scan_initial_block(&lines)? {
        BlockOutcome::Found(step) => step,
        BlockOutcome::NotFound => return Err(ParseError::MissingTransitionState),
    };

    let forward = match scan_step_block(&lines, FORWARD_START, FORWARD_END, "forward IRC")? {
        BlockOutcome::Found(steps) => steps,
        BlockOutcome::NotFound => {
            warn!(
                "no \"{}\" section found; forward trajectory will hold only the transition state",
                FORWARD_START
            );
            Vec::new()
        }
    };

    let backward = match scan_step_block(&lines, BACKWARD_START, BACKWARD_END, "backward IRC")? {
        BlockOutcome::Found(steps) => steps,
        BlockOutcome::NotFound => {
            warn!(
                "no \"{}\" section found; backward trajectory will hold only the transition state",
                BACKWARD_START
            );
            Vec::new()
        }
    };

    Ok(IrcLog {
        transition_state,
        forward,
        backward,
    })
}

/// Scanner states for the initial-structure block.
enum TsScanState {
    /// Looking for the `INITIAL STRUCTURE` sentinel
    SeekBlockStart,
    /// Collecting atom lines until the `ENERGY` line or a blank line
    InBlock,
}

/// Scan for the transition-state block.
///
/// Advances through `lines` until one contains `INITIAL STRUCTURE`, then
/// collects atom lines until the block's `ENERGY` line (first token exactly
/// `ENERGY`, energy = third token). Only the first such block is used.
///
/// # Returns
///
/// - `Ok(BlockOutcome::Found(step))` with the TS geometry and energy
/// - `Ok(BlockOutcome::NotFound)` if the sentinel never occurs
/// - `Err(ParseError::Malformed)` if the block ends (blank line or
///   end-of-input) before its `ENERGY` line, or a number fails to parse
pub fn scan_initial_block(lines: &[&str]) -> Result<BlockOutcome<Step>> {
    const BLOCK: &str = "initial structure";

    let mut state = TsScanState::SeekBlockStart;
    let mut elements = Vec::new();
    let mut coords = Vec::new();
    let mut block_line = 0;

    for (idx, line) in lines.iter().enumerate() {
        match state {
            TsScanState::SeekBlockStart => {
                if line.contains(TS_MARKER) {
                    state = TsScanState::InBlock;
                    block_line = idx + 1;
                }
            }
            TsScanState::InBlock => {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                match tokens.first() {
                    None => {
                        return Err(ParseError::Malformed {
                            block: BLOCK,
                            line: idx + 1,
                            reason: "block ends before its ENERGY line".to_string(),
                        });
                    }
                    Some(&ENERGY_MARKER) => {
                        let energy = parse_energy_token(&tokens, BLOCK, idx + 1)?;
                        return Ok(BlockOutcome::Found(Step {
                            energy,
                            geometry: Geometry::new(elements, coords),
                        }));
                    }
                    Some(first) if ELEMENT_RE.is_match(first) => {
                        push_atom(&tokens, BLOCK, idx + 1, &mut elements, &mut coords)?;
                    }
                    Some(_) => {}
                }
            }
        }
    }

    match state {
        TsScanState::SeekBlockStart => Ok(BlockOutcome::NotFound),
        TsScanState::InBlock => Err(ParseError::Malformed {
            block: BLOCK,
            line: block_line,
            reason: "block ends before its ENERGY line".to_string(),
        }),
    }
}

/// Scanner states for a sentinel-delimited step section.
enum StepScanState {
    /// Looking for the section's start sentinel
    SeekBlockStart,
    /// Inside the section, looking for a `# STEP` header or the end sentinel
    SeekStepStart,
    /// Collecting one step's atom lines until its `ENERGY` line
    InStepAtoms,
}

/// Scan one sentinel-delimited IRC step section.
///
/// This is the reusable block-scanning primitive: it is invoked once with
/// the forward sentinels and once with the backward sentinels. Inside the
/// section each step opens with a `# STEP` header, carries atom lines, and
/// closes with a line containing `ENERGY` whose third whitespace token is
/// the step energy. Steps are returned in the order encountered, i.e.
/// chronological along the IRC path.
///
/// # Arguments
///
/// * `lines` - The full log as a slice of lines
/// * `start_marker` - Literal substring opening the section
/// * `end_marker` - Literal substring closing the section
/// * `block` - Block name used in diagnostics
///
/// # Returns
///
/// - `Ok(BlockOutcome::Found(steps))` once the end sentinel is reached; also
///   returned when the end sentinel is missing and the scan ran to
///   end-of-input between steps
/// - `Ok(BlockOutcome::NotFound)` if the start sentinel never occurs
/// - `Err(ParseError::Malformed)` if a step is cut off before its `ENERGY`
///   line or a number fails to parse
pub fn scan_step_block(
    lines: &[&str],
    start_marker: &str,
    end_marker: &str,
    block: &'static str,
) -> Result<BlockOutcome<Vec<Step>>> {
    let mut state = StepScanState::SeekBlockStart;
    let mut steps = Vec::new();
    let mut elements = Vec::new();
    let mut coords = Vec::new();
    let mut step_line = 0;

    for (idx, line) in lines.iter().enumerate() {
        match state {
            StepScanState::SeekBlockStart => {
                if line.contains(start_marker) {
                    state = StepScanState::SeekStepStart;
                }
            }
            StepScanState::SeekStepStart => {
                if line.contains(end_marker) {
                    return Ok(BlockOutcome::Found(steps));
                }
                if line.trim().starts_with(STEP_HEADER) {
                    state = StepScanState::InStepAtoms;
                    step_line = idx + 1;
                    elements = Vec::new();
                    coords = Vec::new();
                }
            }
            StepScanState::InStepAtoms => {
                if line.contains(ENERGY_MARKER) {
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    let energy = parse_energy_token(&tokens, block, idx + 1)?;
                    steps.push(Step {
                        energy,
                        geometry: Geometry::new(
                            std::mem::take(&mut elements),
                            std::mem::take(&mut coords),
                        ),
                    });
                    state = StepScanState::SeekStepStart;
                } else if line.contains(end_marker) {
                    return Err(ParseError::Malformed {
                        block,
                        line: idx + 1,
                        reason: format!(
                            "section ends before the step at line {} reached its ENERGY line",
                            step_line
                        ),
                    });
                } else {
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    if let Some(first) = tokens.first() {
                        if ELEMENT_RE.is_match(first) {
                            push_atom(&tokens, block, idx + 1, &mut elements, &mut coords)?;
                        }
                    }
                }
            }
        }
    }

    match state {
        StepScanState::SeekBlockStart => Ok(BlockOutcome::NotFound),
        // Missing end sentinel between steps: keep what was collected.
        StepScanState::SeekStepStart => Ok(BlockOutcome::Found(steps)),
        StepScanState::InStepAtoms => Err(ParseError::Malformed {
            block,
            line: step_line,
            reason: "log ends before the step reached its ENERGY line".to_string(),
        }),
    }
}

/// Extract the energy value from a tokenized `ENERGY` line.
///
/// The energy is always the third whitespace token (`ENERGY = <value>`);
/// fewer than three tokens or a non-numeric third token is malformed.
fn parse_energy_token(tokens: &[&str], block: &'static str, line: usize) -> Result<f64> {
    let raw = tokens.get(2).ok_or_else(|| ParseError::Malformed {
        block,
        line,
        reason: "ENERGY line has fewer than three tokens".to_string(),
    })?;
    raw.parse().map_err(|_| ParseError::Malformed {
        block,
        line,
        reason: format!("invalid energy value \"{}\"", raw),
    })
}

/// Append one atom from a tokenized line whose first token is an element
/// symbol; tokens 2-4 are the x, y, z coordinates.
fn push_atom(
    tokens: &[&str],
    block: &'static str,
    line: usize,
    elements: &mut Vec<String>,
    coords: &mut Vec<f64>,
) -> Result<()> {
    if tokens.len() < 4 {
        return Err(ParseError::Malformed {
            block,
            line,
            reason: format!("atom line for \"{}\" has fewer than four tokens", tokens[0]),
        });
    }
    let mut xyz = [0.0_f64; 3];
    for (k, raw) in tokens[1..4].iter().enumerate() {
        xyz[k] = raw.parse().map_err(|_| ParseError::Malformed {
            block,
            line,
            reason: format!("invalid coordinate \"{}\"", raw),
        })?;
    }
    elements.push(tokens[0].to_string());
    coords.extend_from_slice(&xyz);
    Ok(())
}
