//! Core geometry data structures for molecular structures along an IRC path.
//!
//! This module provides the fundamental data types shared by the log parser
//! and the trajectory writer:
//!
//! - [`Geometry`]: Molecular structure with element symbols and Cartesian coordinates
//! - [`Step`]: One point along the reaction path, an (energy, geometry) pair
//!
//! Coordinates are in Angstroms and energies are in the log's native unit
//! (Hartree for GRRM); both are carried verbatim with no unit conversion.

use nalgebra::DVector;

/// Represents a molecular geometry with atomic elements and Cartesian coordinates.
///
/// The `Geometry` struct stores the chemical elements of each atom and their
/// 3D positions. It uses a flat representation where coordinates are stored as
/// a single-dimensional vector in the order [x1, y1, z1, x2, y2, z2, ...].
///
/// Atom order is insertion order as encountered in the source log and is
/// never reordered: the same index refers to the same atom across every frame
/// of a trajectory.
///
/// # Examples
///
/// ```
/// use irc2xyz::geometry::Geometry;
///
/// let elements = vec![
///     "O".to_string(),
///     "H".to_string(),
///     "H".to_string(),
/// ];
/// let coords = vec![
///     0.0, 0.0, 0.0,        // O at origin
///     0.757, 0.586, 0.0,    // H1
///     -0.757, 0.586, 0.0,   // H2
/// ];
///
/// let geometry = Geometry::new(elements, coords);
/// assert_eq!(geometry.num_atoms, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Chemical element symbols for each atom in order
    pub elements: Vec<String>,
    /// Flattened Cartesian coordinates [x1, y1, z1, x2, y2, z2, ...] in Angstroms
    pub coords: DVector<f64>,
    /// Number of atoms in the molecule
    pub num_atoms: usize,
}

impl Geometry {
    /// Create a new `Geometry` from element list and coordinate vector.
    ///
    /// # Arguments
    ///
    /// * `elements` - Vector of element symbols (e.g., "C", "H", "O")
    /// * `coords` - Flattened coordinate vector of length 3 × num_atoms
    ///
    /// # Panics
    ///
    /// Panics if `coords.len() != elements.len() * 3`, ensuring data consistency.
    pub fn new(elements: Vec<String>, coords: Vec<f64>) -> Self {
        let num_atoms = elements.len();
        assert_eq!(coords.len(), num_atoms * 3);
        Self {
            elements,
            coords: DVector::from_vec(coords),
            num_atoms,
        }
    }

    /// Get the Cartesian coordinates of a specific atom.
    ///
    /// # Arguments
    ///
    /// * `atom_idx` - Zero-based index of the atom (0 = first atom)
    ///
    /// # Returns
    ///
    /// Array of three coordinates [x, y, z] in Angstroms.
    ///
    /// # Examples
    ///
    /// ```
    /// use irc2xyz::geometry::Geometry;
    ///
    /// let elements = vec!["O".to_string(), "H".to_string(), "H".to_string()];
    /// let coords = vec![0.0, 0.0, 0.0, 0.757, 0.586, 0.0, -0.757, 0.586, 0.0];
    /// let geometry = Geometry::new(elements, coords);
    ///
    /// assert_eq!(geometry.get_atom_coords(0), [0.0, 0.0, 0.0]);
    /// assert_eq!(geometry.get_atom_coords(1), [0.757, 0.586, 0.0]);
    /// ```
    pub fn get_atom_coords(&self, atom_idx: usize) -> [f64; 3] {
        let i = atom_idx * 3;
        [self.coords[i], self.coords[i + 1], self.coords[i + 2]]
    }
}

/// One point along the reaction path: a scalar energy paired with the
/// geometry at which it was evaluated.
///
/// The energy is taken from the log's `ENERGY` line verbatim, in the log's
/// native unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Potential energy at this point of the path
    pub energy: f64,
    /// Molecular geometry at this point of the path
    pub geometry: Geometry,
}
