//! Pieces module - the piece catalog
//!
//! Each kind has a fixed, ordered list of rotation masks. Rotating steps to the
//! next mask in the list (modulo its length); there are no wall kicks.
//!
//! | Kind | Rotation states | Mask size |
//! |------|-----------------|-----------|
//! | I | 4 | 4x4 |
//! | O | 1 | 2x2 |
//! | T, J, L | 4 | 3x3 |
//! | S, Z | 2 | 3x3 |

use arrayvec::ArrayVec;

use crate::rng::RandomSource;
use crate::types::PieceKind;

/// Offset of a single occupied cell relative to the mask origin: (dx, dy)
pub type MinoOffset = (i32, i32);

/// Square occupancy mask of one rotation state (at most 4x4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask {
    size: u8,
    rows: [[u8; 4]; 4],
}

impl Mask {
    const fn new(size: u8, rows: [[u8; 4]; 4]) -> Self {
        Self { size, rows }
    }

    /// Side length of the square mask
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the cell at column `dx`, row `dy` is occupied
    pub fn is_filled(&self, dx: usize, dy: usize) -> bool {
        dx < self.size() && dy < self.size() && self.rows[dy][dx] != 0
    }

    /// Occupied cells in row-major order
    pub fn cells(&self) -> ArrayVec<MinoOffset, 16> {
        let mut out = ArrayVec::new();
        for dy in 0..self.size() {
            for dx in 0..self.size() {
                if self.rows[dy][dx] != 0 {
                    out.push((dx as i32, dy as i32));
                }
            }
        }
        out
    }
}

const I_ROTATIONS: [Mask; 4] = [
    Mask::new(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new(4, [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
    Mask::new(4, [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]]),
    Mask::new(4, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
];

const O_ROTATIONS: [Mask; 1] = [Mask::new(
    2,
    [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
)];

const T_ROTATIONS: [Mask; 4] = [
    Mask::new(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
];

const S_ROTATIONS: [Mask; 2] = [
    Mask::new(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]]),
];

const Z_ROTATIONS: [Mask; 2] = [
    Mask::new(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
];

const J_ROTATIONS: [Mask; 4] = [
    Mask::new(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
];

const L_ROTATIONS: [Mask; 4] = [
    Mask::new(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]]),
    Mask::new(3, [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
];

/// All rotation states of a kind, in rotation order
pub fn rotations(kind: PieceKind) -> &'static [Mask] {
    match kind {
        PieceKind::I => &I_ROTATIONS,
        PieceKind::O => &O_ROTATIONS,
        PieceKind::T => &T_ROTATIONS,
        PieceKind::S => &S_ROTATIONS,
        PieceKind::Z => &Z_ROTATIONS,
        PieceKind::J => &J_ROTATIONS,
        PieceKind::L => &L_ROTATIONS,
    }
}

/// Number of distinct rotation states (always >= 1)
pub fn rotation_count(kind: PieceKind) -> usize {
    rotations(kind).len()
}

/// Mask for a rotation index, taken modulo the rotation count
pub fn rotation_shape(kind: PieceKind, rotation: usize) -> &'static Mask {
    let states = rotations(kind);
    &states[rotation % states.len()]
}

/// Uniform draw over the seven kinds
pub fn random_kind(rng: &mut impl RandomSource) -> PieceKind {
    let idx = rng.next_below(PieceKind::ALL.len() as u32) as usize;
    PieceKind::ALL[idx % PieceKind::ALL.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;

    #[test]
    fn test_rotation_counts() {
        assert_eq!(rotation_count(PieceKind::I), 4);
        assert_eq!(rotation_count(PieceKind::O), 1);
        assert_eq!(rotation_count(PieceKind::T), 4);
        assert_eq!(rotation_count(PieceKind::S), 2);
        assert_eq!(rotation_count(PieceKind::Z), 2);
        assert_eq!(rotation_count(PieceKind::J), 4);
        assert_eq!(rotation_count(PieceKind::L), 4);
    }

    #[test]
    fn test_every_mask_has_four_cells() {
        for kind in PieceKind::ALL {
            for mask in rotations(kind) {
                assert_eq!(mask.cells().len(), 4, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_rotation_index_wraps() {
        assert_eq!(
            rotation_shape(PieceKind::S, 2),
            rotation_shape(PieceKind::S, 0)
        );
        assert_eq!(
            rotation_shape(PieceKind::O, 3),
            rotation_shape(PieceKind::O, 0)
        );
        assert_eq!(
            rotation_shape(PieceKind::T, 5),
            rotation_shape(PieceKind::T, 1)
        );
    }

    #[test]
    fn test_i_shape_cells() {
        let mask = rotation_shape(PieceKind::I, 0);
        assert_eq!(mask.size(), 4);
        assert_eq!(mask.cells().as_slice(), &[(0, 1), (1, 1), (2, 1), (3, 1)]);

        let vertical = rotation_shape(PieceKind::I, 1);
        assert_eq!(
            vertical.cells().as_slice(),
            &[(2, 0), (2, 1), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn test_o_shape_is_two_by_two() {
        let mask = rotation_shape(PieceKind::O, 0);
        assert_eq!(mask.size(), 2);
        assert!(mask.is_filled(1, 1));
        assert!(!mask.is_filled(2, 0));
    }

    #[test]
    fn test_random_kind_follows_source() {
        let mut seq = SequenceSource::new(vec![0, 1, 6, 13]);
        assert_eq!(random_kind(&mut seq), PieceKind::I);
        assert_eq!(random_kind(&mut seq), PieceKind::O);
        assert_eq!(random_kind(&mut seq), PieceKind::L);
        assert_eq!(random_kind(&mut seq), PieceKind::L);
    }
}
