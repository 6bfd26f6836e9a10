//! Shapes module - piece matrices and rotation
//!
//! A shape is a small 0/1 matrix giving the occupied cells of a piece relative
//! to its own bounding box. The catalog holds seven read-only templates;
//! rotating returns a new matrix and never touches the catalog.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest bounding box edge of any catalog shape, in any orientation
pub const MAX_SHAPE_DIM: usize = 4;

/// Offset of a single occupied cell from the shape's top-left corner: (row, col)
pub type CellOffset = (i16, i16);

/// Occupied cell offsets of a shape (at most 4x4 of them)
pub type ShapeCells = ArrayVec<CellOffset, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// An immutable 0/1 matrix of up to 4x4 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from its top-left `rows x cols` corner of `bits`.
    /// Anything outside that window must be zero.
    pub const fn new(rows: u8, cols: u8, bits: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Self {
        Self { rows, cols, bits }
    }

    /// Build a shape from matrix rows.
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let t = Shape::from_matrix(&[&[1, 1, 1], &[0, 1, 0]]);
    /// assert_eq!((t.rows(), t.cols()), (2, 3));
    /// ```
    pub fn from_matrix(matrix: &[&[u8]]) -> Self {
        assert!(!matrix.is_empty() && matrix.len() <= MAX_SHAPE_DIM, "bad shape height");
        let cols = matrix[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_DIM, "bad shape width");

        let mut bits = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in matrix.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged shape matrix");
            for (c, &v) in row.iter().enumerate() {
                bits[r][c] = (v != 0) as u8;
            }
        }
        Self::new(matrix.len() as u8, cols as u8, bits)
    }

    /// Height of the bounding box
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Width of the bounding box (the length of the first matrix row)
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Offsets of all filled cells, row by row
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                if self.bits[r][c] != 0 {
                    out.push((r as i16, c as i16));
                }
            }
        }
        out
    }

    /// Matrix rows as vectors (for tests and debugging)
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|r| self.bits[r][..self.cols()].to_vec())
            .collect()
    }

    /// Rotate 90° clockwise.
    ///
    /// Row `i` of the result is column `i` of this matrix read bottom to top,
    /// so an `r x c` shape becomes `c x r`.
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let t = Shape::from_matrix(&[&[1, 1, 1], &[0, 1, 0]]);
    /// assert_eq!(t.rotated_cw().to_matrix(), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
    /// ```
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows();
        let cols = self.cols();
        let mut bits = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, out_row) in bits.iter_mut().enumerate().take(cols) {
            for (j, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.bits[rows - 1 - j][i];
            }
        }
        Self::new(self.cols, self.rows, bits)
    }
}

const I_SHAPE: Shape = Shape::new(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const T_SHAPE: Shape = Shape::new(2, 3, [[1, 1, 1, 0], [0, 1, 0, 0], [0; 4], [0; 4]]);
const L_SHAPE: Shape = Shape::new(2, 3, [[1, 1, 1, 0], [1, 0, 0, 0], [0; 4], [0; 4]]);
const J_SHAPE: Shape = Shape::new(2, 3, [[1, 1, 1, 0], [0, 0, 1, 0], [0; 4], [0; 4]]);
const S_SHAPE: Shape = Shape::new(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const O_SHAPE: Shape = Shape::new(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Shape = Shape::new(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);

/// Catalog template for a piece kind, in spawn orientation
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_four_cells_each() {
        for kind in PieceKind::ALL {
            assert_eq!(get_shape(kind).cells().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_i_rotates_to_vertical() {
        let v = get_shape(PieceKind::I).rotated_cw();
        assert_eq!((v.rows(), v.cols()), (4, 1));
        assert_eq!(v.cells().as_slice(), &[(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in PieceKind::ALL {
            let s = get_shape(kind);
            let back = s.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, s, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotation_leaves_catalog_alone() {
        let before = get_shape(PieceKind::S);
        let _ = before.rotated_cw();
        assert_eq!(get_shape(PieceKind::S), before);
    }

    #[test]
    fn test_l_rotation() {
        // [[1,1,1],[1,0,0]] -> [[1,1],[0,1],[0,1]]
        let r = get_shape(PieceKind::L).rotated_cw();
        assert_eq!(r.to_matrix(), vec![vec![1, 1], vec![0, 1], vec![0, 1]]);
    }
}
