//! Shape catalog and rotation tests

use tui_blockfall::core::{get_shape, PieceRandomizer, Shape};
use tui_blockfall::types::{PieceColor, PieceKind};

#[test]
fn test_catalog_matrices() {
    let expected: [(PieceKind, Vec<Vec<u8>>); 7] = [
        (PieceKind::I, vec![vec![1, 1, 1, 1]]),
        (PieceKind::T, vec![vec![1, 1, 1], vec![0, 1, 0]]),
        (PieceKind::L, vec![vec![1, 1, 1], vec![1, 0, 0]]),
        (PieceKind::J, vec![vec![1, 1, 1], vec![0, 0, 1]]),
        (PieceKind::S, vec![vec![0, 1, 1], vec![1, 1, 0]]),
        (PieceKind::O, vec![vec![1, 1], vec![1, 1]]),
        (PieceKind::Z, vec![vec![1, 1, 0], vec![0, 1, 1]]),
    ];

    for (kind, matrix) in expected {
        assert_eq!(get_shape(kind).to_matrix(), matrix, "{kind:?}");
    }
}

#[test]
fn test_every_shape_has_four_cells() {
    for kind in PieceKind::ALL {
        assert_eq!(get_shape(kind).cells().len(), 4, "{kind:?}");
    }
}

#[test]
fn test_rotate_t_clockwise() {
    let t = Shape::from_matrix(&[&[1, 1, 1], &[0, 1, 0]]);
    let rotated = t.rotated_cw();

    assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
    assert_eq!(rotated.to_matrix(), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
}

#[test]
fn test_four_rotations_return_to_start() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(back, shape, "{kind:?}");
    }
}

#[test]
fn test_rotation_keeps_cell_count() {
    let mut shape = get_shape(PieceKind::S);
    for _ in 0..4 {
        shape = shape.rotated_cw();
        assert_eq!(shape.cells().len(), 4);
    }
}

#[test]
fn test_randomizer_is_seeded() {
    let mut a = PieceRandomizer::new(77);
    let mut b = PieceRandomizer::new(77);
    let seq_a: Vec<(PieceKind, PieceColor)> = (0..50).map(|_| a.draw()).collect();
    let seq_b: Vec<(PieceKind, PieceColor)> = (0..50).map(|_| b.draw()).collect();
    assert_eq!(seq_a, seq_b);
}

#[test]
fn test_randomizer_covers_catalog_and_palette() {
    let mut rng = PieceRandomizer::new(5);
    let mut kinds = [0u32; 7];
    let mut colors = [0u32; 7];
    for _ in 0..7_000 {
        let (kind, color) = rng.draw();
        kinds[kind.index()] += 1;
        colors[PieceColor::ALL.iter().position(|c| *c == color).unwrap()] += 1;
    }
    assert!(kinds.iter().all(|&n| n > 700), "{kinds:?}");
    assert!(colors.iter().all(|&n| n > 700), "{colors:?}");
}
