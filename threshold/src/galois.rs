//! Galois elements of the slot rotations.
//!
//! Batched plaintexts of degree n are laid out as a 2 x n/2 matrix of slots.
//! X -> X^(g^k) rotates both rows by k columns, X -> X^(2n-1) swaps the rows.

use num_integer::{ExtendedGcd, Integer};

/// Generator of the cyclic column-rotation subgroup of (Z/2nZ)^*.
pub const GALOIS_GENERATOR: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

/// Selects the automorphism a rotation key is generated for.
/// Column amounts are taken modulo n/2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rotation {
    ColumnLeft(usize),
    ColumnRight(usize),
    Row,
}

pub struct GaloisIndexTable {
    n: usize,
    generator_inv: usize,
    col_left: Vec<usize>,
    col_right: Vec<usize>,
    row: usize,
}

impl GaloisIndexTable {
    pub fn new(n: usize) -> Self {
        assert!(
            n & (n - 1) == 0 && n >= 4,
            "invalid argument n: n={} is not a power of two >= 4",
            n
        );

        let nth_root: usize = n << 1;
        let mask: usize = nth_root - 1;

        let egcd: ExtendedGcd<i64> = (GALOIS_GENERATOR as i64).extended_gcd(&(nth_root as i64));
        assert_eq!(egcd.gcd, 1, "generator {} not invertible mod {}", GALOIS_GENERATOR, nth_root);
        let generator_inv: usize = egcd.x.rem_euclid(nth_root as i64) as usize;

        let slots: usize = n >> 1;

        let mut col_left: Vec<usize> = vec![1; slots];
        let mut col_right: Vec<usize> = vec![1; slots];

        for i in 1..slots {
            col_left[i] = (col_left[i - 1] * GALOIS_GENERATOR) & mask;
            col_right[i] = (col_right[i - 1] * generator_inv) & mask;
        }

        Self {
            n,
            generator_inv,
            col_left,
            col_right,
            row: nth_root - 1,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn generator(&self) -> usize {
        GALOIS_GENERATOR
    }

    /// Returns g^-1 mod 2n.
    pub fn generator_inv(&self) -> usize {
        self.generator_inv
    }

    /// Maps a column rotation amount into [0, n/2).
    #[inline(always)]
    pub fn mask(&self, k: usize) -> usize {
        k & ((self.n >> 1) - 1)
    }

    pub fn element_for_column(&self, k: usize, direction: Direction) -> usize {
        match direction {
            Direction::Left => self.col_left[self.mask(k)],
            Direction::Right => self.col_right[self.mask(k)],
        }
    }

    pub fn element_for_row(&self) -> usize {
        self.row
    }

    pub fn galois_element(&self, rotation: Rotation) -> usize {
        match rotation {
            Rotation::ColumnLeft(k) => self.element_for_column(k, Direction::Left),
            Rotation::ColumnRight(k) => self.element_for_column(k, Direction::Right),
            Rotation::Row => self.element_for_row(),
        }
    }

    /// Returns the rotation realized by gal_el, if any.
    /// Column elements resolve to a left rotation, since g^k = g^-(n/2-k).
    pub fn rotation_for_element(&self, gal_el: usize) -> Option<Rotation> {
        if gal_el == self.row {
            return Some(Rotation::Row);
        }
        self.col_left
            .iter()
            .position(|el| *el == gal_el)
            .map(Rotation::ColumnLeft)
    }

    /// Returns the rotation with its amount masked into [0, n/2).
    pub fn masked(&self, rotation: Rotation) -> Rotation {
        match rotation {
            Rotation::ColumnLeft(k) => Rotation::ColumnLeft(self.mask(k)),
            Rotation::ColumnRight(k) => Rotation::ColumnRight(self.mask(k)),
            Rotation::Row => Rotation::Row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_inverse() {
        [4usize, 8, 1 << 10, 1 << 16].iter().for_each(|n| {
            let table: GaloisIndexTable = GaloisIndexTable::new(*n);
            assert_eq!((table.generator() * table.generator_inv()) % (2 * n), 1);
        });
        assert_eq!(GaloisIndexTable::new(8).generator_inv(), 13);
    }

    #[test]
    fn tables_n8() {
        let table: GaloisIndexTable = GaloisIndexTable::new(8);
        assert_eq!(table.col_left, vec![1, 5, 9, 13]);
        assert_eq!(table.col_right, vec![1, 13, 9, 5]);
        assert_eq!(table.element_for_row(), 15);
    }

    #[test]
    fn amounts_are_masked() {
        let n: usize = 64;
        let table: GaloisIndexTable = GaloisIndexTable::new(n);
        (0..n).for_each(|k| {
            assert_eq!(
                table.element_for_column(k, Direction::Left),
                table.element_for_column(k + n / 2, Direction::Left)
            );
            assert_eq!(
                table.element_for_column(k, Direction::Right),
                table.element_for_column(k + n / 2, Direction::Right)
            );
        });
        assert_eq!(table.masked(Rotation::ColumnRight(n / 2 + 3)), Rotation::ColumnRight(3));
    }

    #[test]
    fn left_right_are_inverse() {
        let n: usize = 256;
        let table: GaloisIndexTable = GaloisIndexTable::new(n);
        (0..n / 2).for_each(|k| {
            let l: usize = table.element_for_column(k, Direction::Left);
            let r: usize = table.element_for_column(k, Direction::Right);
            assert_eq!((l * r) % (2 * n), 1);
        });
    }

    #[test]
    fn column_elements_are_distinct() {
        let n: usize = 128;
        let table: GaloisIndexTable = GaloisIndexTable::new(n);
        let mut elements: Vec<usize> = table.col_left.clone();
        elements.sort();
        elements.dedup();
        assert_eq!(elements.len(), n / 2);
        assert!(!elements.contains(&table.element_for_row()));
    }

    #[test]
    fn inverse_lookup() {
        let table: GaloisIndexTable = GaloisIndexTable::new(16);
        assert_eq!(table.rotation_for_element(31), Some(Rotation::Row));
        assert_eq!(table.rotation_for_element(5), Some(Rotation::ColumnLeft(1)));
        assert_eq!(table.rotation_for_element(1), Some(Rotation::ColumnLeft(0)));
        let right_one: usize = table.galois_element(Rotation::ColumnRight(1));
        assert_eq!(table.rotation_for_element(right_one), Some(Rotation::ColumnLeft(7)));
        assert_eq!(table.rotation_for_element(3), None);
        assert_eq!(table.rotation_for_element(4), None);
    }
}
