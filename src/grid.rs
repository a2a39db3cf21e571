//! # Palette Grid
//!
//! Pure arithmetic between a linear palette index and its cell in the fixed
//! 16x16 swatch grid, plus the byte-offset maths for indexed pixel data.

use crate::palette::PaletteError;

pub const PALETTE_SQUARE_SIZE: usize = 16;

const LINEAR_CAPACITY: usize = PALETTE_SQUARE_SIZE * PALETTE_SQUARE_SIZE;

/// Grid cell (column, row) of a linear palette index.
pub fn to_coordinate(linear: usize) -> Result<(usize, usize), PaletteError> {
    if linear >= LINEAR_CAPACITY {
        return Err(PaletteError::IndexOutOfRange {
            index: linear,
            len: LINEAR_CAPACITY,
        });
    }
    Ok((linear % PALETTE_SQUARE_SIZE, linear / PALETTE_SQUARE_SIZE))
}

/// Linear palette index of a grid cell.
pub fn to_linear(column: usize, row: usize) -> Result<usize, PaletteError> {
    if column >= PALETTE_SQUARE_SIZE || row >= PALETTE_SQUARE_SIZE {
        return Err(PaletteError::CoordOutOfRange(column, row));
    }
    Ok(row * PALETTE_SQUARE_SIZE + column)
}

/// Byte offset of pixel (x, y) in a row-major indexed pixel array.
pub fn pixel_offset(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Pixel (x, y) of a byte offset in a row-major indexed pixel array.
pub fn offset_to_pixel(width: u32, offset: usize) -> (u32, u32) {
    ((offset % width as usize) as u32, (offset / width as usize) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_coordinate_bijection() {
        for linear in 0..LINEAR_CAPACITY {
            let (column, row) = to_coordinate(linear).unwrap();
            assert_eq!(to_linear(column, row).unwrap(), linear);
        }
        for row in 0..PALETTE_SQUARE_SIZE {
            for column in 0..PALETTE_SQUARE_SIZE {
                let linear = to_linear(column, row).unwrap();
                assert_eq!(to_coordinate(linear).unwrap(), (column, row));
            }
        }
    }

    #[test]
    fn known_cells() {
        assert_eq!(to_coordinate(0).unwrap(), (0, 0));
        assert_eq!(to_coordinate(15).unwrap(), (15, 0));
        assert_eq!(to_coordinate(16).unwrap(), (0, 1));
        assert_eq!(to_coordinate(255).unwrap(), (15, 15));
    }

    #[test]
    fn rejects_out_of_domain_inputs() {
        assert!(matches!(
            to_coordinate(256),
            Err(PaletteError::IndexOutOfRange { index: 256, .. })
        ));
        assert!(matches!(
            to_linear(16, 0),
            Err(PaletteError::CoordOutOfRange(16, 0))
        ));
        assert!(matches!(
            to_linear(0, 16),
            Err(PaletteError::CoordOutOfRange(0, 16))
        ));
    }

    #[test]
    fn pixel_offset_round_trip() {
        assert_eq!(pixel_offset(40, 0, 0), 0);
        assert_eq!(pixel_offset(40, 39, 1), 79);
        for offset in [0usize, 1, 39, 40, 1599] {
            let (x, y) = offset_to_pixel(40, offset);
            assert_eq!(pixel_offset(40, x, y), offset);
        }
    }
}
