//! # Swatch Grid Renderer
//!
//! Draws a palette as a 16x16 grid of solid colour squares. The output is
//! itself an 8-bit indexed PNG whose pixel bytes are the palette indices,
//! so a rendered swatch sheet is a valid palette donor for `frompng`.

use crate::formats::hpl::HPL_MAX_COLOURS;
use crate::grid::{self, PALETTE_SQUARE_SIZE};
use crate::palette::{Palette, PaletteError, RGB_CHUNK};
use crate::png_bridge::IndexedPng;

pub const DEF_COLOUR_SQUARE_SIZE: u32 = 20;

/// Render all 256 grid cells as `colour_size` x `colour_size` squares.
/// Cells past the loaded colour count fall back to the zero colour of the
/// fixed-capacity buffer (transparent black).
pub fn render_swatch(palette: &Palette, colour_size: u32) -> Result<IndexedPng, PaletteError> {
    if palette.is_empty() {
        return Err(PaletteError::NotLoaded);
    }

    let side = colour_size * PALETTE_SQUARE_SIZE as u32;
    let mut pixels = vec![0u8; (side * side) as usize];

    for linear in 0..HPL_MAX_COLOURS {
        let (column, row) = grid::to_coordinate(linear)?;
        fill_square(
            &mut pixels,
            side,
            column as u32 * colour_size,
            row as u32 * colour_size,
            colour_size,
            linear as u8,
        );
    }

    let mut rgb = Vec::with_capacity(HPL_MAX_COLOURS * RGB_CHUNK);
    let mut alpha = Vec::with_capacity(HPL_MAX_COLOURS);
    for slot in 0..HPL_MAX_COLOURS {
        let colour = palette.entries().get(slot).copied().unwrap_or_default();
        rgb.extend_from_slice(&[colour.r, colour.g, colour.b]);
        alpha.push(colour.a);
    }

    Ok(IndexedPng {
        width: side,
        height: side,
        rgb,
        alpha,
        pixels,
    })
}

fn fill_square(pixels: &mut [u8], width: u32, x0: u32, y0: u32, size: u32, value: u8) {
    for y in y0..y0 + size {
        for x in x0..x0 + size {
            pixels[grid::pixel_offset(width, x, y)] = value;
        }
    }
}
