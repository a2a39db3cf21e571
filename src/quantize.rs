//! # Palette Extraction
//!
//! Builds a palette from truecolour pixels by collecting unique colours in
//! first-seen order, for source PNGs that carry no PLTE chunk. Fails as
//! soon as a 257th colour turns up.

use std::collections::HashMap;

use image::RgbaImage;

use crate::formats::hpl::HPL_MAX_COLOURS;
use crate::palette::{PaletteError, Rgba};

pub struct ExtractedPalette {
    pub colours: Vec<Rgba>,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
}

pub fn palette_from_rgba(img: &RgbaImage) -> Result<ExtractedPalette, PaletteError> {
    let mut seen: HashMap<[u8; 4], u8> = HashMap::new();
    let mut colours = Vec::new();
    let mut indices = Vec::with_capacity((img.width() * img.height()) as usize);

    for pixel in img.pixels() {
        if let Some(&index) = seen.get(&pixel.0) {
            indices.push(index);
        } else {
            if colours.len() >= HPL_MAX_COLOURS {
                return Err(PaletteError::TooManyColours(colours.len() + 1));
            }
            let index = colours.len() as u8;
            let [r, g, b, a] = pixel.0;
            colours.push(Rgba::new(r, g, b, a));
            seen.insert(pixel.0, index);
            indices.push(index);
        }
    }

    Ok(ExtractedPalette { colours, indices })
}
