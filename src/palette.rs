//! # Canonical Palette
//!
//! The in-memory, index-ordered RGBA palette that sits between the HPL
//! codec and the indexed PNG bridge. A palette starts out empty and is
//! populated wholesale by one of the load operations; entry reads and
//! writes on an empty palette fail with [`PaletteError::NotLoaded`].

use std::{fs, path::Path};

use thiserror::Error;

use crate::formats::hpl::{self, HPL_MAX_COLOURS};
use crate::grid;

/// Bytes per colour in an image-side RGB palette array.
pub const RGB_CHUNK: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("not an HPL palette: data does not start with the HPAL header")]
    BadHeader,
    #[error("HPL body length {0} is not a multiple of 4")]
    MisalignedBody(usize),
    #[error("a palette holds at most 256 colours, got {0}")]
    TooManyColours(usize),
    #[error("colour index {index} out of range (palette has {len} colours)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("grid coordinate ({0}, {1}) outside the 16x16 square")]
    CoordOutOfRange(usize, usize),
    #[error("RGB data length {rgb} does not match {alpha} alpha entries")]
    MismatchedAlpha { rgb: usize, alpha: usize },
    #[error("no palette loaded")]
    NotLoaded,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A palette entry addressed either linearly or by its cell in the 16x16
/// swatch grid.
#[derive(Clone, Copy, Debug)]
pub enum PaletteIndex {
    Linear(u8),
    Coord(usize, usize),
}

impl PaletteIndex {
    fn linear(self) -> Result<usize, PaletteError> {
        match self {
            PaletteIndex::Linear(index) => Ok(index as usize),
            PaletteIndex::Coord(column, row) => grid::to_linear(column, row),
        }
    }
}

#[derive(Debug, Default)]
pub struct Palette {
    colours: Vec<Rgba>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Borrowed view of the canonical buffer, in colour-index order.
    pub fn entries(&self) -> &[Rgba] {
        &self.colours
    }

    fn ensure_loaded(&self) -> Result<(), PaletteError> {
        if self.colours.is_empty() {
            return Err(PaletteError::NotLoaded);
        }
        Ok(())
    }

    fn resolve(&self, index: PaletteIndex) -> Result<usize, PaletteError> {
        let linear = index.linear()?;
        if linear >= self.colours.len() {
            return Err(PaletteError::IndexOutOfRange {
                index: linear,
                len: self.colours.len(),
            });
        }
        Ok(linear)
    }

    /// Replace the buffer with an already-canonical colour list.
    pub fn load_colours(&mut self, colours: Vec<Rgba>) -> Result<(), PaletteError> {
        if colours.len() > HPL_MAX_COLOURS {
            return Err(PaletteError::TooManyColours(colours.len()));
        }
        self.colours = colours;
        Ok(())
    }

    pub fn load_hpl_bytes(&mut self, data: &[u8]) -> Result<(), PaletteError> {
        self.colours = hpl::decode(data)?;
        Ok(())
    }

    pub fn save_hpl_bytes(&self) -> Result<Vec<u8>, PaletteError> {
        self.ensure_loaded()?;
        hpl::encode(&self.colours)
    }

    pub fn load_hpl(&mut self, path: &Path) -> Result<(), PaletteError> {
        let data = fs::read(path)?;
        self.load_hpl_bytes(&data)
    }

    pub fn save_hpl(&self, path: &Path) -> Result<(), PaletteError> {
        fs::write(path, self.save_hpl_bytes()?)?;
        Ok(())
    }

    /// Replace the buffer from an image-side palette: a flat RGB array and a
    /// parallel alpha array. Image palettes are already in canonical index
    /// order, so no reversal happens here.
    pub fn load_image_palette(&mut self, rgb: &[u8], alpha: &[u8]) -> Result<(), PaletteError> {
        if rgb.len() != alpha.len() * RGB_CHUNK {
            return Err(PaletteError::MismatchedAlpha {
                rgb: rgb.len(),
                alpha: alpha.len(),
            });
        }
        if alpha.len() > HPL_MAX_COLOURS {
            return Err(PaletteError::TooManyColours(alpha.len()));
        }
        self.colours = rgb
            .chunks_exact(RGB_CHUNK)
            .zip(alpha)
            .map(|(chunk, &a)| Rgba::new(chunk[0], chunk[1], chunk[2], a))
            .collect();
        Ok(())
    }

    /// De-interleave the buffer into the (RGB array, alpha array) pair the
    /// image side consumes.
    pub fn image_palette(&self) -> Result<(Vec<u8>, Vec<u8>), PaletteError> {
        self.ensure_loaded()?;
        let mut rgb = Vec::with_capacity(self.colours.len() * RGB_CHUNK);
        let mut alpha = Vec::with_capacity(self.colours.len());
        for colour in &self.colours {
            rgb.extend_from_slice(&[colour.r, colour.g, colour.b]);
            alpha.push(colour.a);
        }
        Ok((rgb, alpha))
    }

    pub fn colour(&self, index: PaletteIndex) -> Result<Rgba, PaletteError> {
        self.ensure_loaded()?;
        Ok(self.colours[self.resolve(index)?])
    }

    pub fn set_colour(&mut self, index: PaletteIndex, colour: Rgba) -> Result<(), PaletteError> {
        self.ensure_loaded()?;
        let linear = self.resolve(index)?;
        self.colours[linear] = colour;
        Ok(())
    }

    pub fn colour_range(&self, indices: &[PaletteIndex]) -> Result<Vec<Rgba>, PaletteError> {
        self.ensure_loaded()?;
        indices
            .iter()
            .map(|&index| Ok(self.colours[self.resolve(index)?]))
            .collect()
    }

    /// Batch write. All indices are validated before any entry is touched,
    /// so a bad update leaves the palette unchanged.
    pub fn set_colour_range(
        &mut self,
        updates: &[(PaletteIndex, Rgba)],
    ) -> Result<(), PaletteError> {
        self.ensure_loaded()?;
        let resolved = updates
            .iter()
            .map(|&(index, colour)| Ok((self.resolve(index)?, colour)))
            .collect::<Result<Vec<_>, PaletteError>>()?;
        for (linear, colour) in resolved {
            self.colours[linear] = colour;
        }
        Ok(())
    }
}
