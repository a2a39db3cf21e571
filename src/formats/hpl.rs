//! # HPL Palette Format
//!
//! Codec for the HPAL binary palette format. An HPL file is a fixed 32-byte
//! magic header followed by up to 256 colour groups of 4 bytes each. On disk
//! each group is stored (B, G, R, A) and the groups appear in *reverse*
//! palette order: the group for the highest colour index comes first, the
//! group for index 0 last.
//!
//! Decoding reverses the whole body in one step, which leaves every group
//! as (A, R, G, B) in ascending index order. Encoding mirrors that exactly,
//! so `decode(encode(p)) == p` and `encode(decode(b)) == b`.

use crate::palette::{PaletteError, Rgba};

pub const HPL_MAX_COLOURS: usize = 256;
pub const HPL_GROUP_SIZE: usize = 4;

/// Fixed magic header of every HPL file. Opaque beyond being a required prefix.
pub const HPAL_HEADER: [u8; 32] =
    *b"HPAL%\x01\x00\x00 \x04\x00\x00\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x01\x00\x00\x10\x00\x00\x00\x00";

/// Decode raw HPL bytes into an index-ordered RGBA palette.
pub fn decode(data: &[u8]) -> Result<Vec<Rgba>, PaletteError> {
    let body = data
        .strip_prefix(HPAL_HEADER.as_slice())
        .ok_or(PaletteError::BadHeader)?;

    if body.len() % HPL_GROUP_SIZE != 0 {
        return Err(PaletteError::MisalignedBody(body.len()));
    }

    let count = body.len() / HPL_GROUP_SIZE;
    if count > HPL_MAX_COLOURS {
        return Err(PaletteError::TooManyColours(count));
    }

    let mut reversed = body.to_vec();
    reversed.reverse();

    Ok(reversed
        .chunks_exact(HPL_GROUP_SIZE)
        .map(|group| Rgba {
            r: group[1],
            g: group[2],
            b: group[3],
            a: group[0],
        })
        .collect())
}

/// Encode an index-ordered RGBA palette into raw HPL bytes.
pub fn encode(colours: &[Rgba]) -> Result<Vec<u8>, PaletteError> {
    if colours.len() > HPL_MAX_COLOURS {
        return Err(PaletteError::TooManyColours(colours.len()));
    }

    let mut body = Vec::with_capacity(colours.len() * HPL_GROUP_SIZE);
    for colour in colours {
        body.extend_from_slice(&[colour.a, colour.r, colour.g, colour.b]);
    }
    body.reverse();

    let mut out = Vec::with_capacity(HPAL_HEADER.len() + body.len());
    out.extend_from_slice(&HPAL_HEADER);
    out.extend_from_slice(&body);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_palette(count: usize) -> Vec<Rgba> {
        (0..count)
            .map(|i| Rgba::new(i as u8, (i / 2) as u8, 255 - i as u8, 0x80 | i as u8))
            .collect()
    }

    #[test]
    fn single_entry_byte_layout() {
        let bytes = encode(&[Rgba::new(1, 2, 3, 4)]).unwrap();
        assert_eq!(&bytes[..32], HPAL_HEADER.as_slice());
        // On disk: B, G, R, A.
        assert_eq!(&bytes[32..], &[3, 2, 1, 4]);
    }

    #[test]
    fn groups_stored_in_reverse_index_order() {
        let bytes = encode(&[Rgba::new(1, 2, 3, 4), Rgba::new(5, 6, 7, 8)]).unwrap();
        assert_eq!(&bytes[32..36], &[7, 6, 5, 8]);
        assert_eq!(&bytes[36..40], &[3, 2, 1, 4]);
    }

    #[test]
    fn decode_encode_round_trip() {
        for count in [1, 2, 16, 255, 256] {
            let palette = sample_palette(count);
            let decoded = decode(&encode(&palette).unwrap()).unwrap();
            assert_eq!(decoded, palette);
        }
    }

    #[test]
    fn encode_decode_round_trip() {
        let mut bytes = HPAL_HEADER.to_vec();
        for i in 0..64u8 {
            bytes.extend_from_slice(&[i, i.wrapping_mul(3), 255 - i, 0xFF]);
        }
        let round_tripped = encode(&decode(&bytes).unwrap()).unwrap();
        assert_eq!(round_tripped, bytes);
    }

    #[test]
    fn empty_body_is_an_empty_palette() {
        assert_eq!(decode(&HPAL_HEADER).unwrap(), vec![]);
        assert_eq!(encode(&[]).unwrap(), HPAL_HEADER.to_vec());
    }

    #[test]
    fn rejects_missing_header() {
        let mut bytes = HPAL_HEADER.to_vec();
        bytes[0] = b'X';
        assert!(matches!(decode(&bytes), Err(PaletteError::BadHeader)));
        assert!(matches!(decode(b"short"), Err(PaletteError::BadHeader)));
    }

    #[test]
    fn rejects_misaligned_body() {
        let mut bytes = HPAL_HEADER.to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        assert!(matches!(
            decode(&bytes),
            Err(PaletteError::MisalignedBody(3))
        ));
    }

    #[test]
    fn rejects_more_than_256_groups() {
        let mut bytes = HPAL_HEADER.to_vec();
        bytes.extend(std::iter::repeat(0u8).take(257 * HPL_GROUP_SIZE));
        assert!(matches!(
            decode(&bytes),
            Err(PaletteError::TooManyColours(257))
        ));

        let palette = sample_palette(256);
        let mut oversized = palette.clone();
        oversized.push(Rgba::default());
        assert!(matches!(
            encode(&oversized),
            Err(PaletteError::TooManyColours(257))
        ));
    }
}
