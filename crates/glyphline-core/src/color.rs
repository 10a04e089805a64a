//! Channel packing for 32 bpp pixels
//!
//! A 32 bpp word is `0xRRGGBBAA`; opaque pixels carry alpha 255.

#[inline]
fn channel(pixel: u32, index: u32) -> u8 {
    (pixel >> (24 - 8 * index)) as u8
}

/// Pack four channels into one word
#[inline]
pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_be_bytes([r, g, b, a])
}

/// Pack an opaque pixel
#[inline]
pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
    compose_rgba(r, g, b, 0xff)
}

/// Red, green and blue of a word, alpha dropped
#[inline]
pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
    (channel(pixel, 0), channel(pixel, 1), channel(pixel, 2))
}

#[inline]
pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
    let [r, g, b, a] = pixel.to_be_bytes();
    (r, g, b, a)
}

/// Gray level of an RGB triple with ITU-R 601-2 weights, truncated
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    (weighted / 1000) as u8
}
