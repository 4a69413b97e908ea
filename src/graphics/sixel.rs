//! Sixel encoder.
//!
//! Frames are quantized to the 6x6x6 color cube (216 registers) and
//! emitted band by band. Each band is six pixel rows tall; bands are
//! independent, so they are encoded in parallel and joined with the
//! sixel "next line" command.

use std::fmt::Write;

use image::RgbImage;
use rayon::prelude::*;

/// Levels per channel in the quantization cube.
const LEVELS: u16 = 6;
/// Number of palette registers used.
const PALETTE_SIZE: usize = 216;
/// Runs longer than this are emitted with the `!` repeat introducer.
const RLE_THRESHOLD: usize = 3;

/// Map an RGB color to its index in the 6x6x6 cube.
#[inline]
pub fn palette_index(r: u8, g: u8, b: u8) -> u8 {
    let level = |c: u8| (u16::from(c) * (LEVELS - 1) + 127) / 255;
    (level(r) * LEVELS * LEVELS + level(g) * LEVELS + level(b)) as u8
}

/// Encode an image as a complete sixel DCS sequence.
///
/// Returns an empty string for an empty image.
pub fn encode_sixel(img: &RgbImage) -> String {
    let (width, height) = (img.width() as usize, img.height() as usize);
    if width == 0 || height == 0 {
        return String::new();
    }

    let indices: Vec<u8> = img
        .pixels()
        .map(|p| palette_index(p[0], p[1], p[2]))
        .collect();

    let mut used = [false; PALETTE_SIZE];
    for &idx in &indices {
        used[idx as usize] = true;
    }

    let mut out = String::with_capacity(width * height / 2);
    // P2=1: untouched pixels keep the background
    let _ = write!(out, "\x1bP0;1q\"1;1;{};{}", width, height);

    for (idx, _) in used.iter().enumerate().filter(|(_, used)| **used) {
        let (r, g, b) = (idx / 36, (idx / 6) % 6, idx % 6);
        let _ = write!(out, "#{};2;{};{};{}", idx, r * 20, g * 20, b * 20);
    }

    let bands: Vec<String> = (0..height.div_ceil(6))
        .into_par_iter()
        .map(|band| encode_band(&indices, width, height, band))
        .collect();
    out.push_str(&bands.join("-"));

    out.push_str("\x1b\\");
    out
}

/// Encode one six-row band: one pass per color present in the band.
fn encode_band(indices: &[u8], width: usize, height: usize, band: usize) -> String {
    let y0 = band * 6;
    let rows = (height - y0).min(6);

    let mut present = [false; PALETTE_SIZE];
    for y in y0..y0 + rows {
        for &idx in &indices[y * width..(y + 1) * width] {
            present[idx as usize] = true;
        }
    }

    let mut out = String::new();
    let mut first = true;
    for color in (0..PALETTE_SIZE).filter(|&c| present[c]) {
        if !first {
            // graphics carriage return: overprint the same band
            out.push('$');
        }
        first = false;
        let _ = write!(out, "#{}", color);

        let mut run_char = 0u8;
        let mut run_len = 0usize;
        for x in 0..width {
            let mut bits = 0u8;
            for dy in 0..rows {
                if indices[(y0 + dy) * width + x] as usize == color {
                    bits |= 1 << dy;
                }
            }
            let ch = b'?' + bits;
            if ch == run_char {
                run_len += 1;
            } else {
                push_run(&mut out, run_char, run_len);
                run_char = ch;
                run_len = 1;
            }
        }
        // trailing empty columns carry no pixels
        if run_char != b'?' {
            push_run(&mut out, run_char, run_len);
        }
    }
    out
}

fn push_run(out: &mut String, ch: u8, len: usize) {
    if len == 0 {
        return;
    }
    if len > RLE_THRESHOLD {
        let _ = write!(out, "!{}{}", len, ch as char);
    } else {
        for _ in 0..len {
            out.push(ch as char);
        }
    }
}
