//! Byte-level builders for FITS files used by unit tests.

use crate::fits::utils::{CARD_SIZE, FITS_BLOCK_SIZE};

fn padded_len(nbytes: usize) -> usize {
    nbytes.div_ceil(FITS_BLOCK_SIZE) * FITS_BLOCK_SIZE
}

pub fn card(s: &str) -> Vec<u8> {
    let mut buf = vec![b' '; CARD_SIZE];
    let b = s.as_bytes();
    let n = b.len().min(CARD_SIZE);
    buf[..n].copy_from_slice(&b[..n]);
    buf
}

pub fn keyword(key: &str, value: impl std::fmt::Display) -> String {
    format!("{key:<8}= {value:>20}")
}

/// Header unit holding `cards` followed by `END`, padded to a block.
pub fn header_bytes<S: AsRef<str>>(cards: &[S]) -> Vec<u8> {
    let mut out: Vec<u8> = cards.iter().flat_map(|c| card(c.as_ref())).collect();
    out.extend(card("END"));
    out.resize(padded_len(out.len()), b' ');
    out
}

/// Primary HDU with a `height` x `width` BITPIX=16 image whose pixels
/// count up from zero.
pub fn primary_i16<S: AsRef<str>>(width: usize, height: usize, extra: &[S]) -> Vec<u8> {
    let mut cards = vec![
        keyword("SIMPLE", "T"),
        keyword("BITPIX", 16),
        keyword("NAXIS", 2),
        keyword("NAXIS1", width),
        keyword("NAXIS2", height),
    ];
    cards.extend(extra.iter().map(|s| s.as_ref().to_string()));
    let mut out = header_bytes(&cards);
    let data: Vec<u8> = (0..width * height)
        .flat_map(|i| (i as i16).to_be_bytes())
        .collect();
    let start = out.len();
    out.extend(data);
    out.resize(start + padded_len(width * height * 2), 0);
    out
}
