#![allow(dead_code)]

use std::path::Path;

const BLOCK: usize = 2880;

fn pad(out: &mut Vec<u8>, fill: u8) {
    let len = out.len().div_ceil(BLOCK) * BLOCK;
    out.resize(len, fill);
}

fn card(out: &mut Vec<u8>, s: &str) {
    let mut buf = [b' '; 80];
    buf[..s.len()].copy_from_slice(s.as_bytes());
    out.extend_from_slice(&buf);
}

/// Writes a single-HDU FITS file holding a `height` x `width` BITPIX=16
/// image filled with `fill`, plus the given `(keyword, value)` cards.
pub fn write_fit(path: &Path, width: usize, height: usize, fill: i16, cards: &[(&str, &str)]) {
    let mut out = Vec::new();
    card(&mut out, &format!("{:<8}= {:>20}", "SIMPLE", "T"));
    card(&mut out, &format!("{:<8}= {:>20}", "BITPIX", 16));
    card(&mut out, &format!("{:<8}= {:>20}", "NAXIS", 2));
    card(&mut out, &format!("{:<8}= {:>20}", "NAXIS1", width));
    card(&mut out, &format!("{:<8}= {:>20}", "NAXIS2", height));
    for (key, value) in cards {
        card(&mut out, &format!("{key:<8}= {value:>20}"));
    }
    card(&mut out, "END");
    pad(&mut out, b' ');
    for _ in 0..width * height {
        out.extend_from_slice(&fill.to_be_bytes());
    }
    pad(&mut out, 0);
    std::fs::write(path, out).expect("write fixture");
}

pub fn write_garbage(path: &Path) {
    std::fs::write(path, b"this is not a FITS file").expect("write fixture");
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
