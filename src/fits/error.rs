use std::io;
use thiserror::Error;

/// Failures while reading the primary HDU of one file.
#[derive(Error, Debug)]
pub enum FitsReadError {
    #[error("I/O error while reading FITS file: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed FITS file: {0}")]
    Parse(String),

    #[error("FITS feature not supported by this reader: {0}")]
    Unsupported(String),

    #[error("Primary HDU has no data array (NAXIS = {}, axis lengths {axes:?})", .axes.len())]
    NoData { axes: Vec<usize> },
}
