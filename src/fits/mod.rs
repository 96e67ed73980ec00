//! Reader for the primary HDU of FITS files.

pub mod error;
pub mod file;
pub mod header;
pub mod image;
pub mod primary;
pub mod utils;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::FitsReadError;
pub use file::FitsFile;
pub use header::{Card, CardValue, Header};
pub use image::ImageData;
pub use primary::{DataLayout, PrimaryHdu};
pub use utils::Bitpix;
