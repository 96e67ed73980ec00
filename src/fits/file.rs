use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::fits::error::FitsReadError;
use crate::fits::header::Header;
use crate::fits::image::ImageData;
use crate::fits::primary::PrimaryHdu;

/// A FITS file opened by path. The OS handle is released before `open`
/// returns; only the decoded primary HDU is kept.
#[derive(Debug, Clone)]
pub struct FitsFile {
    primary: PrimaryHdu,
}

impl FitsFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FitsReadError> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);
        let primary = PrimaryHdu::read_from_file(&mut reader)?;
        Ok(FitsFile { primary })
    }

    /// Reads only the primary header, skipping the data unit entirely.
    pub fn open_header(path: impl AsRef<Path>) -> Result<Header, FitsReadError> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);
        PrimaryHdu::read_header(&mut reader)
    }

    pub fn into_data(self) -> Result<ImageData, FitsReadError> {
        self.primary.into_data()
    }
}
