use crate::fits::error::FitsReadError;

pub const FITS_BLOCK_SIZE: usize = 2880;
pub const CARD_SIZE: usize = 80;

/// Pixel encoding of a data unit, keyed by the `BITPIX` card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitpix {
    U8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl Bitpix {
    pub fn from_value(bitpix: i64) -> Result<Self, FitsReadError> {
        match bitpix {
            8 => Ok(Bitpix::U8),
            16 => Ok(Bitpix::I16),
            32 => Ok(Bitpix::I32),
            64 => Ok(Bitpix::I64),
            -32 => Ok(Bitpix::F32),
            -64 => Ok(Bitpix::F64),
            other => Err(FitsReadError::Unsupported(format!("BITPIX = {other}"))),
        }
    }

    pub fn nbytes(self) -> usize {
        match self {
            Bitpix::U8 => 1,
            Bitpix::I16 => 2,
            Bitpix::I32 | Bitpix::F32 => 4,
            Bitpix::I64 | Bitpix::F64 => 8,
        }
    }
}
