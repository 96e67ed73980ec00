use ndarray::{ArrayD, IxDyn};

use crate::fits::error::FitsReadError;
use crate::fits::utils::Bitpix;

/// Primary data array with `BSCALE`/`BZERO` applied.
///
/// Axes are ordered slowest first, so a 2-D image is `[NAXIS2, NAXIS1]`
/// (rows, columns). Unscaled data keeps its stored type; the unsigned
/// offset conventions (`BZERO = 2^(n-1)`, `BSCALE = 1`) yield the unsigned
/// variants and `BZERO = -128` on bytes yields `I8`; any other scaling
/// yields `F32` for 8/16-bit and single precision data, `F64` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    U8(ArrayD<u8>),
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    U16(ArrayD<u16>),
    I32(ArrayD<i32>),
    U32(ArrayD<u32>),
    I64(ArrayD<i64>),
    U64(ArrayD<u64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

fn decode<T, F, const N: usize>(
    bytes: &[u8],
    shape: &[usize],
    from_be: F,
) -> Result<ArrayD<T>, FitsReadError>
where
    F: Fn([u8; N]) -> T,
{
    let values = bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            from_be(raw)
        })
        .collect();
    ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|e| {
        FitsReadError::Parse(format!("data unit does not fit shape {shape:?}: {e}"))
    })
}

impl ImageData {
    /// Decodes big-endian stored pixel bytes into an array of `shape`.
    pub fn decode(bitpix: Bitpix, shape: &[usize], bytes: &[u8]) -> Result<Self, FitsReadError> {
        Ok(match bitpix {
            Bitpix::U8 => ImageData::U8(decode(bytes, shape, u8::from_be_bytes)?),
            Bitpix::I16 => ImageData::I16(decode(bytes, shape, i16::from_be_bytes)?),
            Bitpix::I32 => ImageData::I32(decode(bytes, shape, i32::from_be_bytes)?),
            Bitpix::I64 => ImageData::I64(decode(bytes, shape, i64::from_be_bytes)?),
            Bitpix::F32 => ImageData::F32(decode(bytes, shape, f32::from_be_bytes)?),
            Bitpix::F64 => ImageData::F64(decode(bytes, shape, f64::from_be_bytes)?),
        })
    }

    /// Turns stored values into physical values, `bzero + bscale * stored`.
    pub fn scale(self, bscale: f64, bzero: f64) -> Self {
        if bscale == 1.0 && bzero == 0.0 {
            return self;
        }
        if bscale == 1.0 {
            // Unsigned conventions are sign-bit flips.
            match self {
                ImageData::U8(a) if bzero == -128.0 => {
                    return ImageData::I8(a.mapv(|v| (v ^ 0x80) as i8));
                }
                ImageData::I16(a) if bzero == 32768.0 => {
                    return ImageData::U16(a.mapv(|v| (v as u16) ^ 0x8000));
                }
                ImageData::I32(a) if bzero == 2f64.powi(31) => {
                    return ImageData::U32(a.mapv(|v| (v as u32) ^ 0x8000_0000));
                }
                ImageData::I64(a) if bzero == 2f64.powi(63) => {
                    return ImageData::U64(a.mapv(|v| (v as u64) ^ (1 << 63)));
                }
                other => return other.scale_to_float(bscale, bzero),
            }
        }
        self.scale_to_float(bscale, bzero)
    }

    fn scale_to_float(self, bscale: f64, bzero: f64) -> Self {
        let physical = self.to_f64().mapv(|v| bzero + bscale * v);
        match self {
            ImageData::U8(_) | ImageData::I8(_) | ImageData::I16(_) | ImageData::F32(_) => {
                ImageData::F32(physical.mapv(|v| v as f32))
            }
            _ => ImageData::F64(physical),
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            ImageData::U8(a) => a.shape(),
            ImageData::I8(a) => a.shape(),
            ImageData::I16(a) => a.shape(),
            ImageData::U16(a) => a.shape(),
            ImageData::I32(a) => a.shape(),
            ImageData::U32(a) => a.shape(),
            ImageData::I64(a) => a.shape(),
            ImageData::U64(a) => a.shape(),
            ImageData::F32(a) => a.shape(),
            ImageData::F64(a) => a.shape(),
        }
    }

    /// Copy widened to `f64`; 64-bit integers beyond 2^53 lose precision.
    pub fn to_f64(&self) -> ArrayD<f64> {
        match self {
            ImageData::U8(a) => a.mapv(f64::from),
            ImageData::I8(a) => a.mapv(f64::from),
            ImageData::I16(a) => a.mapv(f64::from),
            ImageData::U16(a) => a.mapv(f64::from),
            ImageData::I32(a) => a.mapv(f64::from),
            ImageData::U32(a) => a.mapv(f64::from),
            ImageData::I64(a) => a.mapv(|v| v as f64),
            ImageData::U64(a) => a.mapv(|v| v as f64),
            ImageData::F32(a) => a.mapv(f64::from),
            ImageData::F64(a) => a.clone(),
        }
    }
}
