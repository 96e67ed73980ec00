use std::io::{ErrorKind, Read};

use crate::fits::error::FitsReadError;
use crate::fits::header::{CardValue, Header};
use crate::fits::image::ImageData;
use crate::fits::utils::Bitpix;

const MAX_NAXIS: i64 = 999;

fn required_int(header: &Header, key: &str) -> Result<i64, FitsReadError> {
    header
        .get(key)
        .and_then(CardValue::as_int)
        .ok_or_else(|| FitsReadError::Parse(format!("Missing or non-integer {key}")))
}

/// Pixel type and axis lengths of a data unit, axes in `NAXIS1..NAXISn` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    pub bitpix: Bitpix,
    pub axes: Vec<usize>,
}

impl DataLayout {
    pub fn from_header(header: &Header) -> Result<Self, FitsReadError> {
        let bitpix = Bitpix::from_value(required_int(header, "BITPIX")?)?;
        let naxis = required_int(header, "NAXIS")?;
        if !(0..=MAX_NAXIS).contains(&naxis) {
            return Err(FitsReadError::Parse(format!("NAXIS = {naxis} out of range")));
        }
        if header.get("GROUPS").and_then(CardValue::as_bool) == Some(true) {
            return Err(FitsReadError::Unsupported("random groups".into()));
        }
        let axes = (1..=naxis)
            .map(|i| {
                let key = format!("NAXIS{i}");
                let v = required_int(header, &key)?;
                usize::try_from(v)
                    .map_err(|_| FitsReadError::Parse(format!("{key} = {v} is negative")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DataLayout { bitpix, axes })
    }

    /// Element count; zero when there are no axes.
    pub fn nelem(&self) -> Result<usize, FitsReadError> {
        if self.axes.is_empty() {
            return Ok(0);
        }
        self.axes
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| FitsReadError::Unsupported("data unit size overflows".into()))
    }

    pub fn nbytes(&self) -> Result<usize, FitsReadError> {
        self.nelem()?
            .checked_mul(self.bitpix.nbytes())
            .ok_or_else(|| FitsReadError::Unsupported("data unit size overflows".into()))
    }

    /// Array shape with the slowest axis first.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().rev().copied().collect()
    }
}

#[derive(Debug, Clone)]
pub struct PrimaryHdu {
    pub header: Header,
    pub layout: DataLayout,
    pub data: Option<ImageData>,
}

impl PrimaryHdu {
    /// Reads the primary header only, leaving the reader at the data unit.
    pub fn read_header<R: Read>(reader: &mut R) -> Result<Header, FitsReadError> {
        let header = Header::read_from_file(reader)?;
        match header.iter().next() {
            Some(card) if card.keyword == "SIMPLE" => Ok(header),
            _ => Err(FitsReadError::Parse(
                "Not a FITS file: first card is not SIMPLE".into(),
            )),
        }
    }

    pub fn read_from_file<R: Read>(reader: &mut R) -> Result<Self, FitsReadError> {
        let header = Self::read_header(reader)?;
        let layout = DataLayout::from_header(&header)?;
        let nbytes = layout.nbytes()?;
        if nbytes == 0 {
            return Ok(PrimaryHdu {
                header,
                layout,
                data: None,
            });
        }
        // Grows with what is actually on disk, so a lying NAXISn does not
        // allocate up front.
        let mut buf = Vec::new();
        reader
            .by_ref()
            .take(nbytes as u64)
            .read_to_end(&mut buf)
            .map_err(|e| match e.kind() {
                ErrorKind::UnexpectedEof => FitsReadError::Parse("Truncated data unit".into()),
                _ => FitsReadError::Io(e),
            })?;
        if buf.len() < nbytes {
            return Err(FitsReadError::Parse(format!(
                "Truncated data unit: expected {nbytes} bytes, found {}",
                buf.len()
            )));
        }
        let bscale = header.get("BSCALE").and_then(CardValue::as_float).unwrap_or(1.0);
        let bzero = header.get("BZERO").and_then(CardValue::as_float).unwrap_or(0.0);
        let data = ImageData::decode(layout.bitpix, &layout.shape(), &buf)?.scale(bscale, bzero);
        Ok(PrimaryHdu {
            header,
            layout,
            data: Some(data),
        })
    }

    pub fn into_data(self) -> Result<ImageData, FitsReadError> {
        let PrimaryHdu { layout, data, .. } = self;
        data.ok_or(FitsReadError::NoData { axes: layout.axes })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::fits::fixtures::{header_bytes, keyword, primary_i16};

    #[test]
    fn read_primary_image() {
        let bytes = primary_i16(4, 3, &[keyword("EXPTIME", "30.0")]);
        let hdu = PrimaryHdu::read_from_file(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(hdu.header.get("EXPTIME"), Some(&CardValue::Float(30.0)));
        let data = hdu.into_data().unwrap();
        assert_eq!(data.shape(), &[3, 4]);
        let ImageData::I16(a) = data else {
            panic!("expected i16 data");
        };
        assert_eq!(a[[1, 0]], 4);
        assert_eq!(a[[2, 3]], 11);
    }

    #[test]
    fn header_only_primary_has_no_data() {
        let bytes = header_bytes(&[
            keyword("SIMPLE", "T"),
            keyword("BITPIX", 8),
            keyword("NAXIS", 0),
        ]);
        let hdu = PrimaryHdu::read_from_file(&mut Cursor::new(bytes)).unwrap();
        assert!(hdu.data.is_none());
        let err = hdu.into_data().unwrap_err();
        assert!(matches!(err, FitsReadError::NoData { ref axes } if axes.is_empty()));
        assert!(err.to_string().contains("NAXIS = 0"));
    }

    #[test]
    fn unsigned_16_convention_is_applied() {
        let mut bytes = primary_i16(2, 1, &[keyword("BSCALE", 1), keyword("BZERO", 32768)]);
        // First pixel stored as -32768, second as 1.
        bytes[2880..2884].copy_from_slice(&[0x80, 0x00, 0x00, 0x01]);
        let data = PrimaryHdu::read_from_file(&mut Cursor::new(bytes))
            .unwrap()
            .into_data()
            .unwrap();
        let ImageData::U16(a) = data else {
            panic!("expected u16 data");
        };
        assert_eq!(a.as_slice().unwrap(), &[0u16, 32769]);
    }

    #[test]
    fn truncated_data_unit_fails() {
        let mut bytes = primary_i16::<&str>(10, 10, &[]);
        bytes.truncate(2880 + 50);
        let err = PrimaryHdu::read_from_file(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FitsReadError::Parse(_)));
    }

    #[test]
    fn missing_simple_is_rejected() {
        let bytes = header_bytes(&[keyword("XTENSION", "'IMAGE'")]);
        let err = PrimaryHdu::read_header(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FitsReadError::Parse(_)));
    }

    #[test]
    fn negative_axis_is_rejected() {
        let bytes = header_bytes(&[
            keyword("SIMPLE", "T"),
            keyword("BITPIX", 16),
            keyword("NAXIS", 1),
            keyword("NAXIS1", -4),
        ]);
        let err = PrimaryHdu::read_from_file(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FitsReadError::Parse(_)));
    }
}
