//! Batch loading of FITS images from a directory.
//!
//! [`FitsLoader`] lists the entries of one directory whose names end with a
//! configured suffix (`.fit` by default), reads the primary data array of
//! each into memory, and answers single header lookups against the first
//! matching file. Files that fail to read are logged through the `log`
//! facade and reported per file instead of aborting the batch.
//!
//! ```no_run
//! use fitloader::FitsLoader;
//!
//! let mut loader = FitsLoader::new("/data/night1");
//! let report = loader.load_images()?;
//! println!("{} loaded, {} failed", report.loaded(), report.failed());
//! let exposure = loader.header_value("EXPTIME");
//! # Ok::<(), fitloader::FitsLoaderError>(())
//! ```

pub mod config;
pub mod errors;
pub mod fits;
pub mod loader;
pub mod table;

#[cfg(feature = "python")]
mod python;

pub use config::{ListingOrder, LoaderConfig};
pub use errors::FitsLoaderError;
pub use fits::{CardValue, FitsFile, FitsReadError, Header, ImageData};
pub use loader::{FileOutcome, FitsLoader, LoadReport};
