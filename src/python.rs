use numpy::IntoPyArray;
use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3_polars::PyDataFrame;

use crate::config::{ListingOrder, LoaderConfig};
use crate::fits::{CardValue, ImageData};
use crate::loader::FitsLoader;

fn card_to_py(py: Python<'_>, value: CardValue) -> PyObject {
    match value {
        CardValue::Integer(v) => v.into_py(py),
        CardValue::Float(v) => v.into_py(py),
        CardValue::Text(s) => s.into_py(py),
        CardValue::Logical(b) => b.into_py(py),
        CardValue::Empty => py.None(),
    }
}

fn image_to_py(py: Python<'_>, image: &ImageData) -> PyObject {
    match image {
        ImageData::U8(a) => a.clone().into_pyarray_bound(py).into_any().unbind(),
        ImageData::I8(a) => a.clone().into_pyarray_bound(py).into_any().unbind(),
        ImageData::I16(a) => a.clone().into_pyarray_bound(py).into_any().unbind(),
        ImageData::U16(a) => a.clone().into_pyarray_bound(py).into_any().unbind(),
        ImageData::I32(a) => a.clone().into_pyarray_bound(py).into_any().unbind(),
        ImageData::U32(a) => a.clone().into_pyarray_bound(py).into_any().unbind(),
        ImageData::I64(a) => a.clone().into_pyarray_bound(py).into_any().unbind(),
        ImageData::U64(a) => a.clone().into_pyarray_bound(py).into_any().unbind(),
        ImageData::F32(a) => a.clone().into_pyarray_bound(py).into_any().unbind(),
        ImageData::F64(a) => a.clone().into_pyarray_bound(py).into_any().unbind(),
    }
}

/// Python face of [`FitsLoader`].
#[pyclass(name = "FitsLoader", module = "fitloader")]
pub struct PyFitsLoader {
    inner: FitsLoader,
}

#[pymethods]
impl PyFitsLoader {
    #[new]
    #[pyo3(signature = (folder_path, suffix = None, sorted = false))]
    pub fn new(folder_path: &str, suffix: Option<String>, sorted: bool) -> Self {
        let mut config = LoaderConfig::default();
        if let Some(suffix) = suffix {
            config = config.with_suffix(suffix);
        }
        if sorted {
            config = config.with_order(ListingOrder::Sorted);
        }
        PyFitsLoader {
            inner: FitsLoader::with_config(folder_path, config),
        }
    }

    #[getter]
    pub fn folder_path(&self) -> String {
        self.inner.folder().display().to_string()
    }

    /// Returns how many files were loaded by this call.
    pub fn load_images(&mut self) -> PyResult<usize> {
        self.inner
            .load_images()
            .map(|report| report.loaded())
            .map_err(|e| PyOSError::new_err(e.to_string()))
    }

    #[getter]
    pub fn images(&self, py: Python<'_>) -> Vec<PyObject> {
        self.inner
            .images()
            .iter()
            .map(|image| image_to_py(py, image))
            .collect()
    }

    /// Header value from the first matching file, or `None`.
    pub fn get_header_info(&self, py: Python<'_>, key: &str) -> Option<PyObject> {
        self.inner.header_value(key).map(|v| card_to_py(py, v))
    }

    pub fn header_table(&self, keys: Vec<String>) -> PyResult<PyDataFrame> {
        self.inner
            .header_table(keys.as_slice())
            .map(PyDataFrame)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }
}

#[pymodule]
#[pyo3(name = "fitloader")]
pub fn fitloader(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyFitsLoader>()?;
    Ok(())
}
