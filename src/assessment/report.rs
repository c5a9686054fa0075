//! RequirementReport - assessment handle for the Python boundary
//!
//! The report keeps the assessment in Rust memory; Python reads the scalar
//! parts through getters and builds dicts for leaves and rows on demand.

use pyo3::prelude::*;
use pyo3::types::{PyAny, PyDict, PyList};

use crate::evaluation::{CountedRow, UnmetLeaf};

use super::RequirementAssessment;

/// Result of evaluating one criteria list against one stat snapshot
#[pyclass]
pub struct RequirementReport {
    assessment: RequirementAssessment,
}

impl RequirementReport {
    pub fn new(assessment: RequirementAssessment) -> Self {
        Self { assessment }
    }

    pub fn assessment(&self) -> &RequirementAssessment {
        &self.assessment
    }

    fn unmet_to_dict<'py>(&self, py: Python<'py>, unmet: &UnmetLeaf) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("criterion_id", unmet.criterion_id)?;
        dict.set_item("stat_id", unmet.stat_id)?;
        dict.set_item("stat_name", &unmet.stat_name)?;
        dict.set_item("required_value", unmet.required_value)?;
        dict.set_item("current_value", unmet.current_value)?;
        dict.set_item("symbol", unmet.symbol.to_string())?;
        dict.set_item("negated", unmet.negated)?;
        dict.set_item("delta", unmet.delta())?;
        dict.set_item("description", &unmet.description)?;
        Ok(dict)
    }

    fn row_to_dict<'py>(&self, py: Python<'py>, row: &CountedRow) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("depth", row.depth)?;
        dict.set_item("label", &row.label)?;
        dict.set_item("total_count", row.total_count)?;
        dict.set_item("met_count", row.met_count)?;
        dict.set_item("status", row.status.as_str())?;
        Ok(dict)
    }
}

#[pymethods]
impl RequirementReport {
    /// Whether every requirement holds for the snapshot
    #[getter]
    fn can_satisfy(&self) -> bool {
        self.assessment.verdict.can_satisfy
    }

    #[getter]
    fn description(&self) -> String {
        self.assessment.description.clone()
    }

    #[getter]
    fn met_count(&self) -> u32 {
        self.assessment.progress.met
    }

    #[getter]
    fn total_count(&self) -> u32 {
        self.assessment.progress.total
    }

    /// "met", "unmet" or "partial"
    #[getter]
    fn status(&self) -> &'static str {
        self.assessment.progress.status.as_str()
    }

    #[getter]
    fn progress(&self) -> f64 {
        self.assessment.progress.fraction()
    }

    #[getter]
    fn progress_bar(&self) -> String {
        self.assessment.progress_bar.clone()
    }

    /// Leaves blocking the requirement, as dicts
    fn get_unmet_leaves(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let list = PyList::empty(py);
        for unmet in &self.assessment.verdict.unmet_leaves {
            list.append(self.unmet_to_dict(py, unmet)?)?;
        }
        Ok(list.into())
    }

    /// Counted tree rows in display order
    fn get_rows(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let list = PyList::empty(py);
        for row in &self.assessment.rows {
            list.append(self.row_to_dict(py, row)?)?;
        }
        Ok(list.into())
    }

    fn __repr__(&self) -> String {
        format!(
            "RequirementReport(can_satisfy={}, met={}/{}, status='{}')",
            self.assessment.verdict.can_satisfy,
            self.assessment.progress.met,
            self.assessment.progress.total,
            self.assessment.progress.status.as_str()
        )
    }
}
