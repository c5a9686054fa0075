//! Criteria Engine - requirement expressions for item and action gating
//!
//! Turns postfix criteria lists (stat comparisons plus AND/OR/NOT markers)
//! into expression trees, renders them as readable text, and evaluates them
//! against a character's stats: a pass/fail verdict with the blocking
//! leaves, and met/total counts for progress display.
//!
//! Python bindings via PyO3 are available behind the `python` feature.

pub mod assessment;
#[cfg(feature = "python")]
mod bindings;
pub mod criteria;
pub mod error;
pub mod evaluation;
pub mod expression;
pub mod names;
pub mod requirement;

pub use crate::assessment::{render_progress_bar, RequirementAssessment, RequirementEngine};
pub use crate::criteria::{Criterion, Operator, StatId, StatValue};
pub use crate::error::{CriteriaError, Result};
pub use crate::evaluation::{evaluate_counted, evaluate_decision, StatSnapshot};
pub use crate::expression::{build_tree, describe, ExpressionNode};
pub use crate::names::{NameResolver, NameTables};
pub use crate::requirement::aggregate_flat;

#[cfg(feature = "python")]
mod python {
    use std::collections::HashMap;
    use std::sync::Arc;

    use once_cell::sync::OnceCell;
    use parking_lot::RwLock;
    use pyo3::prelude::*;
    use pyo3::types::{PyAny, PyDict, PyList};

    use crate::assessment::{RequirementEngine, RequirementReport};
    use crate::bindings::{deserialize_name_tables, extract_criteria};
    use crate::criteria::{StatId, StatValue};
    use crate::error::CriteriaError;
    use crate::evaluation::StatSnapshot;
    use crate::names::NameTables;

    // ========================================================================
    // Cached Engine
    // ========================================================================

    /// Global engine holding the installed name tables
    static CACHED_ENGINE: OnceCell<Arc<RwLock<RequirementEngine>>> = OnceCell::new();

    fn cached_engine() -> PyResult<Arc<RwLock<RequirementEngine>>> {
        CACHED_ENGINE
            .get()
            .cloned()
            .ok_or_else(|| CriteriaError::NotInitialized.into())
    }

    // ========================================================================
    // Python Functions
    // ========================================================================

    /// Install name tables (call once at startup)
    ///
    /// # Arguments
    /// * `names` - Optional tables `{"stats", "professions", "breeds", "genders", "flags"}`,
    ///   overlaid on the built-in core names
    #[pyfunction]
    #[pyo3(signature = (names=None))]
    fn init_names(names: Option<&Bound<'_, PyDict>>) -> PyResult<()> {
        let mut tables = NameTables::core();
        if let Some(names) = names {
            tables.merge(deserialize_name_tables(names)?);
        }
        tracing::debug!(
            stats = tables.stats.len(),
            professions = tables.professions.len(),
            flag_stats = tables.flags.len(),
            "installing name tables"
        );

        let engine = RequirementEngine::new(tables);

        // If already initialized, replace the engine
        if let Some(existing) = CACHED_ENGINE.get() {
            *existing.write() = engine;
        } else {
            let _ = CACHED_ENGINE.set(Arc::new(RwLock::new(engine)));
        }

        Ok(())
    }

    /// Check if name tables are installed
    #[pyfunction]
    fn is_names_initialized() -> bool {
        CACHED_ENGINE.get().is_some()
    }

    /// Human-readable description of a criteria list ("" when empty or malformed)
    ///
    /// # Raises
    /// RuntimeError if `init_names` was not called first
    #[pyfunction]
    fn describe_criteria(criteria: &Bound<'_, PyAny>) -> PyResult<String> {
        let criteria = extract_criteria(criteria)?;
        let engine = cached_engine()?;
        let engine = engine.read();
        Ok(engine.describe(&criteria))
    }

    /// Evaluate a criteria list against a stat snapshot
    ///
    /// # Arguments
    /// * `criteria` - Postfix list of criterion dicts or objects
    /// * `stats` - Current stat values `{stat_id: value}`; missing stats read as 0
    ///
    /// # Returns
    /// A RequirementReport with the verdict, counts and rendered rows
    #[pyfunction]
    fn evaluate_requirements(
        criteria: &Bound<'_, PyAny>,
        stats: HashMap<StatId, StatValue>,
    ) -> PyResult<RequirementReport> {
        let criteria = extract_criteria(criteria)?;
        let engine = cached_engine()?;
        let engine = engine.read();
        let assessment = engine.assess(&criteria, &StatSnapshot::from(stats));
        Ok(RequirementReport::new(assessment))
    }

    /// Evaluate a criteria list asynchronously
    ///
    /// The tree is built and evaluated on a blocking thread so the asyncio
    /// event loop stays responsive.
    ///
    /// # Example (Python)
    /// ```python
    /// report = await evaluate_requirements_async(criteria, {60: 8, 54: 120})
    /// print(report.status, report.progress_bar)
    /// ```
    #[pyfunction]
    fn evaluate_requirements_async<'py>(
        py: Python<'py>,
        criteria: &Bound<'py, PyAny>,
        stats: HashMap<StatId, StatValue>,
    ) -> PyResult<Bound<'py, PyAny>> {
        // Extract while holding the GIL, before entering async context
        let criteria = extract_criteria(criteria)?;
        let engine_arc = cached_engine()?;

        pyo3_async_runtimes::tokio::future_into_py(py, async move {
            let report = tokio::task::spawn_blocking(move || {
                let engine = engine_arc.read();
                let assessment = engine.assess(&criteria, &StatSnapshot::from(stats));
                RequirementReport::new(assessment)
            })
            .await
            .map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                    "Evaluation task panicked: {}",
                    e
                ))
            })?;

            Ok(report)
        })
    }

    /// Per-stat summary of a criteria list, ignoring AND/OR/NOT structure
    ///
    /// # Returns
    /// List of dicts with `stat_id`, `stat_name`, `min_value`, `max_value`,
    /// `exact_value`, `must_have_flag`, `must_lack_flag` (absent bounds are None)
    #[pyfunction]
    fn aggregate_requirements(py: Python<'_>, criteria: &Bound<'_, PyAny>) -> PyResult<Py<PyAny>> {
        let criteria = extract_criteria(criteria)?;
        let engine = cached_engine()?;
        let flat = engine.read().aggregate(&criteria);

        let list = PyList::empty(py);
        for requirement in &flat {
            let dict = PyDict::new(py);
            dict.set_item("stat_id", requirement.stat_id)?;
            dict.set_item("stat_name", &requirement.stat_name)?;
            dict.set_item("min_value", requirement.min_value)?;
            dict.set_item("max_value", requirement.max_value)?;
            dict.set_item("exact_value", requirement.exact_value)?;
            dict.set_item("must_have_flag", requirement.must_have_flag)?;
            dict.set_item("must_lack_flag", requirement.must_lack_flag)?;
            list.append(dict)?;
        }
        Ok(list.into())
    }

    // ========================================================================
    // Python Module Definition
    // ========================================================================

    /// Python module definition
    #[pymodule]
    fn criteria_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(init_names, m)?)?;
        m.add_function(wrap_pyfunction!(is_names_initialized, m)?)?;
        m.add_function(wrap_pyfunction!(describe_criteria, m)?)?;
        m.add_function(wrap_pyfunction!(evaluate_requirements, m)?)?;
        m.add_function(wrap_pyfunction!(evaluate_requirements_async, m)?)?;
        m.add_function(wrap_pyfunction!(aggregate_requirements, m)?)?;
        m.add_class::<RequirementReport>()?;
        Ok(())
    }
}
