//! Conversion of host-side Python values into engine types
//!
//! Criteria may come as dicts or as attribute objects; name tables come as
//! a dict whose keys may be ints or numeric strings.

use ahash::AHashMap;
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyAny, PyDict};

use crate::criteria::{Criterion, StatId, StatValue};
use crate::names::NameTables;

/// Helper to get attribute from either dict or object
fn get_attr<'py>(obj: &Bound<'py, PyAny>, name: &str) -> PyResult<Bound<'py, PyAny>> {
    if let Ok(dict) = obj.cast::<PyDict>() {
        dict.get_item(name)?
            .ok_or_else(|| PyKeyError::new_err(name.to_string()))
    } else {
        obj.getattr(name)
    }
}

/// Helper to get optional attribute from either dict or object
fn get_attr_opt<'py>(obj: &Bound<'py, PyAny>, name: &str) -> Option<Bound<'py, PyAny>> {
    let value = if let Ok(dict) = obj.cast::<PyDict>() {
        dict.get_item(name).ok().flatten()
    } else {
        obj.getattr(name).ok()
    };
    value.filter(|v| !v.is_none())
}

/// First present attribute among `names`
fn get_attr_any<'py>(obj: &Bound<'py, PyAny>, names: &[&str]) -> Option<Bound<'py, PyAny>> {
    names.iter().find_map(|name| get_attr_opt(obj, name))
}

/// Extract one criterion record
///
/// `id`, `stat` and `value` default to 0; `operator` is required.
pub fn extract_criterion(obj: &Bound<'_, PyAny>) -> PyResult<Criterion> {
    let id: i32 = get_attr_opt(obj, "id").map(|v| v.extract()).transpose()?.unwrap_or(0);
    let stat: StatId = get_attr_any(obj, &["stat", "left_operand"])
        .map(|v| v.extract())
        .transpose()?
        .unwrap_or(0);
    let value: StatValue = get_attr_any(obj, &["value", "right_operand"])
        .map(|v| v.extract())
        .transpose()?
        .unwrap_or(0);
    let operator: i32 = get_attr(obj, "operator")?.extract()?;

    Ok(Criterion::new(id, stat, value, operator))
}

/// Extract a postfix criteria list from any Python iterable
pub fn extract_criteria(criteria: &Bound<'_, PyAny>) -> PyResult<Vec<Criterion>> {
    let mut records = Vec::new();
    for item in criteria.try_iter()? {
        records.push(extract_criterion(&item?)?);
    }
    Ok(records)
}

/// Support both integer and numeric string keys
fn extract_key(key: &Bound<'_, PyAny>, section: &str) -> PyResult<i64> {
    if let Ok(id) = key.extract::<i64>() {
        return Ok(id);
    }
    let key_str: String = key.extract()?;
    key_str.trim().parse().map_err(|_| {
        PyValueError::new_err(format!("Invalid {} id: {}", section, key_str))
    })
}

fn extract_stat_key(key: &Bound<'_, PyAny>, section: &str) -> PyResult<StatId> {
    let id = extract_key(key, section)?;
    StatId::try_from(id).map_err(|_| {
        PyValueError::new_err(format!("Invalid {} id: {}", section, id))
    })
}

fn extract_table(
    tables: &Bound<'_, PyDict>,
    section: &str,
) -> PyResult<AHashMap<StatValue, String>> {
    let mut table = AHashMap::new();
    if let Some(entries) = tables.get_item(section)? {
        let entries = entries.cast::<PyDict>()?;
        for (key, value) in entries.iter() {
            table.insert(extract_key(&key, section)?, value.extract()?);
        }
    }
    Ok(table)
}

/// Deserialize name tables from a Python dict
///
/// Expected format: `{"stats": {60: "Profession"}, "professions": {...},
/// "breeds": {...}, "genders": {...}, "flags": {389: {16: "NoDrop"}}}`
pub fn deserialize_name_tables(tables: &Bound<'_, PyDict>) -> PyResult<NameTables> {
    let mut names = NameTables::default();

    if let Some(stats) = tables.get_item("stats")? {
        let stats = stats.cast::<PyDict>()?;
        for (key, value) in stats.iter() {
            names.insert_stat(extract_stat_key(&key, "stat")?, value.extract::<String>()?);
        }
    }

    names.professions = extract_table(tables, "professions")?;
    names.breeds = extract_table(tables, "breeds")?;
    names.genders = extract_table(tables, "genders")?;

    if let Some(flags) = tables.get_item("flags")? {
        let flags = flags.cast::<PyDict>()?;
        for (stat_key, bits) in flags.iter() {
            let stat = extract_stat_key(&stat_key, "flag stat")?;
            let bits = bits.cast::<PyDict>()?;
            for (bit, name) in bits.iter() {
                names.insert_flag(stat, extract_key(&bit, "flag")?, name.extract::<String>()?);
            }
        }
    }

    names.validate()?;
    Ok(names)
}
