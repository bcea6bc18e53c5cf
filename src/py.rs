//! Python bindings for the argument parser using PyO3

use crate::fuzzy::{resolve_boss, BossDictionary};
use crate::matcher::match_args;
use crate::types::{check_single_variadic, AliasTable, Arg, ArgKind, ArgSpec, SpecTable};
use crate::validators::ParseContext;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

fn kind_from_str(kind: &str) -> PyResult<ArgKind> {
    match kind {
        "str" => Ok(ArgKind::Str),
        "int" => Ok(ArgKind::Int),
        "variadic" => Ok(ArgKind::Variadic),
        "month_day" => Ok(ArgKind::MonthDay),
        "hour_minute" => Ok(ArgKind::HourMinute),
        "timer" => Ok(ArgKind::Timer),
        "tier" => Ok(ArgKind::Tier),
        "boss" => Ok(ArgKind::Boss),
        other => Err(PyValueError::new_err(format!("unknown argument kind: {other}"))),
    }
}

/// Python wrapper owning the spec table, boss dictionary and alias table
#[pyclass]
pub struct PyArgParser {
    specs: SpecTable,
    bosses: BossDictionary,
    aliases: AliasTable,
}

#[pymethods]
impl PyArgParser {
    #[new]
    fn new() -> Self {
        Self {
            specs: SpecTable::new(),
            bosses: BossDictionary::new(),
            aliases: AliasTable::new(),
        }
    }

    /// Register a positional spec: a list of (kind, required) pairs
    fn add_spec(&mut self, name: String, args: Vec<(String, bool)>) -> PyResult<()> {
        let mut slots = Vec::with_capacity(args.len());
        for (kind, required) in args {
            slots.push(Arg { kind: kind_from_str(&kind)?, required });
        }
        check_single_variadic(&slots).map_err(PyValueError::new_err)?;
        self.specs.register(name, ArgSpec::Positional(slots));
        Ok(())
    }

    /// Register a freeform spec: the whole input comes back as one string
    fn add_freeform_spec(&mut self, name: String) {
        self.specs.register(name, ArgSpec::Freeform);
    }

    fn add_boss(&mut self, name: &str) {
        self.bosses.insert(name);
    }

    fn remove_boss(&mut self, name: &str) {
        self.bosses.remove(name);
    }

    fn add_alias(&mut self, alias: String, canonical: String) {
        self.aliases.insert(alias.to_lowercase(), canonical.to_lowercase());
    }

    /// Parse argument text against a registered spec.
    ///
    /// Returns `{"type": "match", "values": [...]}` or `{"type": "none"}`.
    fn parse<'py>(&self, name: &str, input: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let spec = self
            .specs
            .get(name)
            .ok_or_else(|| PyValueError::new_err(format!("unknown spec: {name}")))?;
        let ctx = ParseContext::new(&self.bosses, &self.aliases);

        let dict = PyDict::new_bound(py);
        match match_args(input, spec, &ctx) {
            Some(values) => {
                dict.set_item("type", "match")?;
                let values_json = serde_json::to_string(&values).map_err(|e| {
                    PyValueError::new_err(format!("Failed to serialize values: {}", e))
                })?;
                dict.set_item("values", values_json)?;
            }
            None => {
                dict.set_item("type", "none")?;
            }
        }
        Ok(dict)
    }

    /// Fuzzy-resolve a boss name against the current dictionary
    fn resolve_boss<'py>(&self, raw: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        match resolve_boss(raw, &self.bosses, &self.aliases) {
            Some(m) => {
                dict.set_item("type", "match")?;
                dict.set_item("canonical", m.canonical)?;
                dict.set_item("input", m.input)?;
            }
            None => {
                dict.set_item("type", "none")?;
            }
        }
        Ok(dict)
    }

    fn spec_count(&self) -> usize {
        self.specs.len()
    }

    fn boss_count(&self) -> usize {
        self.bosses.len()
    }
}
