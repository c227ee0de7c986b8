//! The inference rule repository.
//!
//! Rules come from `inference_rules.yaml` as three tables: category
//! keyword/suffix/pattern rules, unit marker rules, and instrument
//! signatures. Document order is load-bearing: the engine breaks score
//! ties by first occurrence, so every table is a `Vec` in file order,
//! never a sorted map.
//!
//! Patterns are compiled here, eagerly, so a bad regex fails the load
//! with a message naming the file and entry instead of surfacing inside
//! the engine.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde_yaml::Value;

use dv_model::{Direction, MeasurementCategory, ScaleType};

use crate::error::{Result, StandardsError};
use crate::yaml::scalar_str;

/// A regex kept alongside its source text for provenance entries.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub source: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile for case-insensitive, unanchored search.
    pub fn compile(pattern: &str) -> std::result::Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Keyword, suffix, and pattern evidence for one category.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: MeasurementCategory,
    pub keywords: Vec<String>,
    pub suffixes: Vec<String>,
    pub patterns: Vec<CompiledPattern>,
}

/// A unit marker (e.g. the `s` of `"Time (s)"`) and the category it implies.
#[derive(Debug, Clone)]
pub struct UnitRule {
    pub unit: String,
    pub patterns: Vec<CompiledPattern>,
    pub category: MeasurementCategory,
}

/// A named instrument whose presence in a label is decisive.
#[derive(Debug, Clone)]
pub struct InstrumentSignature {
    pub name: String,
    pub aliases: Vec<String>,
    pub category: MeasurementCategory,
    /// Instrument scale, used as the primary unit (e.g. `"1-21"`, `"0-100"`).
    pub scale: String,
    pub scale_type: ScaleType,
    pub direction: Direction,
}

/// All inference rules, in source-file order.
#[derive(Debug, Clone, Default)]
pub struct RuleRepository {
    pub categories: Vec<CategoryRule>,
    pub units: Vec<UnitRule>,
    pub instruments: Vec<InstrumentSignature>,
}

impl RuleRepository {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.units.is_empty() && self.instruments.is_empty()
    }
}

/// Load and compile the rule repository from a YAML rules file.
///
/// All three top-level tables are optional; missing ones load empty.
/// Category names, scale types, and directions are parsed into the
/// closed vocabularies here so the engine never sees an unknown value.
pub fn load_rules(path: &Path) -> Result<RuleRepository> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let root: Value = serde_yaml::from_str(&text).map_err(|e| StandardsError::yaml(path, e))?;
    let Value::Mapping(root) = root else {
        return Err(StandardsError::invalid_rules(
            path,
            "rules root must be a mapping",
        ));
    };

    let mut repository = RuleRepository::default();

    if let Some(section) = root.get("category_rules") {
        let mapping = expect_mapping(section, path, "category_rules")?;
        for (key, value) in mapping {
            let name = scalar_str(key).ok_or_else(|| {
                StandardsError::invalid_rules(path, "category_rules keys must be strings")
            })?;
            let category = parse_category(&name, path, "category_rules")?;
            let entry = expect_mapping(value, path, &format!("category_rules entry '{name}'"))?;
            repository.categories.push(CategoryRule {
                category,
                keywords: string_seq(entry.get("keywords"), path, &format!("keywords of '{name}'"))?,
                suffixes: string_seq(entry.get("suffixes"), path, &format!("suffixes of '{name}'"))?,
                patterns: compile_patterns(
                    entry.get("patterns"),
                    path,
                    &format!("category_rules entry '{name}'"),
                )?,
            });
        }
    }

    if let Some(section) = root.get("unit_rules") {
        let mapping = expect_mapping(section, path, "unit_rules")?;
        for (key, value) in mapping {
            let unit = scalar_str(key).ok_or_else(|| {
                StandardsError::invalid_rules(path, "unit_rules keys must be strings")
            })?;
            let entry = expect_mapping(value, path, &format!("unit_rules entry '{unit}'"))?;
            let category_name =
                required_str(entry, "category", path, &format!("unit_rules entry '{unit}'"))?;
            repository.units.push(UnitRule {
                category: parse_category(&category_name, path, &format!("unit_rules entry '{unit}'"))?,
                patterns: compile_patterns(
                    entry.get("patterns"),
                    path,
                    &format!("unit_rules entry '{unit}'"),
                )?,
                unit,
            });
        }
    }

    if let Some(section) = root.get("instrument_scales") {
        let mapping = expect_mapping(section, path, "instrument_scales")?;
        for (key, value) in mapping {
            let name = scalar_str(key).ok_or_else(|| {
                StandardsError::invalid_rules(path, "instrument_scales keys must be strings")
            })?;
            let what = format!("instrument_scales entry '{name}'");
            let entry = expect_mapping(value, path, &what)?;
            let category_name = required_str(entry, "category", path, &what)?;
            let scale_type_name = required_str(entry, "scale_type", path, &what)?;
            let direction_name = required_str(entry, "direction", path, &what)?;
            repository.instruments.push(InstrumentSignature {
                aliases: string_seq(entry.get("aliases"), path, &format!("aliases of '{name}'"))?,
                category: parse_category(&category_name, path, &what)?,
                scale: required_str(entry, "scale", path, &what)?,
                scale_type: scale_type_name.parse::<ScaleType>().map_err(|e| {
                    StandardsError::invalid_rules(path, format!("{what}: {e}"))
                })?,
                direction: direction_name.parse::<Direction>().map_err(|e| {
                    StandardsError::invalid_rules(path, format!("{what}: {e}"))
                })?,
                name,
            });
        }
    }

    Ok(repository)
}

fn parse_category(name: &str, path: &Path, what: &str) -> Result<MeasurementCategory> {
    name.parse::<MeasurementCategory>()
        .map_err(|e| StandardsError::invalid_rules(path, format!("{what}: {e}")))
}

fn expect_mapping<'a>(value: &'a Value, path: &Path, what: &str) -> Result<&'a serde_yaml::Mapping> {
    value
        .as_mapping()
        .ok_or_else(|| StandardsError::invalid_rules(path, format!("{what} must be a mapping")))
}

fn required_str(
    mapping: &serde_yaml::Mapping,
    key: &str,
    path: &Path,
    what: &str,
) -> Result<String> {
    mapping.get(key).and_then(scalar_str).ok_or_else(|| {
        StandardsError::invalid_rules(path, format!("{what} missing required field '{key}'"))
    })
}

fn string_seq(value: Option<&Value>, path: &Path, what: &str) -> Result<Vec<String>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let items = value
        .as_sequence()
        .ok_or_else(|| StandardsError::invalid_rules(path, format!("{what} must be a list")))?;
    items
        .iter()
        .map(|item| {
            scalar_str(item).ok_or_else(|| {
                StandardsError::invalid_rules(path, format!("{what} must contain only strings"))
            })
        })
        .collect()
}

fn compile_patterns(value: Option<&Value>, path: &Path, entry: &str) -> Result<Vec<CompiledPattern>> {
    let sources = string_seq(value, path, &format!("patterns of {entry}"))?;
    sources
        .into_iter()
        .map(|source| {
            CompiledPattern::compile(&source).map_err(|e| StandardsError::InvalidPattern {
                path: path.to_path_buf(),
                entry: entry.to_string(),
                pattern: source,
                source: Box::new(e),
            })
        })
        .collect()
}
