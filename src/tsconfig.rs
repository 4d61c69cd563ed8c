//! tsconfig model: raw JSON shape, compiler options, parsed configuration.
//!
//! The type engine owns the real parsing rules (`extends`, `include` globs,
//! option validation). This module only fixes the shapes exchanged with it
//! and the handful of options this crate reads or overrides.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;

/// Deserialize boolean options that may also be written as strings
/// (`"declaration": "true"`).
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true or false"
            ))),
        },
    }
}

// =============================================================================
// Option enums
// =============================================================================

/// Language level of emitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptTarget {
    /// ES3
    Es3,
    /// ES5
    Es5,
    /// ES2015 (ES6)
    Es2015,
    /// ES2016
    Es2016,
    /// ES2017
    Es2017,
    /// ES2018
    Es2018,
    /// ES2019
    Es2019,
    /// ES2020
    Es2020,
    /// ES2021
    Es2021,
    /// ES2022
    Es2022,
    /// ES2023
    Es2023,
    /// ES2024
    Es2024,
    /// Latest supported features.
    #[serde(rename = "esnext")]
    EsNext,
}

impl ScriptTarget {
    /// Parse a target name, ignoring case (`"ES2020"`, `"esnext"`).
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value.trim().to_lowercase().as_str() {
            "es3" => Self::Es3,
            "es5" => Self::Es5,
            "es6" | "es2015" => Self::Es2015,
            "es2016" => Self::Es2016,
            "es2017" => Self::Es2017,
            "es2018" => Self::Es2018,
            "es2019" => Self::Es2019,
            "es2020" => Self::Es2020,
            "es2021" => Self::Es2021,
            "es2022" => Self::Es2022,
            "es2023" => Self::Es2023,
            "es2024" => Self::Es2024,
            "esnext" | "latest" => Self::EsNext,
            _ => return None,
        })
    }
}

/// Strategy used to resolve module specifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleResolutionKind {
    /// Legacy resolution.
    Classic,
    /// Node 10 resolution.
    Node10,
    /// Node 16 resolution.
    Node16,
    /// Latest Node resolution.
    NodeNext,
    /// Bundler-style resolution.
    Bundler,
}

impl<'de> Deserialize<'de> for ScriptTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown target: '{value}'")))
    }
}

impl ModuleResolutionKind {
    /// Parse a resolution strategy name, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value.trim().to_lowercase().as_str() {
            "classic" => Self::Classic,
            "node" | "node10" => Self::Node10,
            "node16" => Self::Node16,
            "nodenext" => Self::NodeNext,
            "bundler" => Self::Bundler,
            _ => return None,
        })
    }
}

impl<'de> Deserialize<'de> for ModuleResolutionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown moduleResolution: '{value}'"))
        })
    }
}

// =============================================================================
// CompilerOptions
// =============================================================================

/// Compiler options.
///
/// Options this crate reads or sets are typed; everything else is preserved
/// in [`other`](Self::other) and handed to the engine untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Generate `.d.ts` files.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_bool_or_string")]
    pub declaration: Option<bool>,
    /// Emit nothing.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_bool_or_string")]
    pub no_emit: Option<bool>,
    /// Emit only `.d.ts` files.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_bool_or_string")]
    pub emit_declaration_only: Option<bool>,
    /// Skip emit when there are errors.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_bool_or_string")]
    pub no_emit_on_error: Option<bool>,
    /// Type-check JavaScript files.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_bool_or_string")]
    pub check_js: Option<bool>,
    /// Generate source maps for `.d.ts` files.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_bool_or_string")]
    pub declaration_map: Option<bool>,
    /// Skip type checking of declaration files.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_bool_or_string")]
    pub skip_lib_check: Option<bool>,
    /// Language level of emitted code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ScriptTarget>,
    /// Allow importing `.json` modules.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_bool_or_string")]
    pub resolve_json_module: Option<bool>,
    /// Module resolution strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_resolution: Option<ModuleResolutionKind>,
    /// Project can be referenced by others.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_bool_or_string")]
    pub composite: Option<bool>,
    /// Save build information for later builds.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_bool_or_string")]
    pub incremental: Option<bool>,
    /// Where build information is saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_build_info_file: Option<PathBuf>,
    /// Output directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    /// Output directory for declaration files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration_dir: Option<PathBuf>,

    /// Options not modelled above.
    #[serde(flatten)]
    pub other: Map<String, Value>,

    /// `$rootDir` hint for the alternate front-end: the resolved base directory.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
    /// `$configRaw` hint for the alternate front-end: the raw tsconfig JSON.
    #[serde(skip)]
    pub config_raw: Option<Value>,
}

impl CompilerOptions {
    /// Options applied before the project's own: declaration-only output,
    /// no output on error, no JS checking, no declaration maps, skipped lib
    /// checks, `esnext` target, JSON modules and bundler resolution.
    pub fn emit_defaults() -> Self {
        Self {
            declaration: Some(true),
            no_emit: Some(false),
            emit_declaration_only: Some(true),
            no_emit_on_error: Some(true),
            check_js: Some(false),
            declaration_map: Some(false),
            skip_lib_check: Some(true),
            target: Some(ScriptTarget::EsNext),
            resolve_json_module: Some(true),
            module_resolution: Some(ModuleResolutionKind::Bundler),
            ..Self::default()
        }
    }

    /// Layer `overrides` on top of `self`: every option set in `overrides`
    /// wins, unset ones keep the value from `self`.
    pub fn overridden_by(self, overrides: CompilerOptions) -> Self {
        let mut other = self.other;
        other.extend(overrides.other);

        Self {
            declaration: overrides.declaration.or(self.declaration),
            no_emit: overrides.no_emit.or(self.no_emit),
            emit_declaration_only: overrides.emit_declaration_only.or(self.emit_declaration_only),
            no_emit_on_error: overrides.no_emit_on_error.or(self.no_emit_on_error),
            check_js: overrides.check_js.or(self.check_js),
            declaration_map: overrides.declaration_map.or(self.declaration_map),
            skip_lib_check: overrides.skip_lib_check.or(self.skip_lib_check),
            target: overrides.target.or(self.target),
            resolve_json_module: overrides.resolve_json_module.or(self.resolve_json_module),
            module_resolution: overrides.module_resolution.or(self.module_resolution),
            composite: overrides.composite.or(self.composite),
            incremental: overrides.incremental.or(self.incremental),
            ts_build_info_file: overrides.ts_build_info_file.or(self.ts_build_info_file),
            out_dir: overrides.out_dir.or(self.out_dir),
            declaration_dir: overrides.declaration_dir.or(self.declaration_dir),
            other,
            base_dir: overrides.base_dir.or(self.base_dir),
            config_raw: overrides.config_raw.or(self.config_raw),
        }
    }
}

// =============================================================================
// tsconfig JSON
// =============================================================================

/// A `references` entry as written in tsconfig.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceJson {
    /// Path to the referenced project (directory or config file).
    pub path: String,
    /// Prepend the referenced output.
    #[serde(default)]
    pub prepend: bool,
}

/// The shape of a tsconfig.json file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfigJson {
    /// Base configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Compiler options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_options: Option<CompilerOptions>,
    /// Explicit file list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// Include patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// Exclude patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    /// Referenced projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<ReferenceJson>>,
}

impl TsConfigJson {
    /// Interpret raw JSON as a tsconfig.
    pub fn from_value(raw: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }
}

// =============================================================================
// Parsed configuration
// =============================================================================

/// A resolved project reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    /// Absolute path of the referenced tsconfig file.
    pub path: PathBuf,
    /// Whether the referenced output is prepended.
    pub prepend: bool,
}

/// A configuration file after parsing by the type engine.
#[derive(Debug, Clone, Default)]
pub struct ParsedConfig {
    /// Compiler options declared by the project.
    pub options: CompilerOptions,
    /// Absolute paths of the files the project includes.
    pub file_names: Vec<PathBuf>,
    /// Referenced projects.
    pub project_references: Vec<ProjectReference>,
    /// The raw JSON the configuration was parsed from.
    pub raw: Value,
    /// Recoverable diagnostics found while parsing.
    pub errors: Vec<Diagnostic>,
}
