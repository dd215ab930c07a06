// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML schema loader.
//!
//! Schemas declare parameter types and views with their commands:
//!
//! ```toml
//! [ptype.VLAN_ID]
//! method = "unsignedInteger"
//! pattern = "1..4096"
//! text = "Vlan id"
//!
//! [view.enable-view]
//! prompt = "${HOSTNAME:switch}# "
//!
//! [[view.enable-view.command]]
//! name = "show interface"
//! help = "Display interface status"
//!
//! [[view.enable-view.command.param]]
//! name = "iface"
//! ptype = "IFACE"
//! ```
//!
//! Unknown keys are ignored for forward compatibility. Name references
//! resolve to catalog indices at load; dangling names are errors.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{Catalog, PtypeId};
use crate::command::{ActionSpec, Command, RestorePolicy};
use crate::param::{Param, ParamMode, ParamVec};
use crate::ptype::{parse_ext_help, parse_range, ParamType, Preprocess, SelectItem, TypeMethod};
use crate::view::View;

/// Name of the implicit type backing keyword-only parameters.
const KEYWORD_PTYPE: &str = "__keyword";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid schema document: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("ptype '{name}': invalid pattern: {source}")]
    BadPattern {
        name: String,
        source: Box<regex::Error>,
    },

    #[error("ptype '{name}': invalid range '{pattern}'")]
    BadRange { name: String, pattern: String },

    #[error("ptype '{name}': unknown method '{method}'")]
    UnknownMethod { name: String, method: String },

    #[error("ptype '{name}': unknown preprocess '{preprocess}'")]
    UnknownPreprocess { name: String, preprocess: String },

    #[error("param '{param}': unknown ptype '{name}'")]
    UnknownPtype { param: String, name: String },

    #[error("param '{param}': unknown mode '{mode}'")]
    UnknownMode { param: String, mode: String },

    #[error("param '{param}' has no ptype")]
    MissingPtype { param: String },

    #[error("command '{command}': unknown restore policy '{restore}'")]
    UnknownRestore { command: String, restore: String },
}

#[derive(Debug, Default, Deserialize)]
struct SchemaDoc {
    #[serde(default)]
    ptype: IndexMap<String, PtypeDef>,
    #[serde(default)]
    view: IndexMap<String, ViewDef>,
}

#[derive(Debug, Default, Deserialize)]
struct PtypeDef {
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    preprocess: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    ext_pattern: Option<String>,
    #[serde(default)]
    ext_help: Option<String>,
    #[serde(default)]
    alt_pattern: Option<String>,
    #[serde(default)]
    alt_ext_pattern: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ViewDef {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    depth: usize,
    #[serde(default, rename = "command")]
    commands: Vec<CommandDef>,
}

#[derive(Debug, Deserialize)]
struct CommandDef {
    name: String,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    view: Option<String>,
    #[serde(default)]
    viewid: Option<String>,
    #[serde(default)]
    restore: Option<String>,
    #[serde(default)]
    test: Option<String>,
    #[serde(default)]
    hidden: bool,
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default)]
    action: Option<ActionDef>,
    #[serde(default)]
    args: Option<ParamDef>,
    #[serde(default, rename = "param")]
    params: Vec<ParamDef>,
}

#[derive(Debug, Deserialize)]
struct ActionDef {
    #[serde(default)]
    builtin: Option<String>,
    #[serde(default)]
    script: Option<String>,
    #[serde(default = "default_true")]
    lock: bool,
    #[serde(default)]
    interrupt: bool,
    #[serde(default)]
    permanent: bool,
}

#[derive(Debug, Deserialize)]
struct ParamDef {
    name: String,
    #[serde(default)]
    ptype: Option<String>,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    defval: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    order: bool,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    test: Option<String>,
    #[serde(default)]
    completion: Option<String>,
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    view: Option<String>,
    #[serde(default)]
    viewid: Option<String>,
    #[serde(default, rename = "param")]
    params: Vec<ParamDef>,
}

fn default_true() -> bool {
    true
}

/// Accumulates schema documents, then builds the catalog.
#[derive(Debug, Default)]
pub struct Schema {
    doc: SchemaDoc,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a single document and build its catalog.
    pub fn parse(text: &str) -> Result<Catalog, SchemaError> {
        let mut schema = Self::new();
        schema.merge_str(text)?;
        schema.build()
    }

    /// Load every `*.toml` file of a directory, in sorted order.
    pub fn load_dir(dir: &Path) -> Result<Catalog, SchemaError> {
        let mut schema = Self::new();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|source| SchemaError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();
        for path in paths {
            schema.merge_file(&path)?;
        }
        schema.build()
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<(), SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_str(&text)
    }

    /// Merge a document: later types replace, later views extend.
    pub fn merge_str(&mut self, text: &str) -> Result<(), SchemaError> {
        let doc: SchemaDoc = toml::from_str(text)?;
        self.doc.ptype.extend(doc.ptype);
        for (name, view) in doc.view {
            match self.doc.view.get_mut(&name) {
                Some(existing) => {
                    if view.prompt.is_some() {
                        existing.prompt = view.prompt;
                    }
                    if view.depth != 0 {
                        existing.depth = view.depth;
                    }
                    existing.commands.extend(view.commands);
                }
                None => {
                    self.doc.view.insert(name, view);
                }
            }
        }
        Ok(())
    }

    pub fn build(self) -> Result<Catalog, SchemaError> {
        let mut catalog = Catalog::new();

        let keyword_re = anchored(".*").map_err(|source| SchemaError::BadPattern {
            name: KEYWORD_PTYPE.to_string(),
            source: Box::new(source),
        })?;
        let keyword = catalog.add_ptype(ParamType::new(
            KEYWORD_PTYPE,
            None,
            TypeMethod::Regexp { re: keyword_re },
            Preprocess::None,
        ));

        for (name, def) in &self.doc.ptype {
            let ptype = build_ptype(name, def)?;
            catalog.add_ptype(ptype);
        }

        // Views first, commands second, so command view references resolve.
        let mut view_ids = Vec::with_capacity(self.doc.view.len());
        for (name, def) in &self.doc.view {
            let mut view = View::new(name, def.prompt.clone().unwrap_or_default());
            view.depth = def.depth;
            let id = catalog.add_view(view);
            if name == "global" {
                catalog.set_global(id);
            }
            view_ids.push(id);
        }

        for ((_, def), id) in self.doc.view.iter().zip(view_ids) {
            let depth = def.depth;
            for cmd_def in &def.commands {
                let command = build_command(cmd_def, id, depth, &catalog, keyword)?;
                catalog.view_mut(id).add_command(command);
            }
        }

        tracing::debug!(
            ptypes = catalog.ptypes().count(),
            views = catalog.views().count(),
            "schema catalog built"
        );
        Ok(catalog)
    }
}

fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

fn build_ptype(name: &str, def: &PtypeDef) -> Result<ParamType, SchemaError> {
    let bad_pattern = |source: regex::Error| SchemaError::BadPattern {
        name: name.to_string(),
        source: Box::new(source),
    };
    let pattern = def.pattern.as_deref().unwrap_or("");

    let method = match def.method.as_deref().unwrap_or("regexp") {
        "regexp" => TypeMethod::Regexp {
            re: anchored(if pattern.is_empty() { ".*" } else { pattern })
                .map_err(bad_pattern)?,
        },
        "integer" => {
            let (min, max) = parse_range(pattern, (i64::MIN, i64::MAX)).ok_or_else(|| {
                SchemaError::BadRange {
                    name: name.to_string(),
                    pattern: pattern.to_string(),
                }
            })?;
            TypeMethod::Integer { min, max }
        }
        "unsignedInteger" => {
            let (min, max) = parse_range(pattern, (0, u64::MAX)).ok_or_else(|| {
                SchemaError::BadRange {
                    name: name.to_string(),
                    pattern: pattern.to_string(),
                }
            })?;
            TypeMethod::UnsignedInteger { min, max }
        }
        "select" => TypeMethod::Select {
            items: SelectItem::parse_list(pattern),
            ext_help: def.ext_help.as_deref().map(parse_ext_help).unwrap_or_default(),
        },
        "code" => TypeMethod::Code,
        "regexp-select" | "regexp_select" => TypeMethod::RegexpSelect {
            re: anchored(if pattern.is_empty() { ".*" } else { pattern })
                .map_err(bad_pattern)?,
            alt_re: def
                .alt_pattern
                .as_deref()
                .map(anchored)
                .transpose()
                .map_err(bad_pattern)?,
            items: def
                .ext_pattern
                .as_deref()
                .map(SelectItem::parse_list)
                .unwrap_or_default(),
            alt_items: def
                .alt_ext_pattern
                .as_deref()
                .map(SelectItem::parse_list)
                .unwrap_or_default(),
            ext_help: def.ext_help.as_deref().map(parse_ext_help).unwrap_or_default(),
        },
        other => {
            return Err(SchemaError::UnknownMethod {
                name: name.to_string(),
                method: other.to_string(),
            })
        }
    };

    let preprocess = match def.preprocess.as_deref().unwrap_or("none") {
        "none" => Preprocess::None,
        "toupper" | "toUpper" => Preprocess::ToUpper,
        "tolower" | "toLower" => Preprocess::ToLower,
        "mode" => Preprocess::Mode,
        other => {
            return Err(SchemaError::UnknownPreprocess {
                name: name.to_string(),
                preprocess: other.to_string(),
            })
        }
    };

    Ok(ParamType::new(name, def.text.clone(), method, preprocess))
}

fn build_command(
    def: &CommandDef,
    view: crate::catalog::ViewId,
    depth: usize,
    catalog: &Catalog,
    keyword: PtypeId,
) -> Result<Command, SchemaError> {
    let mut command = Command::new(def.name.clone(), view);
    command.text = def.help.clone();
    command.detail = def.detail.clone();
    command.viewname = def.view.clone();
    command.viewid = def.viewid.clone();
    command.test = def.test.clone();
    command.hidden = def.hidden;
    command.enabled = def.enabled;
    command.depth = depth;
    command.restore = match def.restore.as_deref() {
        None | Some("none") => RestorePolicy::None,
        Some("view") => RestorePolicy::View,
        Some("depth") => RestorePolicy::Depth,
        Some(other) => {
            return Err(SchemaError::UnknownRestore {
                command: def.name.clone(),
                restore: other.to_string(),
            })
        }
    };
    if let Some(action) = &def.action {
        command.action = ActionSpec {
            builtin: action.builtin.clone(),
            script: action.script.clone(),
            lock: action.lock,
            interrupt: action.interrupt,
            permanent: action.permanent,
        };
    }
    command.params = def
        .params
        .iter()
        .map(|p| build_param(p, catalog, keyword))
        .collect::<Result<ParamVec, _>>()?;
    if let Some(args) = &def.args {
        command.args = Some(build_param(args, catalog, keyword)?);
    }
    Ok(command)
}

fn build_param(
    def: &ParamDef,
    catalog: &Catalog,
    keyword: PtypeId,
) -> Result<Param, SchemaError> {
    let mode = match def.mode.as_deref().unwrap_or("common") {
        "common" => ParamMode::Common,
        "subcommand" => ParamMode::Subcommand,
        "switch" => ParamMode::Switch,
        other => {
            return Err(SchemaError::UnknownMode {
                param: def.name.clone(),
                mode: other.to_string(),
            })
        }
    };

    let ptype = match def.ptype.as_deref() {
        Some(name) => catalog
            .find_ptype(name)
            .ok_or_else(|| SchemaError::UnknownPtype {
                param: def.name.clone(),
                name: name.to_string(),
            })?,
        None if mode == ParamMode::Common => {
            return Err(SchemaError::MissingPtype {
                param: def.name.clone(),
            })
        }
        None => keyword,
    };

    let mut param = Param::new(def.name.clone(), ptype);
    param.mode = mode;
    param.text = def.help.clone();
    if let Some(value) = &def.value {
        param.set_value(value.clone());
    }
    param.defval = def.defval.clone();
    param.optional = def.optional;
    param.order = def.order;
    param.hidden = def.hidden;
    param.test = def.test.clone();
    param.completion = def.completion.clone();
    param.access = def.access.clone();
    param.view = def.view.clone();
    param.viewid = def.viewid.clone();
    param.params = def
        .params
        .iter()
        .map(|p| build_param(p, catalog, keyword))
        .collect::<Result<ParamVec, _>>()?;
    Ok(param)
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
