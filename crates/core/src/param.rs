// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter declarations attached to commands.
//!
//! A [`Param`] is one declared position in a command's argument template.
//! Depth comes from two places: a switch param's children are mutually
//! exclusive alternatives at one token position, and a matched param's own
//! children consume the following positions.

use crate::catalog::PtypeId;

/// How a parameter consumes its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamMode {
    /// Validated by the parameter's type.
    #[default]
    Common,
    /// Matches only its declared keyword value.
    Subcommand,
    /// Container of mutually exclusive alternatives.
    Switch,
}

/// One declared parameter position.
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    pub text: Option<String>,
    pub ptype: PtypeId,
    value: Option<String>,
    pub defval: Option<String>,
    pub mode: ParamMode,
    pub optional: bool,
    /// Meaningful only with `optional`: forbids rewinding before this
    /// parameter once it has been consumed.
    pub order: bool,
    pub hidden: bool,
    pub test: Option<String>,
    pub completion: Option<String>,
    pub access: Option<String>,
    /// View to enter when this parameter binds.
    pub view: Option<String>,
    pub viewid: Option<String>,
    pub params: ParamVec,
}

impl Param {
    pub fn new(name: impl Into<String>, ptype: PtypeId) -> Self {
        Self {
            name: name.into(),
            text: None,
            ptype,
            value: None,
            defval: None,
            mode: ParamMode::Common,
            optional: false,
            order: false,
            hidden: false,
            test: None,
            completion: None,
            access: None,
            view: None,
            viewid: None,
            params: ParamVec::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// The keyword a subcommand matches, falling back to the name.
    pub fn effective_value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.name)
    }

    pub fn is_switch(&self) -> bool {
        self.mode == ParamMode::Switch
    }
}

/// Ordered list of sibling parameters.
#[derive(Debug, Clone, Default)]
pub struct ParamVec(Vec<Param>);

impl ParamVec {
    pub fn push(&mut self, param: Param) {
        self.0.push(param);
    }

    pub fn get(&self, index: usize) -> Option<&Param> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ParamVec {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Param> for ParamVec {
    fn from_iter<T: IntoIterator<Item = Param>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "param_tests.rs"]
mod tests;
