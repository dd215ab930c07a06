// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The schema-built catalog: arenas of parameter types and views.
//!
//! Cross-references (a parameter's type, a command's view) are held as
//! indices into these arenas rather than owning pointers, so the graph
//! stays acyclic and cheap to introspect.

use crate::ptype::ParamType;
use crate::view::View;

/// Index of a [`ParamType`] in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PtypeId(usize);

impl PtypeId {
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }
}

/// Index of a [`View`] in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(usize);

impl ViewId {
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }
}

/// Read-only registry of types and views, built once at schema load.
#[derive(Debug, Default)]
pub struct Catalog {
    ptypes: Vec<ParamType>,
    views: Vec<View>,
    global: Option<ViewId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ptype(&mut self, ptype: ParamType) -> PtypeId {
        self.ptypes.push(ptype);
        PtypeId(self.ptypes.len() - 1)
    }

    pub fn add_view(&mut self, view: View) -> ViewId {
        self.views.push(view);
        ViewId(self.views.len() - 1)
    }

    /// Mark a view as the global sibling searched alongside every view.
    pub fn set_global(&mut self, id: ViewId) {
        self.global = Some(id);
    }

    pub fn global(&self) -> Option<ViewId> {
        self.global
    }

    pub fn ptype(&self, id: PtypeId) -> &ParamType {
        &self.ptypes[id.0]
    }

    pub fn view(&self, id: ViewId) -> &View {
        &self.views[id.0]
    }

    pub fn view_mut(&mut self, id: ViewId) -> &mut View {
        &mut self.views[id.0]
    }

    pub fn find_ptype(&self, name: &str) -> Option<PtypeId> {
        self.ptypes
            .iter()
            .position(|p| p.name() == name)
            .map(PtypeId)
    }

    pub fn find_view(&self, name: &str) -> Option<ViewId> {
        self.views.iter().position(|v| v.name() == name).map(ViewId)
    }

    pub fn views(&self) -> impl Iterator<Item = (ViewId, &View)> {
        self.views.iter().enumerate().map(|(i, v)| (ViewId(i), v))
    }

    pub fn ptypes(&self) -> impl Iterator<Item = (PtypeId, &ParamType)> {
        self.ptypes.iter().enumerate().map(|(i, p)| (PtypeId(i), p))
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
