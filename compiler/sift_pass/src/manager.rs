//! Passes and the manager that sequences them.

use sift_ir::{Taxonomy, Tree};

use crate::PassError;

/// One in-place transformation of a tree.
pub trait Pass {
    /// Name shown in traces and in [`PassManager::history`].
    fn name(&self) -> &str;

    /// Transform `tree`, returning whether anything changed.
    fn apply(&mut self, tree: &mut Tree, taxonomy: &Taxonomy) -> Result<bool, PassError>;
}

/// What one pass application did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PassRecord {
    pub name: String,
    pub changed: bool,
}

/// Applies passes to trees of one taxonomy.
pub struct PassManager<'t> {
    taxonomy: &'t Taxonomy,
    history: Vec<PassRecord>,
}

impl<'t> PassManager<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        PassManager {
            taxonomy,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn taxonomy(&self) -> &'t Taxonomy {
        self.taxonomy
    }

    /// Apply one pass and record the outcome.
    ///
    /// A failed pass is not recorded; the tree may hold its partial edits.
    #[tracing::instrument(level = "debug", skip_all, fields(pass = pass.name(), nodes = tree.len()))]
    pub fn apply(&mut self, pass: &mut dyn Pass, tree: &mut Tree) -> Result<bool, PassError> {
        let changed = match pass.apply(tree, self.taxonomy) {
            Ok(changed) => changed,
            Err(err) => {
                tracing::debug!(error = %err, "pass failed");
                return Err(err);
            }
        };
        tracing::debug!(changed, nodes = tree.len(), "pass finished");
        self.history.push(PassRecord {
            name: pass.name().to_owned(),
            changed,
        });
        Ok(changed)
    }

    /// Apply `passes` in order, stopping at the first error.
    ///
    /// Returns whether any pass changed the tree.
    pub fn run(&mut self, passes: &mut [Box<dyn Pass>], tree: &mut Tree) -> Result<bool, PassError> {
        let mut changed = false;
        for pass in passes.iter_mut() {
            changed |= self.apply(pass.as_mut(), tree)?;
        }
        Ok(changed)
    }

    /// Every successful application so far, oldest first.
    pub fn history(&self) -> &[PassRecord] {
        &self.history
    }
}
