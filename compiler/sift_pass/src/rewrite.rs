//! Pattern-driven rewrite passes.

use sift_ir::{NodeId, Taxonomy, Tree};
use sift_match::{matches, search, Bindings, Pattern};

use crate::{Pass, PassError};

/// A pass that rewrites every site matching one pattern.
///
/// Sites are found by a search over the tree as it was when the pass
/// started, then visited in arena order. After every rewrite that reports a
/// change the live matches are searched again, and a site an earlier rewrite
/// detached from the root, or changed so that it no longer matches, is
/// skipped. Each remaining site is matched again just before its rewrite to
/// get a fresh [`Bindings`] table.
///
/// The callback receives the tree, the taxonomy, the site and its bindings,
/// and returns whether it changed the tree.
pub struct PatternRewrite<F> {
    name: String,
    pattern: Pattern,
    rewrite: F,
}

impl<F> PatternRewrite<F>
where
    F: FnMut(&mut Tree, &Taxonomy, NodeId, &Bindings) -> Result<bool, PassError>,
{
    pub fn new(name: impl Into<String>, pattern: Pattern, rewrite: F) -> Self {
        PatternRewrite {
            name: name.into(),
            pattern,
            rewrite,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl<F> Pass for PatternRewrite<F>
where
    F: FnMut(&mut Tree, &Taxonomy, NodeId, &Bindings) -> Result<bool, PassError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&mut self, tree: &mut Tree, taxonomy: &Taxonomy) -> Result<bool, PassError> {
        let mut live = search(tree, &self.pattern);
        let sites = live.to_sorted_vec();
        let mut changed = false;
        let mut skipped = 0usize;
        for &site in &sites {
            if !live.contains(site) {
                tracing::trace!(?site, "site is detached or no longer matches");
                skipped += 1;
                continue;
            }
            let (_, bindings) = matches(tree, site, &self.pattern);
            if (self.rewrite)(tree, taxonomy, site, &bindings)? {
                changed = true;
                live = search(tree, &self.pattern);
            }
        }
        tracing::debug!(sites = sites.len(), skipped, changed, "rewrite complete");
        Ok(changed)
    }
}
