//! Recursive directory walker building per-node attribution sets
//!
//! A file node is scored directly by the active `FileScorer`; a directory
//! folds its children's sets onto a zero set pinned to its own path, so the
//! parent's path stays stable regardless of how sibling paths reconcile.
//! An optional visitor observes finished sets in post-order: every node
//! reached through a directory context, deepest first, parent last.

use crate::attribution_set::AttributionSet;
use crate::paths::PathResolver;
use crate::scoring::FileScorer;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Post-order observer of finished attribution sets
pub type Visitor<'v> = &'v mut dyn FnMut(&AttributionSet);

/// Single-threaded recursive walker over one scoring dimension
pub struct Walker<'a, S: FileScorer> {
    resolver: &'a PathResolver,
    scorer: &'a S,
    labels: Vec<String>,
}

impl<'a, S: FileScorer> Walker<'a, S> {
    pub fn new(resolver: &'a PathResolver, scorer: &'a S) -> Self {
        let labels = scorer.labels();
        Self {
            resolver,
            scorer,
            labels,
        }
    }

    /// Walk without observing intermediate nodes
    pub fn walk(&self, root: &Path) -> Result<AttributionSet> {
        self.walk_with(root, None)
    }

    /// Walk `root`, reporting every descendant's finished set to `visitor`
    ///
    /// The root's own set is reported last when the root is a directory; a
    /// plain-file root never triggers the visitor. A nonexistent root fails
    /// fast with `InvalidPath` before any scoring happens.
    pub fn walk_with(
        &self,
        root: &Path,
        mut visitor: Option<Visitor<'_>>,
    ) -> Result<AttributionSet> {
        let set = self.node_set(root, &mut visitor)?;

        if self.resolver.absolute(set.path()).is_dir() {
            if let Some(visit) = visitor.as_mut() {
                visit(&set);
            }
        }

        Ok(set)
    }

    fn node_set(
        &self,
        path: &Path,
        visitor: &mut Option<Visitor<'_>>,
    ) -> Result<AttributionSet> {
        let mut set = AttributionSet::new(self.resolver, path, &self.labels)?;
        let absolute = self.resolver.absolute(set.path());

        if !absolute.is_dir() {
            let rel_path = set.path().to_path_buf();
            self.scorer.score_file(&mut set, &rel_path, &absolute)?;
            return Ok(set);
        }

        // Sorted children keep visitor output deterministic; an empty
        // directory simply keeps its zero set
        for child in sorted_children(&absolute)? {
            let child_set = self.node_set(&path.join(child), visitor)?;
            if let Some(visit) = visitor.as_mut() {
                visit(&child_set);
            }
            set = set.add(&child_set)?;
        }

        tracing::trace!(
            path = %set.path().display(),
            total = set.total(),
            "folded directory"
        );

        Ok(set)
    }
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read '{}'", dir.display()))?
    {
        let entry =
            entry.with_context(|| format!("failed to read entry in '{}'", dir.display()))?;
        children.push(PathBuf::from(entry.file_name()));
    }
    children.sort();
    Ok(children)
}
