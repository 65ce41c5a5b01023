//! Per-call move options.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Predicate deciding whether a (source, destination) pair takes part in the move.
pub type FilterFn = Arc<dyn Fn(&Path, &Path) -> bool + Send + Sync>;

/// How a move behaves when the destination already exists.
///
/// Passed unchanged through every level of a recursive merge.
#[derive(Clone)]
pub struct MoveOptions {
    /// Replace an existing destination (wholesale, unless merging two directories).
    pub overwrite: bool,
    /// Merge directories entry by entry instead of failing or replacing.
    pub merge: bool,
    /// Delete whatever is left at the source afterwards, even if non-empty.
    pub purge: bool,
    /// Entries for which this returns false are skipped and left at the source.
    pub filter: FilterFn,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            merge: false,
            purge: false,
            filter: Arc::new(|_, _| true),
        }
    }
}

impl fmt::Debug for MoveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveOptions")
            .field("overwrite", &self.overwrite)
            .field("merge", &self.merge)
            .field("purge", &self.purge)
            .finish_non_exhaustive()
    }
}

impl MoveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overwrite(mut self, yes: bool) -> Self {
        self.overwrite = yes;
        self
    }

    pub fn merge(mut self, yes: bool) -> Self {
        self.merge = yes;
        self
    }

    pub fn purge(mut self, yes: bool) -> Self {
        self.purge = yes;
        self
    }

    pub fn filter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Path, &Path) -> bool + Send + Sync + 'static,
    {
        self.filter = Arc::new(f);
        self
    }

    /// True when an existing destination is acceptable.
    #[inline]
    pub(crate) fn tolerates_existing(&self) -> bool {
        self.overwrite || self.merge
    }

    #[inline]
    pub(crate) fn accepts(&self, src: &Path, dst: &Path) -> bool {
        (self.filter)(src, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_and_accept_everything() {
        let o = MoveOptions::default();
        assert!(!o.overwrite && !o.merge && !o.purge);
        assert!(!o.tolerates_existing());
        assert!(o.accepts(Path::new("/a"), Path::new("/b")));
    }

    #[test]
    fn builder_sets_fields() {
        let o = MoveOptions::new()
            .overwrite(true)
            .merge(true)
            .purge(true)
            .filter(|src, _| src.extension().is_none_or(|e| e != "tmp"));
        assert!(o.overwrite && o.merge && o.purge);
        assert!(o.accepts(Path::new("a.txt"), Path::new("b.txt")));
        assert!(!o.accepts(Path::new("a.tmp"), Path::new("b.tmp")));
    }

    #[test]
    fn debug_omits_filter_closure() {
        let s = format!("{:?}", MoveOptions::new().merge(true));
        assert!(s.contains("merge: true"));
        assert!(!s.contains("filter"));
    }
}
