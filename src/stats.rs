//! Counters gathered while searching.

/// What a single `solve` call did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States whose successors were generated.
    pub expanded: usize,
    /// Successors produced by expansions, before filtering visited ones.
    pub generated: usize,
    /// States refused because the puzzle asked to prune them.
    pub pruned: usize,
    /// States refused because they were already visited.
    pub skipped: usize,
    /// Largest size reached by the stack or queue of pending work.
    pub max_frontier: usize,
    /// Fingerprints in the registry when the search stopped.
    pub visited: usize,
}

impl SearchStats {
    #[inline(always)]
    pub(crate) fn observe_frontier(&mut self, len: usize) {
        self.max_frontier = self.max_frontier.max(len);
    }

    pub fn write_stats<W: std::io::Write>(&self, mut out: W, node_size: usize) -> std::io::Result<()> {
        use size::Size;
        use thousands::Separable;

        writeln!(out, "Search Stats:")?;
        writeln!(
            out,
            "  - Expanded:  {}",
            self.expanded.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Generated: {}",
            self.generated.separate_with_commas()
        )?;
        writeln!(out, "  - Pruned:    {}", self.pruned.separate_with_commas())?;
        writeln!(out, "  - Skipped:   {}", self.skipped.separate_with_commas())?;
        writeln!(
            out,
            "  - |Visited|: {}",
            self.visited.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - |Frontier|*: {} ({})",
            self.max_frontier.separate_with_commas(),
            Size::from_bytes(self.max_frontier * node_size)
        )?;

        Ok(())
    }
}
