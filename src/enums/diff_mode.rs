use clap::ValueEnum;

/// Which diff generator the `diff` command runs when no structured change
/// list is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffMode {
    /// Greedy line-position-synchronized comparison
    Line,
    /// Word-level diff for inline markup
    Word,
}
