/// What to do when two packages declare the same qualified alias with
/// different underlying types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasConflictPolicy {
    /// Fail the run with [`ResolveError::DuplicateAlias`](crate::ResolveError::DuplicateAlias).
    #[default]
    Reject,
    /// Keep the declaration from the package that comes last in the input.
    LastWins,
}
