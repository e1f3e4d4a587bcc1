#[derive(Debug, thiserror::Error)]
pub enum CursorError {
    #[error("No current match: call match_start or search first")]
    NoMatch,
    #[error("No such group: {group} (pattern has {groups} groups)")]
    NoSuchGroup { group: usize, groups: usize },
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
