pub mod branch_name;
pub mod revision;

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
