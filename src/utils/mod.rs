pub mod git;
pub mod which;
