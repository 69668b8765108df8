pub mod dispatch;
pub mod install;
pub mod practice;
pub mod start;

pub use dispatch::{run, Collaborators, HttpCollaborators};
