mod auth_service;
mod bookmarks;
mod catalog;
mod recommendations;
mod roles;

pub use auth_service::*;
pub use bookmarks::*;
pub use catalog::*;
pub use recommendations::*;
pub use roles::*;
