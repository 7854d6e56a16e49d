mod content;
mod selection;
mod user;

pub use content::*;
pub use selection::*;
pub use user::*;
