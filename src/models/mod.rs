// Re-export all model types
pub use self::errors::*;
pub use self::filters::*;
pub use self::restaurant::*;

mod errors;
mod filters;
mod restaurant;
