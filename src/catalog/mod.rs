pub mod loader;
pub mod models;
pub mod validation;


pub use loader::*;
pub use models::*;
pub use validation::*;
