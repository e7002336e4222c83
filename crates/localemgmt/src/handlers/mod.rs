pub mod error;
pub mod health;
pub mod items;
pub mod meta;
pub mod version;

pub use error::AppError;
