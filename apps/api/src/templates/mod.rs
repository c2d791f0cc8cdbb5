// Static prompt template library with placeholder substitution.

pub mod handlers;
pub mod library;
pub mod render;
