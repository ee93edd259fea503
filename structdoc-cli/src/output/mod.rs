pub mod render;
pub mod schema;
pub mod writer;
