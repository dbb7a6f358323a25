pub mod models;
pub mod sse;
