//! API resource endpoints

pub use videos::Videos;

mod videos;
