pub mod project;
pub mod scoring;
pub mod signals;
