pub mod dimension;
pub mod report;
pub mod sentiment;

pub use dimension::*;
pub use report::*;
pub use sentiment::*;
