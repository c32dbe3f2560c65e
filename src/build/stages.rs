pub mod assets;
pub mod compose;
pub mod navigate;
pub mod parse;
pub mod postprocess;
pub mod write;
