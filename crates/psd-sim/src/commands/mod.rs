pub mod encode;
pub mod moments;
pub mod remap;
pub mod summary;
