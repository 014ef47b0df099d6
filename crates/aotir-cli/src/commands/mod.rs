pub mod encode;
pub mod program_loader;
pub mod stats;
