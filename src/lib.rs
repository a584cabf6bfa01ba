pub mod chip8;
pub mod config;
pub mod definitions;
pub mod devices;
pub mod display;
pub mod memory;
pub mod opcode;
pub mod registers;
pub mod resources;
pub mod scheduler;
pub mod timer;
mod error;

// reexporting for convinience
mod runner;
pub use error::*;
pub use runner::*;
