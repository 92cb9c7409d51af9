pub mod construct;
pub mod cpu;
pub mod input;
