pub mod backend;
pub mod commands;
pub mod cpu;
