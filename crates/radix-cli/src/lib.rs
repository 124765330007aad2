pub mod commands;
pub mod output;
pub mod trace_init;
