pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod keys;
pub mod lexer;
pub mod list;
pub mod logging;
pub mod options;
pub mod parser;
pub mod ports;
pub mod session;
