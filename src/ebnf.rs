//! Main module for ebnf2bnf library functionality

pub mod config;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod session;
