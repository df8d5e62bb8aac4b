//! Integration and fixture-driven tests for the Inko compiler front end.

mod lang_files;
mod parser;
mod tir;
