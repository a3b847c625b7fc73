//! shellnav library exports: the sans-IO screen manager and its terminal host

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
