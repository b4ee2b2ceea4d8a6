// src/lib.rs

pub mod config;
pub mod extract;
pub mod fetch;
pub mod observation;
pub mod output;
pub mod pipeline;
pub mod workbook;

#[cfg(test)]
mod fixtures;
