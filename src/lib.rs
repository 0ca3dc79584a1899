// src/lib.rs

pub mod domain;
pub mod error;
pub mod extractor;
pub mod lifecycle;
pub mod repository;
pub mod service;
pub mod settings;
pub mod test_utils;
