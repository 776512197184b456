// src/test/mod.rs

mod assertion_test;
mod selector_test;
mod support;
