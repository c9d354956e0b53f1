// src/handlers/mod.rs

pub mod auth;
pub mod courses;
pub mod exams;
pub mod index;
pub mod questions;
pub mod results;
pub mod students;
