// src/models/mod.rs

pub mod course;
pub mod exam;
pub mod question;
pub mod result;
pub mod user;
