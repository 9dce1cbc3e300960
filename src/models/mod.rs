// src/models/mod.rs

pub mod assignment;
pub mod client;
pub mod course;
pub mod progress;
pub mod quiz;
pub mod track;
pub mod user;
