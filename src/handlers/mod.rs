// src/handlers/mod.rs

pub mod assignments;
pub mod clients;
pub mod courses;
pub mod dashboard;
pub mod learning;
pub mod tracks;
pub mod users;
