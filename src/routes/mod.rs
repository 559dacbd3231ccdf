pub mod admin;
pub mod candidate;
pub mod health;
pub mod questions;
pub mod upload;
