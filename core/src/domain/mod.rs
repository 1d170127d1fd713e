pub mod classification;
pub mod common;
pub mod health;
pub mod recipe;
