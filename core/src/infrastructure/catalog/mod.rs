mod json_catalog;

pub use json_catalog::{JsonRecipeCatalog, read_recipes, write_recipes};
