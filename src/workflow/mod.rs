pub mod changelog;
pub mod fetch;
pub mod generate;
