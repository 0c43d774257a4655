pub mod commit;
pub mod prompt;
pub mod week;
pub mod week_group;
