pub mod action_output;
pub mod changelog_file;
pub mod github;
pub mod llm;
