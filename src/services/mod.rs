pub mod language_model;
pub mod version_control;

#[cfg(test)]
pub mod stub;

pub use language_model::LanguageModelService;
pub use version_control::VersionControlService;
