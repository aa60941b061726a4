pub mod project_card;
pub mod projects_page;
pub mod settings_page;

pub use project_card::ProjectCard;
pub use projects_page::ProjectsPage;
pub use settings_page::SettingsPage;
