pub mod components;
pub mod employee_projects;
pub mod format;
