//! UI Components
//!
//! Reusable Leptos components.

mod collection_manager;
mod dashboard_tab_bar;
mod delete_confirm_button;
mod field_input;
mod form_fields;
mod freelancer_wizard;
mod get_started_wizard;
mod intake_forms;
mod log_viewer;
mod pls_advantage_editor;
mod section_images_editor;
mod section_manager;
mod submissions_inbox;
mod toast_host;
mod wizard_shell;

pub use dashboard_tab_bar::DashboardTabBar;
pub use delete_confirm_button::DeleteConfirmButton;
pub use field_input::FieldInput;
pub use freelancer_wizard::FreelancerWizard;
pub use get_started_wizard::GetStartedWizard;
pub use intake_forms::IntakeDashboard;
pub use log_viewer::LogViewer;
pub use pls_advantage_editor::PlsAdvantageEditor;
pub use section_images_editor::SectionImagesEditor;
pub use section_manager::SectionsDashboard;
pub use submissions_inbox::SubmissionsInbox;
pub use toast_host::ToastHost;
