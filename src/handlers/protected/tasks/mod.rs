pub mod add;
pub mod delete;
pub mod get;
pub mod update;

// Re-export handler functions for use in routing
pub use add::add_task;
pub use delete::delete_task;
pub use get::{get_all_tasks, get_task};
pub use update::update_task;
