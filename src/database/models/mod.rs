pub mod task;
pub mod user;

pub use task::{RecurringRule, Status, Task};
pub use user::User;
