pub mod collaborator;
pub mod task;

pub use collaborator::Entity as Collaborator;
pub use task::Entity as Task;
