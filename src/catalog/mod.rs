//! Task catalog: categories, default catalogs, completion math and the
//! repository that reads and toggles the stored catalog.

pub mod completion;
pub mod defaults;
mod models;
mod repository;

pub use completion::{
    calculate_completion, calculate_completion_for, calculate_overall_completion, percentage,
    summarize, CategoryCompletion, CompletionSummary,
};
pub use defaults::{default_catalog, default_tasks};
pub use models::{CatalogProfile, Category, Task, TaskCatalog};
pub use repository::TaskRepository;
