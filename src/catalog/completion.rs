//! Completion percentages
//!
//! Pure functions over a `TaskCatalog`. Percentages are integers in 0..=100,
//! rounded half-up: 37.5 becomes 38 and 50 stays 50.

use super::models::{Category, Task, TaskCatalog};
use serde::{Deserialize, Serialize};

/// `round_half_up(100 * completed / total)`, or 0 when `total` is 0.
///
/// Integer arithmetic: `(200k + n) / 2n == floor(100k/n + 1/2)`.
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    ((200 * completed + total) / (2 * total)) as u8
}

fn ratio<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> (usize, usize) {
    tasks
        .into_iter()
        .fold((0, 0), |(done, total), task| {
            (done + usize::from(task.completed), total + 1)
        })
}

/// Completion of one category; absent or empty categories are 0
pub fn calculate_completion_for(catalog: &TaskCatalog, category: Category) -> u8 {
    let (done, total) = ratio(catalog.tasks(category));
    percentage(done, total)
}

/// Completion of a category named by its string key; unknown keys are 0
pub fn calculate_completion(catalog: &TaskCatalog, category: &str) -> u8 {
    category
        .parse::<Category>()
        .map(|c| calculate_completion_for(catalog, c))
        .unwrap_or(0)
}

/// Completion over every task of every category.
///
/// Weighted by task count: a category with 20 tasks moves the result 20 times
/// as much as a category with one.
pub fn calculate_overall_completion(catalog: &TaskCatalog) -> u8 {
    let (done, total) = ratio(catalog.all_tasks());
    percentage(done, total)
}

/// Per-category completion line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCompletion {
    pub category: Category,
    pub label: String,
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

/// Completion of the whole catalog, broken down by category in rendering order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub overall: u8,
    pub completed: usize,
    pub total: usize,
    pub categories: Vec<CategoryCompletion>,
}

pub fn summarize(catalog: &TaskCatalog) -> CompletionSummary {
    let categories: Vec<CategoryCompletion> = catalog
        .iter()
        .map(|(category, tasks)| {
            let (completed, total) = ratio(tasks);
            CategoryCompletion {
                category,
                label: category.label().to_string(),
                completed,
                total,
                percent: percentage(completed, total),
            }
        })
        .collect();

    let completed = categories.iter().map(|c| c.completed).sum();
    let total = categories.iter().map(|c| c.total).sum();

    CompletionSummary {
        overall: percentage(completed, total),
        completed,
        total,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(total: u32, done: u32) -> Vec<Task> {
        (1..=total)
            .map(|id| {
                let mut task = Task::new(id, &format!("task {}", id), "", "SEO Specialist");
                task.completed = id <= done;
                task
            })
            .collect()
    }

    fn catalog_with(category: Category, total: u32, done: u32) -> TaskCatalog {
        TaskCatalog::new().with_category(category, tasks(total, done))
    }

    #[test]
    fn test_empty_category_is_zero() {
        let catalog = catalog_with(Category::Technical, 0, 0);
        assert_eq!(calculate_completion(&catalog, "technical"), 0);
        assert_eq!(calculate_completion(&catalog, "content"), 0);
        assert_eq!(calculate_overall_completion(&TaskCatalog::new()), 0);
    }

    #[test]
    fn test_unknown_category_is_zero() {
        let catalog = catalog_with(Category::Technical, 4, 4);
        assert_eq!(calculate_completion(&catalog, "does-not-exist"), 0);
    }

    #[test]
    fn test_rounds_half_up() {
        // 37.5 -> 38
        let catalog = catalog_with(Category::Technical, 8, 3);
        assert_eq!(calculate_completion(&catalog, "technical"), 38);
        // exact half of the tasks -> 50
        let catalog = catalog_with(Category::Technical, 8, 4);
        assert_eq!(calculate_completion(&catalog, "technical"), 50);
        // 12.5 -> 13, 62.5 -> 63
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(5, 8), 63);
    }

    #[test]
    fn test_thirds() {
        assert_eq!(
            calculate_completion(&catalog_with(Category::Content, 3, 1), "content"),
            33
        );
        assert_eq!(
            calculate_completion(&catalog_with(Category::Content, 3, 2), "content"),
            67
        );
    }

    #[test]
    fn test_bounds() {
        assert_eq!(percentage(0, 7), 0);
        assert_eq!(percentage(7, 7), 100);
        for total in 1..=50 {
            for done in 0..=total {
                let expected = ((100.0 * done as f64) / total as f64 + 0.5).floor() as u8;
                assert_eq!(percentage(done, total), expected, "{}/{}", done, total);
            }
        }
    }

    #[test]
    fn test_overall_is_weighted_by_task_count() {
        let catalog = TaskCatalog::new()
            .with_category(Category::Technical, tasks(8, 0))
            .with_category(Category::Backlinks, tasks(2, 2));

        // 2 of 10 tasks, not the 50% a per-category average would give
        assert_eq!(calculate_overall_completion(&catalog), 20);
    }

    #[test]
    fn test_summary_breakdown() {
        let catalog = TaskCatalog::new()
            .with_category(Category::Backlinks, tasks(2, 2))
            .with_category(Category::Technical, tasks(8, 3));

        let summary = summarize(&catalog);
        assert_eq!(summary.overall, 50);
        assert_eq!(summary.completed, 5);
        assert_eq!(summary.total, 10);
        assert_eq!(summary.categories.len(), 2);
        // Catalog order, not enum order
        assert_eq!(summary.categories[0].category, Category::Backlinks);
        assert_eq!(summary.categories[0].percent, 100);
        assert_eq!(summary.categories[1].category, Category::Technical);
        assert_eq!(summary.categories[1].percent, 38);
    }
}
