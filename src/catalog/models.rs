//! Task catalog models

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// A task category (one tab of the dashboard).
///
/// Closed set across all catalog profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Technical,
    OnPage,
    Content,
    Backlinks,
    Analytics,
    Local,
    Social,
    Reputation,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Technical,
        Category::OnPage,
        Category::Content,
        Category::Backlinks,
        Category::Analytics,
        Category::Local,
        Category::Social,
        Category::Reputation,
    ];

    /// Storage / wire key of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::OnPage => "onPage",
            Category::Content => "content",
            Category::Backlinks => "backlinks",
            Category::Analytics => "analytics",
            Category::Local => "local",
            Category::Social => "social",
            Category::Reputation => "reputation",
        }
    }

    /// Human-readable tab label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Technical => "Technical SEO",
            Category::OnPage => "On-Page SEO",
            Category::Content => "Content",
            Category::Backlinks => "Backlinks",
            Category::Analytics => "Analytics",
            Category::Local => "Local SEO",
            Category::Social => "Social",
            Category::Reputation => "Reputation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| TrackerError::UnknownCategory(s.to_string()))
    }
}

/// A single SEO task.
///
/// `id` is 1-based and unique only within its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Role label of whoever owns the task (e.g. "Developer")
    pub responsible: String,
    pub completed: bool,
}

impl Task {
    /// Create an open task
    pub fn new(id: u32, name: &str, description: &str, responsible: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            responsible: responsible.to_string(),
            completed: false,
        }
    }
}

/// The task catalog document: category → ordered task list.
///
/// Stored whole under one key and overwritten whole on every mutation.
/// Category order is the stored order and sets the rendering order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCatalog(IndexMap<Category, Vec<Task>>);

impl TaskCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the task list of a category, appended after those already present
    pub fn with_category(mut self, category: Category, tasks: Vec<Task>) -> Self {
        self.0.insert(category, tasks);
        self
    }

    /// Tasks of `category`; empty when the category is absent
    pub fn tasks(&self, category: Category) -> &[Task] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tasks of a category given by its string key; unknown keys yield an empty list
    pub fn tasks_by_key(&self, category: &str) -> &[Task] {
        category
            .parse::<Category>()
            .map(|c| self.tasks(c))
            .unwrap_or(&[])
    }

    /// Look up a task by `(category, id)`
    pub fn find(&self, category: Category, task_id: u32) -> Option<&Task> {
        self.tasks(category).iter().find(|t| t.id == task_id)
    }

    /// Mutable lookup by `(category, id)`
    pub fn find_mut(&mut self, category: Category, task_id: u32) -> Option<&mut Task> {
        self.0
            .get_mut(&category)
            .and_then(|tasks| tasks.iter_mut().find(|t| t.id == task_id))
    }

    /// Categories present, in stored order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.keys().copied()
    }

    /// `(category, tasks)` pairs in stored order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Task])> {
        self.0.iter().map(|(c, t)| (*c, t.as_slice()))
    }

    /// Every task of every category, flattened
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.0.values().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

static GENERIC_CATEGORIES: [Category; 5] = [
    Category::Technical,
    Category::OnPage,
    Category::Content,
    Category::Backlinks,
    Category::Analytics,
];

/// Which default catalog a dashboard seeds with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogProfile {
    /// General-purpose SEO checklist
    #[default]
    Generic,
    /// Brand checklist: the generic categories plus local, social and reputation
    Brand,
}

impl CatalogProfile {
    /// Categories seeded by this profile, in rendering order
    pub fn categories(&self) -> &'static [Category] {
        match self {
            CatalogProfile::Generic => &GENERIC_CATEGORIES,
            CatalogProfile::Brand => &Category::ALL,
        }
    }

    /// Key namespace used when none is configured
    pub fn default_namespace(&self) -> &'static str {
        match self {
            CatalogProfile::Generic => "seo",
            CatalogProfile::Brand => "brand-seo",
        }
    }
}

impl fmt::Display for CatalogProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogProfile::Generic => f.write_str("generic"),
            CatalogProfile::Brand => f.write_str("brand"),
        }
    }
}

impl FromStr for CatalogProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generic" => Ok(CatalogProfile::Generic),
            "brand" => Ok(CatalogProfile::Brand),
            other => Err(format!("unknown catalog profile '{}'", other)),
        }
    }
}
