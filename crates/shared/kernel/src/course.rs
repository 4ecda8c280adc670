//! Validated, indexed course catalog.
//!
//! A [`Course`] wraps a [`Catalog`] after checking identifier uniqueness and adds the
//! lookups and previous/next navigation the presentation needs. It is immutable once
//! built and cheap to clone.

use fxhash::{FxHashMap, FxHashSet};
use lectern_domain::{Catalog, Lesson, Module};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

const DEFAULT_CATALOG: &str = include_str!("../assets/default_catalog.json");

#[lectern_derive::lectern_error]
pub enum CatalogError {
    #[error("Catalog I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Malformed catalog{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Duplicate identifier{}: {message}", format_context(.context))]
    DuplicateId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Where a lesson sits in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonPosition {
    pub module: usize,
    pub lesson: usize,
    /// Index in the flattened, catalog-wide lesson order.
    pub flat: usize,
}

#[derive(Debug)]
struct CourseInner {
    catalog: Catalog,
    order: Vec<LessonPosition>,
    lessons: FxHashMap<String, LessonPosition>,
    modules: FxHashMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct Course {
    inner: Arc<CourseInner>,
}

impl Course {
    /// Validates and indexes `catalog`.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateId`] for a repeated module id, a lesson id used twice
    /// anywhere in the catalog, or a repeated button id within one lesson.
    pub fn new(catalog: Catalog) -> Result<Self, CatalogError> {
        let mut modules = FxHashMap::default();
        let mut lessons = FxHashMap::default();
        let mut order = Vec::new();

        for (m, module) in catalog.modules.iter().enumerate() {
            if modules.insert(module.id.clone(), m).is_some() {
                return Err(duplicate("module", &module.id));
            }

            for (l, lesson) in module.lessons.iter().enumerate() {
                let position = LessonPosition { module: m, lesson: l, flat: order.len() };
                if lessons.insert(lesson.id.clone(), position).is_some() {
                    return Err(duplicate("lesson", &lesson.id));
                }
                check_buttons(lesson)?;
                order.push(position);
            }
        }

        debug!(modules = modules.len(), lessons = order.len(), "Catalog indexed");
        Ok(Self { inner: Arc::new(CourseInner { catalog, order, lessons, modules }) })
    }

    /// The catalog compiled into the binary.
    ///
    /// # Errors
    /// Fails only if the embedded document is itself invalid.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG)
    }

    /// # Errors
    /// Returns [`CatalogError::Parse`] for malformed JSON, or any error of [`Course::new`].
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(document)?;
        Self::new(catalog)
    }

    /// Reads a catalog file, or the embedded catalog when `path` is `None`.
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] if the file cannot be read, or any error of
    /// [`Course::from_json`].
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let Some(path) = path else {
            info!("Using embedded catalog");
            return Self::embedded();
        };

        let document = std::fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()))?;
        let course = Self::from_json(&document)?;
        info!(
            path = %path.display(),
            modules = course.modules().len(),
            lessons = course.total_lessons(),
            "Catalog loaded"
        );
        Ok(course)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.inner.catalog.modules
    }

    /// Lessons in display order across all modules.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.inner.catalog.lessons()
    }

    #[must_use]
    pub fn total_lessons(&self) -> usize {
        self.inner.order.len()
    }

    #[must_use]
    pub fn contains_lesson(&self, lesson_id: &str) -> bool {
        self.inner.lessons.contains_key(lesson_id)
    }

    #[must_use]
    pub fn module(&self, module_id: &str) -> Option<&Module> {
        self.inner.modules.get(module_id).map(|&m| &self.inner.catalog.modules[m])
    }

    #[must_use]
    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.position(lesson_id).map(|p| self.at(p))
    }

    /// The module containing `lesson_id`.
    #[must_use]
    pub fn module_of(&self, lesson_id: &str) -> Option<&Module> {
        self.position(lesson_id).map(|p| &self.inner.catalog.modules[p.module])
    }

    #[must_use]
    pub fn position(&self, lesson_id: &str) -> Option<LessonPosition> {
        self.inner.lessons.get(lesson_id).copied()
    }

    /// The first lesson of the course, if it has any.
    #[must_use]
    pub fn first_lesson(&self) -> Option<&Lesson> {
        self.inner.order.first().map(|&p| self.at(p))
    }

    /// The lesson before `lesson_id`, crossing module boundaries.
    #[must_use]
    pub fn previous(&self, lesson_id: &str) -> Option<&Lesson> {
        let flat = self.position(lesson_id)?.flat;
        let prev = flat.checked_sub(1)?;
        self.inner.order.get(prev).map(|&p| self.at(p))
    }

    /// The lesson after `lesson_id`, crossing module boundaries.
    #[must_use]
    pub fn next(&self, lesson_id: &str) -> Option<&Lesson> {
        let flat = self.position(lesson_id)?.flat;
        self.inner.order.get(flat + 1).map(|&p| self.at(p))
    }

    fn at(&self, position: LessonPosition) -> &Lesson {
        &self.inner.catalog.modules[position.module].lessons[position.lesson]
    }
}

fn check_buttons(lesson: &Lesson) -> Result<(), CatalogError> {
    let mut seen = FxHashSet::default();
    for button in &lesson.buttons {
        if !seen.insert(button.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                message: button.id.clone().into(),
                context: Some(format!("button in lesson {}", lesson.id).into()),
            });
        }
    }
    Ok(())
}

fn duplicate(kind: &'static str, id: &str) -> CatalogError {
    CatalogError::DuplicateId { message: id.to_owned().into(), context: Some(kind.into()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_is_valid() {
        let course = Course::embedded().unwrap();
        assert!(course.total_lessons() > 0);
        assert_eq!(course.total_lessons(), course.lessons().count());
    }

    #[test]
    fn duplicate_button_ids_are_rejected() {
        let doc = r#"{"modules":[{"id":"m","title":"M","lessons":[{"id":"l","title":"L",
            "buttons":[{"id":"b","label":"x","url":"u"},{"id":"b","label":"y","url":"v"}]}]}]}"#;
        let err = Course::from_json(doc).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { .. }));
    }
}
