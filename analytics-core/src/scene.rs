//! Scene display list produced by chart renderers.

use serde::{Deserialize, Serialize};

use crate::{Color, CoreError, CoreResult, Mark, Role};

/// A fixed-size scene: background color plus marks in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Color the canvas is cleared to before any mark is painted.
    background: Color,
    /// Marks, painted first to last.
    marks: Vec<Mark>,
}

impl Scene {
    /// Create a new empty scene with the given size.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            marks: Vec::new(),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Background color.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Append a mark on top of the existing ones.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// All marks in paint order.
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Marks with the given role, in paint order.
    pub fn marks_with(&self, role: Role) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(move |m| m.role() == role)
    }

    /// Number of marks with the given role.
    #[must_use]
    pub fn count(&self, role: Role) -> usize {
        self.marks_with(role).count()
    }

    /// Texts carried by marks of the given role.
    pub fn texts(&self, role: Role) -> impl Iterator<Item = &str> {
        self.marks_with(role).filter_map(Mark::text)
    }

    /// The empty-state message, if the scene is one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.texts(Role::Message).next()
    }

    /// Get the number of marks in the scene.
    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(CoreError::Serialization)
    }

    /// Deserialize a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(CoreError::Serialization)
    }
}
