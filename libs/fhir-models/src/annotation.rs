//! Annotation element

use crate::choice::AnnotationAuthor;
use crate::element::Extensions;
use crate::error::Result;

/// A free-text note with provenance
///
/// Carries a choice position, so the codec maps it through a wire twin rather
/// than serde derive.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Who made the note
    pub author: Option<AnnotationAuthor>,

    /// When the note was made
    pub time: Option<String>,

    /// The note text, as markdown
    pub text: String,

    /// Additional content beyond core fields
    pub extensions: Extensions,
}

impl Annotation {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            author: None,
            time: None,
            text: text.into(),
            extensions: Extensions::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(author) = &self.author {
            author.validate()?;
        }
        Ok(())
    }
}
