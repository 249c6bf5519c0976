use std::fmt;

/// One run of formatted text.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedSection {
    /// The run's text.
    pub text: String,
    /// Optional font scale override.
    pub scale: Option<f64>,
    /// Optional font stack override.
    pub font_stack: Option<String>,
}

/// Rich text made of sections.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatted {
    /// Sections in display order.
    pub sections: Vec<FormattedSection>,
}

impl Formatted {
    /// A single unstyled section holding `text`.
    pub fn from_string(text: impl Into<String>) -> Self {
        Self {
            sections: vec![FormattedSection {
                text: text.into(),
                scale: None,
                font_stack: None,
            }],
        }
    }

    /// True when every section is empty.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.text.is_empty())
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.sections {
            f.write_str(&s.text)?;
        }
        Ok(())
    }
}

/// A reference to a sprite image by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Image name.
    pub name: String,
    /// Whether the image was present in the available image set.
    pub available: bool,
}

impl ResolvedImage {
    /// An image reference that has not been checked against available images.
    pub fn from_string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: false,
        }
    }
}

impl fmt::Display for ResolvedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
