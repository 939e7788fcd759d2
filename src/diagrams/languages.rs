//! Diagram language registry: which fence tags compile to diagrams.

/// A diagram language recognised in fence info strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramLanguage {
    /// The fenced code block tag (e.g., "mermaid").
    pub tag: String,
    /// Display name (e.g., "Mermaid").
    pub display_name: String,
    /// Whether the built-in native engine can compile it.
    pub native: bool,
}

impl DiagramLanguage {
    /// A language known only by its tag.
    pub fn custom(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            display_name: tag.to_string(),
            native: false,
        }
    }
}

/// Languages with display metadata. Any configured tag not listed here is
/// still accepted through [`DiagramLanguage::custom`].
pub fn known_diagram_languages() -> Vec<DiagramLanguage> {
    vec![
        DiagramLanguage {
            tag: "mermaid".into(),
            display_name: "Mermaid".into(),
            native: true,
        },
        DiagramLanguage {
            tag: "plantuml".into(),
            display_name: "PlantUML".into(),
            native: false,
        },
        DiagramLanguage {
            tag: "graphviz".into(),
            display_name: "GraphViz".into(),
            native: false,
        },
        DiagramLanguage {
            tag: "dot".into(),
            display_name: "GraphViz".into(),
            native: false,
        },
        DiagramLanguage {
            tag: "d2".into(),
            display_name: "D2".into(),
            native: false,
        },
    ]
}

/// The set of fence tags treated as diagrams.
#[derive(Debug, Clone, Default)]
pub struct DiagramRegistry {
    languages: Vec<DiagramLanguage>,
}

impl DiagramRegistry {
    /// Build from configured tags, attaching known metadata where available.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        let known = known_diagram_languages();
        let languages = tags
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(|tag| {
                known
                    .iter()
                    .find(|l| l.tag.eq_ignore_ascii_case(tag))
                    .cloned()
                    .unwrap_or_else(|| DiagramLanguage::custom(tag))
            })
            .collect();
        Self { languages }
    }

    /// A registry that matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a language by fence tag (case-insensitive).
    pub fn find(&self, tag: &str) -> Option<&DiagramLanguage> {
        self.languages
            .iter()
            .find(|l| l.tag.eq_ignore_ascii_case(tag))
    }

    pub fn is_diagram(&self, tag: &str) -> bool {
        self.find(tag).is_some()
    }

    pub fn languages(&self) -> &[DiagramLanguage] {
        &self.languages
    }
}
