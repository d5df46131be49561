//! Font metadata known to the playground.
//!
//! Loading font files is the host's job; the engine only needs each family's
//! sample text and CSS family names to build a grid.

use fnv::FnvHashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct FontInfo {
    pub name: String,
    pub sample_text: String,
    pub styles: Vec<String>,
    pub css_families: Vec<String>,
    pub author: String,
    pub year: u16,
}

impl FontInfo {
    /// CSS family for a style index, falling back to the first style.
    pub fn family(&self, style_index: usize) -> Option<&str> {
        self.css_families
            .get(style_index)
            .or_else(|| self.css_families.first())
            .map(String::as_str)
    }
}

#[derive(Clone, Debug, Default)]
pub struct FontCatalog {
    fonts: FnvHashMap<String, FontInfo>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding only the system sans-serif face, used when no font
    /// metadata could be loaded.
    pub fn system_fallback() -> Self {
        let mut catalog = Self::new();
        catalog.insert(FontInfo {
            name: "Sans-serif".to_string(),
            sample_text: "Typography playground - fonts.json not loaded".to_string(),
            styles: vec!["Regular".to_string()],
            css_families: vec!["sans-serif".to_string()],
            author: "System".to_string(),
            year: 0,
        });
        catalog
    }

    pub fn insert(&mut self, font: FontInfo) {
        self.fonts.insert(font.name.clone(), font);
    }

    pub fn get(&self, name: &str) -> Option<&FontInfo> {
        self.fonts.get(name)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Names ordered newest year first, then alphabetically.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut fonts: Vec<&FontInfo> = self.fonts.values().collect();
        fonts.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.name.cmp(&b.name)));
        fonts.into_iter().map(|f| f.name.as_str()).collect()
    }

    pub fn newest(&self) -> Option<&FontInfo> {
        self.sorted_names().first().and_then(|n| self.get(n))
    }

    /// The named font, or the newest one when the name is unknown.
    pub fn resolve(&self, name: &str) -> Option<&FontInfo> {
        self.get(name).or_else(|| self.newest())
    }
}
