//! Font matching and query

/// CSS generic font family keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericFamily {
    Serif,
    SansSerif,
    Monospace,
    Cursive,
    Fantasy,
}

impl GenericFamily {
    /// Parse a generic keyword (`serif`, `sans-serif`, ...)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "serif" | "ui-serif" => Some(GenericFamily::Serif),
            "sans-serif" | "system-ui" | "ui-sans-serif" => Some(GenericFamily::SansSerif),
            "monospace" | "ui-monospace" => Some(GenericFamily::Monospace),
            "cursive" => Some(GenericFamily::Cursive),
            "fantasy" => Some(GenericFamily::Fantasy),
            _ => None,
        }
    }
}

/// One entry of a font family list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FamilyName {
    Named(String),
    Generic(GenericFamily),
}

impl FamilyName {
    pub(crate) fn to_fontdb(&self) -> fontdb::Family<'_> {
        match self {
            FamilyName::Named(name) => fontdb::Family::Name(name),
            FamilyName::Generic(GenericFamily::Serif) => fontdb::Family::Serif,
            FamilyName::Generic(GenericFamily::SansSerif) => fontdb::Family::SansSerif,
            FamilyName::Generic(GenericFamily::Monospace) => fontdb::Family::Monospace,
            FamilyName::Generic(GenericFamily::Cursive) => fontdb::Family::Cursive,
            FamilyName::Generic(GenericFamily::Fantasy) => fontdb::Family::Fantasy,
        }
    }
}

/// Font query for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontQuery {
    /// Font families to try (in order)
    pub families: Vec<FamilyName>,
}

impl FontQuery {
    /// Create a query from plain names; generic keywords are recognised
    pub fn new(families: &[&str]) -> Self {
        Self {
            families: families.iter().map(|f| classify(f, false)).collect(),
        }
    }

    /// Parse a CSS `font-family` list such as `"Pacifico", serif`.
    ///
    /// Quoted entries are always named families; bare entries are generic
    /// keywords when they spell one.
    pub fn from_css_list(list: &str) -> Self {
        let families = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| {
                let quoted = entry.len() >= 2
                    && ((entry.starts_with('"') && entry.ends_with('"'))
                        || (entry.starts_with('\'') && entry.ends_with('\'')));
                let name = if quoted { &entry[1..entry.len() - 1] } else { entry };
                let name = name.trim();
                (!name.is_empty()).then(|| classify(name, quoted))
            })
            .collect();
        Self { families }
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl Default for FontQuery {
    fn default() -> Self {
        Self::new(&["sans-serif"])
    }
}

fn classify(name: &str, quoted: bool) -> FamilyName {
    if !quoted {
        if let Some(generic) = GenericFamily::from_keyword(name) {
            return FamilyName::Generic(generic);
        }
    }
    FamilyName::Named(name.to_string())
}
