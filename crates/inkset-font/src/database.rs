//! Font database for loading and managing fonts

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use fontdb::Database;

use super::{FontId, FontQuery};
use crate::{FontError, Result};

/// Font database shared between fetchers and measurement surfaces.
///
/// inkset runs on a single UI task queue, so sharing is `Rc`-based.
pub type SharedFontDatabase = Rc<RefCell<FontDatabase>>;

/// Font database for loading and matching fonts
pub struct FontDatabase {
    db: Database,
}

impl FontDatabase {
    /// Create a new empty font database
    pub fn new() -> Self {
        Self {
            db: Database::new(),
        }
    }

    /// Create a font database with system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Wrap the database for sharing
    pub fn shared(self) -> SharedFontDatabase {
        Rc::new(RefCell::new(self))
    }

    /// Load a font from file.
    ///
    /// Fails with `Io` when the file cannot be read and with `FontParsing`
    /// when it holds no usable face.
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        let before = self.db.len();
        self.db.load_font_file(path)?;
        if self.db.len() == before {
            return Err(FontError::FontParsing(path.display().to_string()));
        }
        Ok(())
    }

    /// Find a font matching the query
    pub fn query(&self, query: &FontQuery) -> Option<FontId> {
        let families: Vec<fontdb::Family<'_>> =
            query.families.iter().map(|f| f.to_fontdb()).collect();

        self.db
            .query(&fontdb::Query {
                families: &families,
                weight: fontdb::Weight::NORMAL,
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            })
            .map(FontId)
    }

    /// Whether any face carries this family name (case-insensitive)
    pub fn has_family(&self, family: &str) -> bool {
        self.db.faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(family))
        })
    }

    /// Get font data by ID
    pub fn with_face_data<R>(&self, id: FontId, f: impl FnOnce(&[u8], u32) -> R) -> Option<R> {
        self.db.with_face_data(id.0, f)
    }

    /// Number of loaded faces
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.db.len() == 0
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}
