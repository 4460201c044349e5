use vodca::{AsRefln, Fromln};

/// Free-text fragment matched anywhere inside a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct SearchKeyword(String);

impl SearchKeyword {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self(keyword.into())
    }

    pub fn pattern(&self) -> String {
        format!("%{}%", self.0)
    }
}
