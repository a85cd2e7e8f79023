/// One of the attributes a specification entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecAttr {
    Min,
    Max,
    Default,
    Type,
}

/// The parsed specification of a single configuration key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecEntry {
    /// Full key path, outermost section first.
    pub path: Vec<String>,
    pub value_type: String,
    pub min: Option<String>,
    pub max: Option<String>,
    pub default: Option<String>,
}

impl SpecEntry {
    pub fn new(path: Vec<String>, value_type: impl Into<String>) -> Self {
        Self {
            path,
            value_type: value_type.into(),
            min: None,
            max: None,
            default: None,
        }
    }

    /// Returns the entry's key path joined with `.`.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    pub fn get(&self, attr: SpecAttr) -> Option<&str> {
        match attr {
            SpecAttr::Min => self.min.as_deref(),
            SpecAttr::Max => self.max.as_deref(),
            SpecAttr::Default => self.default.as_deref(),
            SpecAttr::Type => Some(&self.value_type),
        }
    }
}
