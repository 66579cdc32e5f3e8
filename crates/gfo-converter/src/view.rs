/// Visual validity state of the URL field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

impl Validity {
    pub const VALID_CLASS: &'static str = "input-valid";
    pub const INVALID_CLASS: &'static str = "input-invalid";

    /// The class to set on the field, if any. The other one is removed.
    pub fn class(self) -> Option<&'static str> {
        match self {
            Validity::Untouched => None,
            Validity::Valid => Some(Self::VALID_CLASS),
            Validity::Invalid => Some(Self::INVALID_CLASS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultRow {
    Converted { original: String, derived: String },
    Downloadable { original: String, derived: String },
}

impl ResultRow {
    pub fn original(&self) -> &str {
        match self {
            ResultRow::Converted { original, .. } | ResultRow::Downloadable { original, .. } => original,
        }
    }

    pub fn derived(&self) -> &str {
        match self {
            ResultRow::Converted { derived, .. } | ResultRow::Downloadable { derived, .. } => derived,
        }
    }
}

/// Rendering surface the controller drives.
///
/// The browser binding implements this over the page document; tests use an
/// in-memory recorder.
pub trait View {
    fn field_value(&self) -> String;
    fn set_field_value(&mut self, value: &str);
    fn set_validity(&mut self, validity: Validity);
    /// Appends a row to the results container. Rows are never removed.
    fn append_row(&mut self, row: &ResultRow);
    /// Sets a page-level style variable such as `--primary`.
    fn set_style_variable(&mut self, name: &str, value: &str);
}
