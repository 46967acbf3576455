//! Generic item form that resource types augment with their own fields.

/// The kind of input a form field renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-file upload picker with a list of accepted extensions.
    FilePicker { accepted: Vec<String> },
    /// Plain text input.
    Text,
    /// URL input.
    Url,
}

/// One input field on the item form.
#[derive(Debug, Clone)]
pub struct FormField {
    /// Field name; for type-specific fields this matches a declared property.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Input kind.
    pub kind: FieldKind,
    /// Whether the field must be filled to submit.
    pub required: bool,
    /// Optional help text.
    pub help: Option<String>,
}

/// An item creation/edit form.
///
/// Resource types add their fields and validation rules in `add_to_form`;
/// the host rendering layer consumes the field list afterwards.
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    fields: Vec<FormField>,
    notes: Vec<String>,
}

impl ItemForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file picker field.
    pub fn add_file_picker(&mut self, name: impl Into<String>, label: impl Into<String>, accepted: &[&str]) {
        self.fields.push(FormField {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::FilePicker {
                accepted: accepted.iter().map(|s| s.to_string()).collect(),
            },
            required: false,
            help: None,
        });
    }

    /// Add a text field.
    pub fn add_text(&mut self, name: impl Into<String>, label: impl Into<String>) {
        self.fields.push(FormField {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Text,
            required: false,
            help: None,
        });
    }

    /// Add a URL field.
    pub fn add_url(&mut self, name: impl Into<String>, label: impl Into<String>) {
        self.fields.push(FormField {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Url,
            required: false,
            help: None,
        });
    }

    /// Mark a field as required. Returns `false` if no such field exists.
    pub fn require(&mut self, name: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.required = true;
                true
            }
            None => false,
        }
    }

    /// Attach help text to a field. Returns `false` if no such field exists.
    pub fn add_help(&mut self, name: &str, help: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.help = Some(help.into());
                true
            }
            None => false,
        }
    }

    /// Add an informational note (e.g. links to already stored files).
    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All fields, in the order they were added.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// All informational notes.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}
