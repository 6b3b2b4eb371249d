//! Form field value objects

/// Kind of input a field represents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    /// Drop-down with a fixed option list
    Select(Vec<String>),
    Textarea,
}

impl FieldKind {
    /// Whether the kind carries a format rule checked even on optional fields
    pub fn has_format_rule(&self) -> bool {
        matches!(self, FieldKind::Email | FieldKind::Tel)
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FieldKind::Textarea)
    }

    pub fn is_select(&self) -> bool {
        matches!(self, FieldKind::Select(_))
    }
}

/// Result of the last validation pass on a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationState {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub validation_state: ValidationState,
}

impl FormField {
    fn new(name: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            kind,
            required,
            value: String::new(),
            validation_state: ValidationState::Untouched,
        }
    }

    /// Create a new single-line text field
    pub fn text(name: &str, label: &str, required: bool) -> Self {
        Self::new(name, label, FieldKind::Text, required)
    }

    /// Create a new email field
    pub fn email(name: &str, label: &str, required: bool) -> Self {
        Self::new(name, label, FieldKind::Email, required)
    }

    /// Create a new phone field
    pub fn tel(name: &str, label: &str, required: bool) -> Self {
        Self::new(name, label, FieldKind::Tel, required)
    }

    /// Create a new select field; the value starts empty (no option chosen)
    pub fn select(name: &str, label: &str, options: &[&str], required: bool) -> Self {
        let options = options.iter().map(|o| o.to_string()).collect();
        Self::new(name, label, FieldKind::Select(options), required)
    }

    /// Create a new multi-line field
    pub fn textarea(name: &str, label: &str, required: bool) -> Self {
        Self::new(name, label, FieldKind::Textarea, required)
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn is_multiline(&self) -> bool {
        self.kind.is_multiline()
    }

    /// Text used by the renderer and screen readers when no label is set
    pub fn accessible_label(&self) -> &str {
        if !self.label.trim().is_empty() {
            &self.label
        } else if !self.placeholder.trim().is_empty() {
            &self.placeholder
        } else {
            "Field"
        }
    }

    /// Replace the value wholesale
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Push a character to the field value. Select fields ignore typed input.
    /// Returns true if the value changed.
    pub fn push_char(&mut self, c: char) -> bool {
        match self.kind {
            FieldKind::Select(_) => false,
            _ => {
                self.value.push(c);
                true
            }
        }
    }

    /// Remove the last character from the field value.
    /// Returns true if the value changed.
    pub fn pop_char(&mut self) -> bool {
        match self.kind {
            FieldKind::Select(_) => false,
            _ => self.value.pop().is_some(),
        }
    }

    /// Step through select options; `forward` picks the next one.
    /// The empty choice sits before the first option.
    pub fn cycle_option(&mut self, forward: bool) -> bool {
        let FieldKind::Select(options) = &self.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }
        let current = options.iter().position(|o| *o == self.value);
        let slots = options.len() + 1;
        let index = current.map(|i| i + 1).unwrap_or(0);
        let next = if forward {
            (index + 1) % slots
        } else {
            (index + slots - 1) % slots
        };
        self.value = if next == 0 {
            String::new()
        } else {
            options[next - 1].clone()
        };
        true
    }

    /// Clear the field value and forget the last validation result
    pub fn clear(&mut self) {
        self.value.clear();
        self.validation_state = ValidationState::Untouched;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Select(_) if self.value.is_empty() => "-- choose --".to_string(),
            FieldKind::Select(_) => format!("< {} >", self.value),
            _ => self.value.clone(),
        }
    }
}
