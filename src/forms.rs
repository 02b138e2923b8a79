//! New-joke form validation.
use serde::{Deserialize, Serialize};

pub const FORM_ERROR: &str = "Form not submitted correctly.";
pub const CONTENT_TOO_SHORT: &str = "That joke is too short";
pub const NAME_TOO_SHORT: &str = "That joke's name is too short";

const MIN_NAME_LEN: usize = 2;
const MIN_CONTENT_LEN: usize = 10;

/// Raw submission. Fields are optional so a missing one becomes a form
/// error instead of an extractor rejection.
#[derive(Debug, Default)]
pub struct JokeForm {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl JokeForm {
    /// Builds the form from decoded key/value pairs. A repeated key keeps
    /// its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut form.name,
                "content" => &mut form.content,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        form
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct JokeFields {
    pub name: String,
    pub content: String,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub content: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none()
    }
}

/// What the form view needs to re-display a rejected submission.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionData {
    pub form_error: Option<&'static str>,
    pub field_errors: Option<FieldErrors>,
    pub fields: Option<JokeFields>,
}

impl ActionData {
    pub fn form_error() -> Self {
        Self {
            form_error: Some(FORM_ERROR),
            ..Self::default()
        }
    }
}

/// Length in UTF-16 code units, the unit browsers use for form input.
fn input_len(value: &str) -> usize {
    value.encode_utf16().count()
}

pub fn validate_joke_name(name: &str) -> Option<&'static str> {
    (input_len(name) < MIN_NAME_LEN).then_some(NAME_TOO_SHORT)
}

pub fn validate_joke_content(content: &str) -> Option<&'static str> {
    (input_len(content) < MIN_CONTENT_LEN).then_some(CONTENT_TOO_SHORT)
}

impl JokeForm {
    pub fn validate(self) -> Result<JokeFields, ActionData> {
        let (Some(name), Some(content)) = (self.name, self.content) else {
            return Err(ActionData::form_error());
        };

        let field_errors = FieldErrors {
            name: validate_joke_name(&name),
            content: validate_joke_content(&content),
        };
        let fields = JokeFields { name, content };

        if field_errors.is_empty() {
            Ok(fields)
        } else {
            Err(ActionData {
                form_error: None,
                field_errors: Some(field_errors),
                fields: Some(fields),
            })
        }
    }
}
