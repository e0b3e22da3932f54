//! Section Record Contract
//!
//! The generic editor only ever touches records through this trait: field
//! edits arrive as `(name, raw string)` pairs from form inputs and each record
//! type decides how to coerce them.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::order::Ordered;
use crate::section::SectionKind;
use crate::validation::{require, ValidationErrors};

/// How a field is edited and checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    ImageUrl,
    Icon,
    Link,
    /// Integer input, coerced on edit
    Number,
    /// Checkbox, "true"/"false"
    Toggle,
    /// One entry per line
    Lines,
}

/// Static description of one editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name (camelCase), also the key used by `field`/`set_field`
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown field `{0}`")]
    Unknown(String),
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl FieldError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FieldError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// A content record that lives in an ordered section collection
pub trait SectionRecord:
    Ordered + Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const SECTION: SectionKind;

    /// Fresh record appended by the editor's `add`
    fn placeholder(order: u32) -> Self;

    fn fields() -> &'static [FieldSpec];

    /// Persisted identifier; `None` for records never saved
    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: Option<String>);

    /// Current value of a field rendered as a string
    fn field(&self, name: &str) -> Option<String>;

    /// Replace one field from its raw input string
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError>;

    /// Required-field check run before a save leaves the client
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for spec in Self::fields().iter().filter(|spec| spec.required) {
            let value = self.field(spec.name).unwrap_or_default();
            require(&mut errors, spec.name, &value);
        }
        errors.into_result()
    }

    /// Row caption in the manager list
    fn caption(&self) -> String {
        Self::fields()
            .first()
            .and_then(|spec| self.field(spec.name))
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "(untitled)".to_string())
    }

    /// Rewrite every image field through `f`
    fn map_images(&mut self, f: &dyn Fn(&str) -> String) {
        for spec in Self::fields().iter().filter(|spec| spec.kind == FieldKind::ImageUrl) {
            if let Some(current) = self.field(spec.name) {
                // image fields are free text, so this cannot fail
                let _ = self.set_field(spec.name, &f(&current));
            }
        }
    }
}

/// Validate a whole collection, scoping errors by position
pub fn validate_all<T: SectionRecord>(items: &[T]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for (index, item) in items.iter().enumerate() {
        if let Err(item_errors) = item.validate() {
            errors.extend(item_errors.scoped(&format!("items[{}]", index)));
        }
    }
    errors.into_result()
}

/// Declare a record whose content fields are all free text.
///
/// Each field line is `ident: "wireName", "Label", FieldKind, required;`.
macro_rules! text_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident in $section:ident, placeholder $ph_field:ident = $ph_value:literal {
            $( $field:ident : $wire:literal, $label:literal, $kind:ident, $required:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
            pub id: Option<String>,
            $(
                #[serde(rename = $wire, default)]
                pub $field: String,
            )+
            #[serde(default)]
            pub order: u32,
        }

        impl $crate::order::Ordered for $name {
            fn order(&self) -> u32 {
                self.order
            }

            fn set_order(&mut self, order: u32) {
                self.order = order;
            }
        }

        impl $crate::record::SectionRecord for $name {
            const SECTION: $crate::section::SectionKind = $crate::section::SectionKind::$section;

            fn placeholder(order: u32) -> Self {
                Self {
                    $ph_field: $ph_value.to_string(),
                    order,
                    ..Default::default()
                }
            }

            fn fields() -> &'static [$crate::record::FieldSpec] {
                const FIELDS: &[$crate::record::FieldSpec] = &[
                    $(
                        $crate::record::FieldSpec {
                            name: $wire,
                            label: $label,
                            kind: $crate::record::FieldKind::$kind,
                            required: $required,
                        },
                    )+
                ];
                FIELDS
            }

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn set_id(&mut self, id: Option<String>) {
                self.id = id;
            }

            fn field(&self, name: &str) -> Option<String> {
                match name {
                    $( $wire => Some(self.$field.clone()), )+
                    _ => None,
                }
            }

            fn set_field(&mut self, name: &str, value: &str) -> Result<(), $crate::record::FieldError> {
                match name {
                    $(
                        $wire => {
                            self.$field = value.to_string();
                            Ok(())
                        }
                    )+
                    _ => Err($crate::record::FieldError::Unknown(name.to_string())),
                }
            }
        }
    };
}

pub(crate) use text_record;
