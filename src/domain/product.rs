use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const CATEGORY_MAX_CHARS: usize = 50;

/// A catalog record.
///
/// Required fields are still modelled leniently (`String` defaulting to empty,
/// `Option<Decimal>` for price) so a missing field reaches [`Product::validate`]
/// and is reported alongside the other field errors instead of failing JSON
/// extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier (24 hex characters). Ignored on create.
    #[serde(default, alias = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Price")]
    #[schema(value_type = f64)]
    pub price: Option<Decimal>,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "Category")]
    pub category: String,
    #[serde(default, alias = "Stock")]
    pub stock: Option<i32>,
    #[serde(default, alias = "ImageUrl")]
    pub image_url: Option<String>,
}

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn exceeds(s: &str, max: usize) -> bool {
    s.chars().count() > max
}

/// Absolute http(s)/ftp URL with a host.
fn is_well_formed_url(s: &str) -> bool {
    match url::Url::parse(s) {
        Ok(u) => matches!(u.scheme(), "http" | "https" | "ftp") && u.has_host(),
        Err(_) => false,
    }
}

impl Product {
    /// Checks every field constraint and returns all failures.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if is_blank(&self.name) {
            errors.push(FieldError::new("name", "Name is required"));
        } else if exceeds(&self.name, NAME_MAX_CHARS) {
            errors.push(FieldError::new(
                "name",
                format!("Name cannot exceed {} characters", NAME_MAX_CHARS),
            ));
        }

        match self.price {
            None => errors.push(FieldError::new("price", "Price is required")),
            Some(p) if p <= Decimal::ZERO => {
                errors.push(FieldError::new("price", "Price must be greater than 0"))
            }
            Some(_) => {}
        }

        if let Some(d) = self.description.as_deref() {
            if exceeds(d, DESCRIPTION_MAX_CHARS) {
                errors.push(FieldError::new(
                    "description",
                    format!("Description cannot exceed {} characters", DESCRIPTION_MAX_CHARS),
                ));
            }
        }

        if is_blank(&self.category) {
            errors.push(FieldError::new("category", "Category is required"));
        } else if exceeds(&self.category, CATEGORY_MAX_CHARS) {
            errors.push(FieldError::new(
                "category",
                format!("Category cannot exceed {} characters", CATEGORY_MAX_CHARS),
            ));
        }

        if matches!(self.stock, Some(s) if s < 0) {
            errors.push(FieldError::new("stock", "Stock cannot be negative"));
        }

        if let Some(u) = self.image_url.as_deref() {
            if !u.is_empty() && !is_well_formed_url(u) {
                errors.push(FieldError::new("imageUrl", "Invalid image URL"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Same record with the identifier replaced.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
