use crate::list::ListValidationError;
use serde::{Deserialize, Serialize};

/// A single product entry on a shopping list.
///
/// Items are keyed by barcode within their list; the remaining fields are
/// display data taken from the catalog or from user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Product barcode. Unique within a list, never empty.
    pub barcode: String,
    /// Product name as shown to the user.
    #[serde(default)]
    pub name: String,
    /// Brand label, empty for unbranded products.
    #[serde(default)]
    pub brand: String,
}

impl Item {
    pub fn new(
        barcode: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
    ) -> Self {
        Self {
            barcode: barcode.into(),
            name: name.into(),
            brand: brand.into(),
        }
    }

    /// Check the barcode invariant. Whitespace-only barcodes count as empty.
    pub fn validate(&self) -> Result<(), ListValidationError> {
        if self.barcode.trim().is_empty() {
            return Err(ListValidationError::EmptyBarcode);
        }
        Ok(())
    }
}
