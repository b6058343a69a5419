use super::*;

// ============================================================================
// Errors
// ============================================================================

/// Errors surfaced by list store implementations.
#[derive(Debug, Error)]
pub enum ListStoreError {
    /// Input failed a model invariant. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ListValidationError),

    /// Id is not a well-formed list id. Raised before storage is touched.
    #[error("Invalid list id: {0}")]
    InvalidId(String),

    /// No list with this id.
    #[error("List not found: {0}")]
    NotFound(String),

    /// The list exists but holds no item with this barcode.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Check that an id has the shape [`gen_list_id`] produces.
///
/// Malformed ids can never match a stored list and must never reach the
/// filesystem as a path, so they are rejected up front.
pub fn validate_list_id(list_id: &str) -> Result<(), ListStoreError> {
    let well_formed = list_id.len() == LIST_ID_LEN
        && list_id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    if !well_formed {
        return Err(ListStoreError::InvalidId(list_id.to_string()));
    }
    Ok(())
}

/// Build a brand-new list from raw input. Shared by store implementations.
///
/// Assigns a fresh id, trims and validates the name, checks every item
/// barcode, and applies the items in order with upsert semantics.
pub fn assemble_new_list(name: &str, items: Vec<Item>) -> Result<ShoppingList, ListStoreError> {
    let name = normalize_list_name(name)?;
    let mut list = ShoppingList::new(gen_list_id(), name);
    for item in items {
        item.validate()?;
        list.upsert_item(item);
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_list_id_accepts_generated_ids() {
        assert!(validate_list_id(&gen_list_id()).is_ok());
    }

    #[test]
    fn validate_list_id_rejects_malformed() {
        let too_long = "a".repeat(33);
        let uppercase = "A".repeat(LIST_ID_LEN);
        for bad in [
            "",
            "zzz",
            "../../etc/passwd",
            "abc/def",
            "abc\\def",
            "abc\0def",
            too_long.as_str(),
            uppercase.as_str(),
        ] {
            assert!(validate_list_id(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn assemble_new_list_applies_upsert_order() {
        let items = vec![
            Item::new("1", "Milk", "A"),
            Item::new("2", "Bread", "B"),
            Item::new("1", "Milk 2%", "A"),
        ];
        let list = assemble_new_list(" Weekly shop ", items).unwrap();

        assert_eq!(list.name, "Weekly shop");
        assert_eq!(list.item_count(), 2);
        assert_eq!(list.items[0].name, "Milk 2%");
        assert_eq!(list.items[1].barcode, "2");
        assert!(validate_list_id(&list.id).is_ok());
    }

    #[test]
    fn assemble_new_list_rejects_blank_name() {
        assert!(matches!(
            assemble_new_list("   ", Vec::new()),
            Err(ListStoreError::Validation(ListValidationError::EmptyName))
        ));
    }

    #[test]
    fn assemble_new_list_rejects_blank_barcode() {
        let items = vec![Item::new(" ", "Milk", "A")];
        assert!(matches!(
            assemble_new_list("Weekly shop", items),
            Err(ListStoreError::Validation(ListValidationError::EmptyBarcode))
        ));
    }
}
