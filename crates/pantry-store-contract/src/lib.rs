//! List store contract and shared persistence helpers.

use async_trait::async_trait;
use pantry_model::{
    gen_list_id, normalize_list_name, Item, ListValidationError, ShoppingList, LIST_ID_LEN,
};
use thiserror::Error;

mod traits;
mod types;

pub use traits::{ListReader, ListStore, ListWriter};
pub use types::{assemble_new_list, validate_list_id, ListStoreError};
