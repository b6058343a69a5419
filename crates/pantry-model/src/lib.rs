//! Shopping list domain model and wire types.

pub mod dto;
pub mod item;
pub mod list;

pub use dto::{CreateListRequest, DeletedList, ErrorMessage, ListResponse};
pub use item::Item;
pub use list::{gen_list_id, normalize_list_name, ListValidationError, ShoppingList, LIST_ID_LEN};
