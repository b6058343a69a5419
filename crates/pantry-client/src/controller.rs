use crate::api::{ClientError, ListApi};
use pantry_model::{Item, ListResponse};

/// Message shown when a search is submitted blank. The check runs locally;
/// no request is sent.
const BLANK_QUERY_MESSAGE: &str = "Search query must contain at least one character";

/// Which screen the app shows. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Landing screen. Shown once at startup, left for good after the
    /// first navigation.
    Welcome,
    /// Form for naming a new list.
    NewListForm,
    /// The collection of lists.
    ListsOverview,
    /// One list with its items.
    ListDetail,
    /// Catalog search panel.
    SearchForm,
}

/// Lifecycle of the search panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Loading,
    Success(Vec<Item>),
    Error(String),
}

/// Client-side application state.
///
/// Mutations go through the server first, and local copies are replaced
/// with whatever the server returns, so the view never drifts from storage.
/// View changes only happen in response to an explicit intent; nothing here
/// navigates on its own.
pub struct AppController {
    api: ListApi,
    view: View,
    lists: Vec<ListResponse>,
    current_list: Option<ListResponse>,
    search: SearchState,
}

impl AppController {
    pub fn new(api: ListApi) -> Self {
        Self {
            api,
            view: View::Welcome,
            lists: Vec::new(),
            current_list: None,
            search: SearchState::Idle,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn lists(&self) -> &[ListResponse] {
        &self.lists
    }

    pub fn current_list(&self) -> Option<&ListResponse> {
        self.current_list.as_ref()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn show_new_list_form(&mut self) {
        self.view = View::NewListForm;
    }

    pub fn show_lists_overview(&mut self) {
        self.view = View::ListsOverview;
    }

    pub fn show_list_detail(&mut self) {
        self.view = View::ListDetail;
    }

    /// Enter the search panel. Any previous search outcome is discarded.
    pub fn show_search_form(&mut self) {
        self.view = View::SearchForm;
        self.search = SearchState::Idle;
    }

    /// Open one of the fetched lists in the detail view.
    /// Returns `false` (and stays put) when the id is not in the collection.
    pub fn open_list(&mut self, list_id: &str) -> bool {
        let Some(list) = self.lists.iter().find(|list| list.id == list_id) else {
            return false;
        };
        self.current_list = Some(list.clone());
        self.view = View::ListDetail;
        true
    }

    /// Load the list collection. Called once when the app starts.
    pub async fn refresh_lists(&mut self) -> Result<(), ClientError> {
        self.lists = self.api.fetch_lists().await?;
        Ok(())
    }

    /// Create a list and open it in the detail view.
    /// On failure nothing changes; the error message is for the user.
    pub async fn submit_new_list(&mut self, name: &str) -> Result<(), ClientError> {
        let created = self.api.create_list(name, Vec::new()).await?;
        self.lists.push(created.clone());
        self.current_list = Some(created);
        self.view = View::ListDetail;
        Ok(())
    }

    /// Delete a list and drop it from the collection.
    pub async fn delete_list(&mut self, list_id: &str) -> Result<(), ClientError> {
        let deleted = self.api.delete_list(list_id).await?;
        self.lists.retain(|list| list.id != deleted.id);
        Ok(())
    }

    /// Put an item on the current list and return to the detail view.
    /// Without a current list the intent has no target and is dropped.
    pub async fn add_item_to_current(&mut self, item: &Item) -> Result<(), ClientError> {
        let Some(current) = self.current_list.as_ref() else {
            return Ok(());
        };
        let updated = self.api.add_item(&current.id, item).await?;
        self.reconcile(updated);
        self.view = View::ListDetail;
        Ok(())
    }

    /// Take an item off the current list and return to the detail view.
    pub async fn remove_item_from_current(&mut self, barcode: &str) -> Result<(), ClientError> {
        let Some(current) = self.current_list.as_ref() else {
            return Ok(());
        };
        let updated = self.api.remove_item(&current.id, barcode).await?;
        self.reconcile(updated);
        self.view = View::ListDetail;
        Ok(())
    }

    /// Run a catalog search, driving the panel through its states.
    /// A blank query fails locally without touching the network.
    pub async fn submit_search(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.search = SearchState::Error(BLANK_QUERY_MESSAGE.to_string());
            return;
        }
        self.search = SearchState::Loading;
        self.search = match self.api.search(query).await {
            Ok(items) => SearchState::Success(items),
            Err(err) => SearchState::Error(err.to_string()),
        };
    }

    /// Replace local copies of a list with the server's version.
    fn reconcile(&mut self, updated: ListResponse) {
        if let Some(entry) = self.lists.iter_mut().find(|list| list.id == updated.id) {
            *entry = updated.clone();
        }
        self.current_list = Some(updated);
    }
}
