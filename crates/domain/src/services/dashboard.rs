//! Admin dashboard session controller.
//!
//! Models the admin UI flow: passcode entry, tab selection between contact
//! and quote submissions, paginated list/search, row selection for the
//! detail view, delete-and-refresh, logout.
//!
//! The controller is split into a pure, synchronous core ([`Session`]) and
//! an async driver ([`DashboardController`]) generic over a
//! [`SubmissionDirectory`]. The core hands out a [`FetchTicket`] per fetch
//! and applies at most the latest one; a response carrying a superseded
//! ticket is discarded instead of overwriting newer state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::pagination::PageWindow;
use thiserror::Error;

use crate::models::GeneratedId;

/// Which submission collection the dashboard is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Contacts,
    Quotes,
}

/// A single row of the dashboard list view.
///
/// Carries enough fetched data for the detail pane, so selecting a row
/// never issues a network call.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRow {
    pub id: GeneratedId,
    pub name: String,
    pub email: String,
    /// Subject for contacts, product interest for quotes.
    pub headline: String,
    pub created_at: DateTime<Utc>,
}

/// One fetched page plus the full matching count.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData {
    pub rows: Vec<SubmissionRow>,
    pub total: i64,
}

/// Error type for directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Read/delete access to the two submission collections, as the dashboard
/// sees them.
#[async_trait]
pub trait SubmissionDirectory: Send + Sync {
    async fn verify_passcode(&self, candidate: &str) -> Result<bool, DirectoryError>;

    async fn list(&self, tab: Tab, window: PageWindow) -> Result<PageData, DirectoryError>;

    async fn search(
        &self,
        tab: Tab,
        query: &str,
        window: PageWindow,
    ) -> Result<PageData, DirectoryError>;

    async fn delete(&self, tab: Tab, id: GeneratedId) -> Result<bool, DirectoryError>;
}

/// Token identifying one issued fetch.
///
/// Captures the view parameters at issue time; only the ticket matching the
/// session's latest generation may be applied.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    tab: Tab,
    page: u32,
    limit: u32,
    query: String,
}

impl FetchTicket {
    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::from_params(Some(self.page), Some(self.limit))
    }
}

/// Result of applying a fetch response to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    /// Response accepted; rows/total (or the error banner) updated.
    Applied,
    /// A newer fetch was issued after this ticket; response discarded.
    Stale,
    /// Response accepted, but the page is now past the end of the result
    /// set. The session stepped back to the last non-empty page; the caller
    /// should fetch again.
    OutOfRange,
}

/// Authenticated dashboard state: the pure core of the controller.
#[derive(Debug)]
pub struct Session {
    pub tab: Tab,
    pub page: u32,
    pub limit: u32,
    pub query: String,
    pub rows: Vec<SubmissionRow>,
    pub total: i64,
    pub selected: Option<SubmissionRow>,
    /// User-visible error banner; prior rows stay intact while set.
    pub error: Option<String>,
    generation: u64,
}

impl Session {
    /// Fresh session: contacts tab, first page, no query.
    pub fn new(limit: u32) -> Self {
        Self {
            tab: Tab::Contacts,
            page: 1,
            limit: limit.max(1),
            query: String::new(),
            rows: Vec::new(),
            total: 0,
            selected: None,
            error: None,
            generation: 0,
        }
    }

    fn window(&self) -> PageWindow {
        PageWindow::from_params(Some(self.page), Some(self.limit))
    }

    /// Total page count for the current result set.
    pub fn total_pages(&self) -> u32 {
        self.window().total_pages(self.total)
    }

    /// Issues a ticket for a fetch of the current view, superseding any
    /// ticket issued earlier.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            tab: self.tab,
            page: self.page,
            limit: self.limit,
            query: self.query.clone(),
        }
    }

    /// Applies a fetch response. Stale tickets are dropped; errors set the
    /// banner and leave previously loaded rows untouched.
    pub fn apply_fetch(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<PageData, String>,
    ) -> FetchApplied {
        if ticket.generation != self.generation {
            return FetchApplied::Stale;
        }

        match outcome {
            Ok(data) => {
                self.total = data.total;
                self.error = None;

                // Rebalance: a delete (or a shrinking result set) can leave
                // the window past the last page. Step back and signal the
                // caller to refetch.
                if data.rows.is_empty() && data.total > 0 && self.page > 1 {
                    self.page = self.total_pages();
                    FetchApplied::OutOfRange
                } else {
                    self.rows = data.rows;
                    FetchApplied::Applied
                }
            }
            Err(message) => {
                self.error = Some(message);
                FetchApplied::Applied
            }
        }
    }

    /// Switches tabs: page 1, query cleared, selection cleared.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.page = 1;
        self.query.clear();
        self.selected = None;
        self.rows.clear();
        self.total = 0;
    }

    /// Applies a new search query, resetting to page 1.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
    }

    /// Moves to page `n`, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, n: u32) {
        self.page = n.clamp(1, self.total_pages());
    }

    /// Selects a row from already-fetched data; no network call. Returns
    /// false when the id is not on the current page.
    pub fn select_item(&mut self, id: GeneratedId) -> bool {
        match self.rows.iter().find(|row| row.id == id) {
            Some(row) => {
                self.selected = Some(row.clone());
                true
            }
            None => false,
        }
    }

    /// Clears the selection if it points at the given id.
    pub fn clear_selection_if(&mut self, id: GeneratedId) {
        if self.selected.as_ref().is_some_and(|row| row.id == id) {
            self.selected = None;
        }
    }
}

/// Async driver binding a [`Session`] to a [`SubmissionDirectory`].
pub struct DashboardController<D> {
    directory: D,
    default_limit: u32,
    session: Option<Session>,
    login_error: Option<String>,
}

impl<D: SubmissionDirectory> DashboardController<D> {
    pub fn new(directory: D, default_limit: u32) -> Self {
        Self {
            directory,
            default_limit,
            session: None,
            login_error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// Passcode entry. A wrong passcode keeps the controller
    /// unauthenticated with a surfaced error; a storage failure propagates.
    pub async fn submit_passcode(&mut self, candidate: &str) -> Result<bool, DirectoryError> {
        if self.directory.verify_passcode(candidate).await? {
            self.login_error = None;
            self.session = Some(Session::new(self.default_limit));
            self.refresh().await;
            Ok(true)
        } else {
            self.login_error = Some("Invalid passcode".to_string());
            Ok(false)
        }
    }

    pub async fn select_tab(&mut self, tab: Tab) {
        if let Some(session) = self.session.as_mut() {
            session.select_tab(tab);
            self.refresh().await;
        }
    }

    /// Runs a search. An empty query falls back to plain listing; the
    /// directory's search path is never called with an empty string.
    pub async fn search(&mut self, query: &str) {
        if let Some(session) = self.session.as_mut() {
            session.set_query(query);
            self.refresh().await;
        }
    }

    pub async fn change_page(&mut self, n: u32) {
        if let Some(session) = self.session.as_mut() {
            session.set_page(n);
            self.refresh().await;
        }
    }

    /// Selects a row for the detail view from already-fetched data.
    pub fn select_item(&mut self, id: GeneratedId) -> bool {
        self.session
            .as_mut()
            .map(|session| session.select_item(id))
            .unwrap_or(false)
    }

    /// Deletes a submission, then refreshes the current page. Clears the
    /// selection if it pointed at the deleted row. Returns whether a row
    /// was removed; directory failures surface on the error banner.
    pub async fn delete_item(&mut self, id: GeneratedId) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        match self.directory.delete(session.tab, id).await {
            Ok(deleted) => {
                if deleted {
                    session.clear_selection_if(id);
                    self.refresh().await;
                }
                deleted
            }
            Err(e) => {
                session.error = Some(e.to_string());
                false
            }
        }
    }

    /// Discards all in-memory state. There is no server-side session to
    /// invalidate.
    pub fn logout(&mut self) {
        self.session = None;
        self.login_error = None;
    }

    /// Fetches the current view. Applies at most the latest ticket, and
    /// follows one page-rebalance step after a delete empties the window.
    async fn refresh(&mut self) {
        // Two passes at most: the second only runs after an out-of-range
        // page was clamped back.
        for _ in 0..2 {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            let ticket = session.begin_fetch();

            let outcome = if ticket.query().is_empty() {
                self.directory.list(ticket.tab(), ticket.window()).await
            } else {
                self.directory
                    .search(ticket.tab(), ticket.query(), ticket.window())
                    .await
            };

            let Some(session) = self.session.as_mut() else {
                return;
            };
            let applied = session.apply_fetch(&ticket, outcome.map_err(|e| e.to_string()));
            if applied != FetchApplied::OutOfRange {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn row(name: &str) -> SubmissionRow {
        use fake::{faker::internet::en::SafeEmail, Fake};
        SubmissionRow {
            id: GeneratedId::new(),
            name: name.to_string(),
            email: SafeEmail().fake(),
            headline: "Backup power".to_string(),
            created_at: Utc::now(),
        }
    }

    /// In-memory directory: newest-first ordering, substring search over
    /// name/email/headline.
    struct MemoryDirectory {
        passcode: String,
        contacts: Mutex<Vec<SubmissionRow>>,
        quotes: Mutex<Vec<SubmissionRow>>,
        fail_fetches: AtomicBool,
        search_calls: AtomicUsize,
    }

    impl MemoryDirectory {
        fn new(contacts: Vec<SubmissionRow>, quotes: Vec<SubmissionRow>) -> Self {
            Self {
                passcode: "letmein99".to_string(),
                contacts: Mutex::new(contacts),
                quotes: Mutex::new(quotes),
                fail_fetches: AtomicBool::new(false),
                search_calls: AtomicUsize::new(0),
            }
        }

        fn rows(&self, tab: Tab) -> Vec<SubmissionRow> {
            match tab {
                Tab::Contacts => self.contacts.lock().unwrap().clone(),
                Tab::Quotes => self.quotes.lock().unwrap().clone(),
            }
        }

        fn page(rows: Vec<SubmissionRow>, window: PageWindow) -> PageData {
            let total = rows.len() as i64;
            let rows = rows
                .into_iter()
                .skip(window.skip() as usize)
                .take(window.take() as usize)
                .collect();
            PageData { rows, total }
        }
    }

    #[async_trait]
    impl SubmissionDirectory for MemoryDirectory {
        async fn verify_passcode(&self, candidate: &str) -> Result<bool, DirectoryError> {
            Ok(candidate == self.passcode)
        }

        async fn list(&self, tab: Tab, window: PageWindow) -> Result<PageData, DirectoryError> {
            if self.fail_fetches.load(Ordering::SeqCst) {
                return Err(DirectoryError::Storage("connection refused".to_string()));
            }
            Ok(Self::page(self.rows(tab), window))
        }

        async fn search(
            &self,
            tab: Tab,
            query: &str,
            window: PageWindow,
        ) -> Result<PageData, DirectoryError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            assert!(!query.is_empty(), "empty query must never reach search");
            let needle = query.to_lowercase();
            let rows = self
                .rows(tab)
                .into_iter()
                .filter(|r| {
                    r.name.to_lowercase().contains(&needle)
                        || r.email.to_lowercase().contains(&needle)
                        || r.headline.to_lowercase().contains(&needle)
                })
                .collect();
            Ok(Self::page(rows, window))
        }

        async fn delete(&self, tab: Tab, id: GeneratedId) -> Result<bool, DirectoryError> {
            let store = match tab {
                Tab::Contacts => &self.contacts,
                Tab::Quotes => &self.quotes,
            };
            let mut rows = store.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() < before)
        }
    }

    fn many_rows(n: usize) -> Vec<SubmissionRow> {
        (0..n).map(|i| row(&format!("Person{}", i))).collect()
    }

    #[tokio::test]
    async fn test_wrong_passcode_stays_unauthenticated() {
        let mut controller =
            DashboardController::new(MemoryDirectory::new(many_rows(3), vec![]), 10);
        assert!(!controller.submit_passcode("nope").await.unwrap());
        assert!(!controller.is_authenticated());
        assert_eq!(controller.login_error(), Some("Invalid passcode"));
    }

    #[tokio::test]
    async fn test_login_fetches_first_contacts_page() {
        let mut controller =
            DashboardController::new(MemoryDirectory::new(many_rows(15), vec![]), 10);
        assert!(controller.submit_passcode("letmein99").await.unwrap());
        let session = controller.session().unwrap();
        assert_eq!(session.tab, Tab::Contacts);
        assert_eq!(session.page, 1);
        assert_eq!(session.rows.len(), 10);
        assert_eq!(session.total, 15);
    }

    #[tokio::test]
    async fn test_select_tab_resets_page_and_query() {
        let mut controller =
            DashboardController::new(MemoryDirectory::new(many_rows(15), many_rows(3)), 10);
        controller.submit_passcode("letmein99").await.unwrap();
        controller.change_page(2).await;
        controller.search("person1").await;

        controller.select_tab(Tab::Quotes).await;
        let session = controller.session().unwrap();
        assert_eq!(session.tab, Tab::Quotes);
        assert_eq!(session.page, 1);
        assert!(session.query.is_empty());
        assert!(session.selected.is_none());
        assert_eq!(session.total, 3);
    }

    #[tokio::test]
    async fn test_empty_query_routes_to_list() {
        let directory = MemoryDirectory::new(many_rows(5), vec![]);
        let mut controller = DashboardController::new(directory, 10);
        controller.submit_passcode("letmein99").await.unwrap();
        controller.search("").await;
        let session = controller.session().unwrap();
        assert_eq!(session.rows.len(), 5);
        // The directory's search path was never exercised.
        assert_eq!(
            controller.directory.search_calls.load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_resets_page() {
        let mut controller =
            DashboardController::new(MemoryDirectory::new(many_rows(15), vec![]), 10);
        controller.submit_passcode("letmein99").await.unwrap();
        controller.change_page(2).await;
        controller.search("PERSON1").await;
        let session = controller.session().unwrap();
        assert_eq!(session.page, 1);
        // Person1, Person10..Person14
        assert_eq!(session.total, 6);
    }

    #[tokio::test]
    async fn test_change_page_clamps_to_range() {
        let mut controller =
            DashboardController::new(MemoryDirectory::new(many_rows(15), vec![]), 10);
        controller.submit_passcode("letmein99").await.unwrap();

        controller.change_page(99).await;
        assert_eq!(controller.session().unwrap().page, 2);
        assert_eq!(controller.session().unwrap().rows.len(), 5);

        controller.change_page(0).await;
        assert_eq!(controller.session().unwrap().page, 1);
    }

    #[tokio::test]
    async fn test_select_item_uses_fetched_rows() {
        let rows = many_rows(3);
        let target = rows[1].id;
        let mut controller = DashboardController::new(MemoryDirectory::new(rows, vec![]), 10);
        controller.submit_passcode("letmein99").await.unwrap();

        assert!(controller.select_item(target));
        assert_eq!(
            controller.session().unwrap().selected.as_ref().unwrap().id,
            target
        );
        // Unknown id: no selection change.
        assert!(!controller.select_item(GeneratedId::new()));
    }

    #[tokio::test]
    async fn test_delete_refreshes_and_clears_selection() {
        let rows = many_rows(3);
        let target = rows[0].id;
        let mut controller = DashboardController::new(MemoryDirectory::new(rows, vec![]), 10);
        controller.submit_passcode("letmein99").await.unwrap();
        controller.select_item(target);

        assert!(controller.delete_item(target).await);
        let session = controller.session().unwrap();
        assert!(session.selected.is_none());
        assert_eq!(session.total, 2);
        assert!(session.rows.iter().all(|r| r.id != target));

        // Idempotent: second delete reports false.
        assert!(!controller.delete_item(target).await);
    }

    #[tokio::test]
    async fn test_delete_last_row_of_last_page_steps_back() {
        let rows = many_rows(11);
        let last = rows[10].id;
        let mut controller = DashboardController::new(MemoryDirectory::new(rows, vec![]), 10);
        controller.submit_passcode("letmein99").await.unwrap();
        controller.change_page(2).await;
        assert_eq!(controller.session().unwrap().rows.len(), 1);

        controller.delete_item(last).await;
        let session = controller.session().unwrap();
        assert_eq!(session.page, 1);
        assert_eq!(session.rows.len(), 10);
        assert_eq!(session.total, 10);
    }

    #[tokio::test]
    async fn test_fetch_error_preserves_rows() {
        let directory = MemoryDirectory::new(many_rows(5), vec![]);
        let mut controller = DashboardController::new(directory, 10);
        controller.submit_passcode("letmein99").await.unwrap();
        assert_eq!(controller.session().unwrap().rows.len(), 5);

        controller
            .directory
            .fail_fetches
            .store(true, Ordering::SeqCst);
        controller.change_page(1).await;

        let session = controller.session().unwrap();
        assert!(session.error.is_some());
        assert_eq!(session.rows.len(), 5);
    }

    #[tokio::test]
    async fn test_logout_discards_state() {
        let mut controller =
            DashboardController::new(MemoryDirectory::new(many_rows(5), vec![]), 10);
        controller.submit_passcode("letmein99").await.unwrap();
        controller.logout();
        assert!(!controller.is_authenticated());
        assert!(controller.session().is_none());
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut session = Session::new(10);
        let first = session.begin_fetch();
        let second = session.begin_fetch();

        // The newer response lands first.
        let newer = PageData {
            rows: vec![row("Newer")],
            total: 1,
        };
        assert_eq!(
            session.apply_fetch(&second, Ok(newer.clone())),
            FetchApplied::Applied
        );

        // The older response arrives late and must not overwrite.
        let older = PageData {
            rows: vec![row("Older"), row("Older2")],
            total: 2,
        };
        assert_eq!(session.apply_fetch(&first, Ok(older)), FetchApplied::Stale);
        assert_eq!(session.rows, newer.rows);
        assert_eq!(session.total, 1);
    }

    #[test]
    fn test_out_of_range_page_steps_back() {
        let mut session = Session::new(10);
        session.total = 25;
        session.page = 3;

        let ticket = session.begin_fetch();
        let applied = session.apply_fetch(
            &ticket,
            Ok(PageData {
                rows: vec![],
                total: 15,
            }),
        );
        assert_eq!(applied, FetchApplied::OutOfRange);
        assert_eq!(session.page, 2);
    }

    #[test]
    fn test_empty_result_set_on_first_page_is_in_range() {
        let mut session = Session::new(10);
        let ticket = session.begin_fetch();
        let applied = session.apply_fetch(
            &ticket,
            Ok(PageData {
                rows: vec![],
                total: 0,
            }),
        );
        assert_eq!(applied, FetchApplied::Applied);
        assert_eq!(session.page, 1);
    }
}
