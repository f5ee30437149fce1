//! Repository-backed [`SubmissionDirectory`].
//!
//! Adapts the contact and quote repositories (plus the passcode service)
//! to the directory trait the dashboard controller drives, flattening
//! each submission kind into the shared row shape.

use async_trait::async_trait;

use domain::models::{ContactSubmission, GeneratedId, QuoteSubmission};
use domain::services::{DirectoryError, PageData, SubmissionDirectory, SubmissionRow, Tab};
use persistence::repositories::{ContactRepository, QuoteRepository};
use shared::pagination::PageWindow;

use super::AdminAuthService;

/// Directory over the live database.
#[derive(Clone)]
pub struct BackendDirectory {
    auth: AdminAuthService,
    contacts: ContactRepository,
    quotes: QuoteRepository,
}

impl BackendDirectory {
    pub fn new(
        auth: AdminAuthService,
        contacts: ContactRepository,
        quotes: QuoteRepository,
    ) -> Self {
        Self {
            auth,
            contacts,
            quotes,
        }
    }
}

fn storage_err(err: impl std::fmt::Display) -> DirectoryError {
    DirectoryError::Storage(err.to_string())
}

fn contact_row(submission: ContactSubmission) -> SubmissionRow {
    SubmissionRow {
        id: submission.id,
        name: submission.name,
        email: submission.email,
        headline: submission.subject,
        created_at: submission.created_at,
    }
}

fn quote_row(submission: QuoteSubmission) -> SubmissionRow {
    SubmissionRow {
        id: submission.id,
        name: submission.name,
        email: submission.email,
        headline: submission.product_interest,
        created_at: submission.created_at,
    }
}

#[async_trait]
impl SubmissionDirectory for BackendDirectory {
    async fn verify_passcode(&self, candidate: &str) -> Result<bool, DirectoryError> {
        self.auth.verify(candidate).await.map_err(storage_err)
    }

    async fn list(&self, tab: Tab, window: PageWindow) -> Result<PageData, DirectoryError> {
        match tab {
            Tab::Contacts => {
                let rows = self.contacts.list(window).await.map_err(storage_err)?;
                let total = self.contacts.count().await.map_err(storage_err)?;
                Ok(PageData {
                    rows: rows.into_iter().map(contact_row).collect(),
                    total,
                })
            }
            Tab::Quotes => {
                let rows = self.quotes.list(window).await.map_err(storage_err)?;
                let total = self.quotes.count().await.map_err(storage_err)?;
                Ok(PageData {
                    rows: rows.into_iter().map(quote_row).collect(),
                    total,
                })
            }
        }
    }

    async fn search(
        &self,
        tab: Tab,
        query: &str,
        window: PageWindow,
    ) -> Result<PageData, DirectoryError> {
        match tab {
            Tab::Contacts => {
                let rows = self
                    .contacts
                    .search(query, window)
                    .await
                    .map_err(storage_err)?;
                let total = self
                    .contacts
                    .count_search(query)
                    .await
                    .map_err(storage_err)?;
                Ok(PageData {
                    rows: rows.into_iter().map(contact_row).collect(),
                    total,
                })
            }
            Tab::Quotes => {
                let rows = self
                    .quotes
                    .search(query, window)
                    .await
                    .map_err(storage_err)?;
                let total = self
                    .quotes
                    .count_search(query)
                    .await
                    .map_err(storage_err)?;
                Ok(PageData {
                    rows: rows.into_iter().map(quote_row).collect(),
                    total,
                })
            }
        }
    }

    async fn delete(&self, tab: Tab, id: GeneratedId) -> Result<bool, DirectoryError> {
        match tab {
            Tab::Contacts => self.contacts.delete(id).await.map_err(storage_err),
            Tab::Quotes => self.quotes.delete(id).await.map_err(storage_err),
        }
    }
}
