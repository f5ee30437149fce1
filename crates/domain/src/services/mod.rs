//! Domain services for the Powerline backend.
//!
//! Services contain business logic that operates on domain models.

pub mod dashboard;

pub use dashboard::{
    DashboardController, DirectoryError, FetchApplied, FetchTicket, PageData, Session,
    SubmissionDirectory, SubmissionRow, Tab,
};
