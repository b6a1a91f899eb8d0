// Job applications: the add-job form, the job list and detail pages, and status changes.

pub mod handlers;
pub mod store;
