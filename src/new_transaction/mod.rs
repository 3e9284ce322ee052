//! The pages and endpoint for recording a new income or outcome.

mod create_endpoint;
mod page;

pub use create_endpoint::create_transaction_endpoint;
pub use page::{get_new_income_page, get_new_outcome_page};
