//! The wallet page that lists transactions and the running balance.

mod balance;
mod view;
mod wallet_page;

pub(crate) use balance::balance;
pub use wallet_page::get_wallet_page;
