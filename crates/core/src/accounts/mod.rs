//! Accounts module - domain models, ledger, services, and traits.

mod accounts_model;
mod accounts_service;
mod accounts_traits;
mod ledger;


pub use accounts_model::{Account, AccountType, AccountUpdate, NewAccount};
pub use accounts_service::AccountService;
pub use accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
pub use ledger::{balance_effect, destination_effect, AccountLedger};
