//! Balance ledger module: one non-negative balance per user.

mod service;


pub use service::LedgerService;
