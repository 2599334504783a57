pub mod aggregate;
pub mod error;
pub mod form;
pub mod ledger;
pub mod request;
pub mod response;

pub use aggregate::{ItemIdentity, LoadItem, LoadItemDraft, LoadItemId, PendingId};
pub use error::LedgerError;
pub use form::LoadItemForm;
pub use ledger::{DeleteOutcome, EditOutcome, LoadItemLedger};
