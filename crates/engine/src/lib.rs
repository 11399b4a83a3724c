//! Donor tracking engine.
//!
//! Owns the data model (donors, campaigns, donations, users) and every
//! operation over it. All state lives in the database; the [`Engine`] only
//! holds a connection.

pub use campaigns::{Campaign, CampaignFilter, CampaignUpdate, CampaignWithDonations, NewCampaign};
pub use donations::{Donation, DonationUpdate, NewDonation};
pub use donors::{Donor, DonorFilter, DonorUpdate, DonorWithDonations, NewDonor};
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use users::User;

mod campaigns;
mod donations;
mod donors;
mod error;
mod money;
mod ops;
mod password;
mod session;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
