//! Screen-session state holders.
//!
//! One model per screen, one [`aniview_core::LoadController`] per model.
//! Models translate screen intent (switch media type, open a page) into
//! keyed requests and hand observers immutable snapshots; rendering stays
//! outside this workspace.

pub mod detail;
pub mod home;
pub mod profile;

pub use detail::{MediaDetailModel, MediaPageState, MediaQuery, Stat, StatLabel};
pub use home::{HomeLists, HomeModel};
pub use profile::{ProfileModel, UserQuery};
