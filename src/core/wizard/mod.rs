//! Onboarding Wizard State Machine
//!
//! # Overview
//!
//! The wizard walks one user through the onboarding record in seven steps:
//! 1. Issuer - company identity, addresses, tax ids
//! 2. Issue - security class details
//! 3. Preferred - conversion and redemption terms
//! 4. Warrant - exercise terms and payment routing
//! 5. Listing - exchange listing
//! 6. Issuer Admin - administrator contact and compliance
//! 7. Review - read-only summary and submit
//!
//! Nothing gates advancement. Steps at or before the current one are
//! reachable from the sidebar; later ones are locked until reached with Next.

mod state;
mod types;

pub use state::*;
pub use types::*;
