//! Property-based tests for the onboarding core
//!
//! ## Test Modules
//!
//! - `wizard_props`: step navigation
//!   - Jumping lands exactly on any valid step
//!   - Next/Previous never leave the step range
//!   - Updating one section leaves the other five untouched
//!
//! - `persistence_props`: draft records
//!   - A written record restores to the same draft and step
//!   - Sections missing from a record come back as defaults
//!   - Stored steps past the end are clamped to the last step
//!
//! By default, proptest runs 256 cases per property. Override with
//! `PROPTEST_CASES`:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod persistence_props;
mod wizard_props;
