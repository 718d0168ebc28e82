pub mod draft;
pub mod logging;
pub mod persistence;
pub mod review;
pub mod wizard;
