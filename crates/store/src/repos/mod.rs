//! Repository traits for profile operations.

pub mod profiles;

pub use profiles::ProfileRepo;
