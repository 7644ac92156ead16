//! Router tests module
