//! Request routing
//!
//! - `rule_router` - Keyword rule router with a default fallback

pub mod rule_router;

#[cfg(test)]
mod tests;

pub use rule_router::RuleRouter;
