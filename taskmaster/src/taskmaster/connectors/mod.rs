//! Connectors to external collaborators.
//!
//! Everything the command handlers need from the outside world lives behind
//! the traits in these submodules, so the handlers themselves stay free of
//! client-library types.

pub(crate) mod discord;
