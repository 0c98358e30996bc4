//! egui rendering. Everything here reads [`crate::state::AppState`]; the
//! derivation itself lives in [`crate::data`].

pub mod panels;
pub mod plot;
pub mod table;
