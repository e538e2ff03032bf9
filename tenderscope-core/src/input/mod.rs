//! Per-field input handling: raw keystrokes, debounced application, dropdown
//! state and keyboard navigation.

pub mod controller;

#[cfg(test)]
mod tests;

pub use controller::{
    DropdownState, FieldController, FieldEffect, NavKey, SuggestionStatus,
};
