//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod content;
pub mod spellcasting;

pub use content::ContentUseCases;
pub use spellcasting::SpellcastingUseCases;
