//! Defense system - Duration resistance, hit chance, guards and shields

mod guard;
mod resistance;

pub use guard::{absorb_with_shield, brace, consume_marker, consume_shield, hit_chance};
pub use resistance::{scale_duration, ResistanceTable};
