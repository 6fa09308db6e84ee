#![no_std]

extern crate alloc;

pub use cell::*;
pub use config::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use observation::*;
pub use reveal::*;
pub use round::*;
pub use score::*;
pub use store::*;
pub use types::*;

mod cell;
mod config;
mod difficulty;
mod error;
mod generator;
mod grid;
mod observation;
mod reveal;
mod round;
mod score;
mod store;
mod types;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed(Mark),
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed(_) => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitTrigger,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitTrigger => true,
            Won => true,
        }
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::HitTrigger | Self::Won)
    }
}
