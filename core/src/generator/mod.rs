use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

pub trait GridGenerator {
    fn generate(self, config: GridConfig) -> Result<Grid>;
}
