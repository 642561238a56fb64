mod def;
mod material;
mod piece_values;
mod pst;
pub mod scores;
mod weights;

pub use def::Evaluator;
pub use material::MaterialEvaluator;
pub use piece_values::PieceValues;
pub use weights::Weights;
