pub mod calculations;
pub mod constants;

pub use calculations::{
    calculate_bmr, calculate_macros, calculate_tdee, calorie_target, compute_local_plan,
    MacroTargets,
};
pub use constants::*;
