pub mod chrono_math;

pub use chrono_math::ChronoTzMath;
