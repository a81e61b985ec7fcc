pub mod normalize;
pub mod paa;
pub mod symbol;
