pub mod hill_climb;
pub mod random;
