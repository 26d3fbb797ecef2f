pub mod controller;
pub mod damage;
pub mod rng;
pub mod state;
pub mod turn_order;

#[cfg(test)]
mod tests;
