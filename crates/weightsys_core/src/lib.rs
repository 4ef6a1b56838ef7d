//! Weighted random selection with feedback driven weights.
//!
//! A [`WeightSystem`](system::WeightSystem) keeps a set of items, each with a weight bounded
//! by the system's min and max weight, and picks items with probability proportional
//! to their weight. Reporting a success or failure for an item scales its weight up or down.

pub mod prelude;

pub mod options;
pub mod system;
pub mod weighted;

#[cfg(test)]
mod test;
