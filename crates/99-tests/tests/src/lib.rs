//! Cross-crate test suite for the card selection state-sync substrate.

#[cfg(test)]
mod multi_context;

#[cfg(test)]
mod persistence_restart;

#[cfg(test)]
mod variant_equivalence;
