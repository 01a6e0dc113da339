//! Print-on-demand providers

pub mod printful;

pub use printful::PrintfulProvider;
