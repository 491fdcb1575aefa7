pub mod ayanamsa;
pub mod decans;
pub mod rulers;
pub mod signs;
pub mod types;

pub use ayanamsa::Ayanamsa;
pub use decans::{decan_index, decan_ruler};
pub use rulers::{ruled_signs, sign_ruler};
pub use signs::ZodiacPlacement;
pub use types::{degree_in_sign, sign_index, Element, Quality, ZodiacSign, ZodiacType};
