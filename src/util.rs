pub mod ascii;
pub mod chunks;
