pub mod data;
pub mod parser;
pub mod solver;
pub mod verifier;
