pub mod action;
pub mod cards;
pub mod cli;
pub mod config;
pub mod display;
pub mod equity;
pub mod error;
pub mod hand_evaluator;
pub mod math_engine;
pub mod opponent;
pub mod policy;
pub mod round;
pub mod session;
