pub mod analyzer;
pub mod cli;
pub mod display;
pub mod error;
pub mod export;
pub mod game;
pub mod graph;
pub mod metastate;
pub mod notation;
pub mod player;
pub mod position;
pub mod rules;
pub mod solver;
pub mod strategy;
pub mod table;
pub mod values;
