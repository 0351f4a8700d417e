pub mod assembler;
pub mod entities;
pub mod milestones;
pub mod stats;
pub mod tags;
