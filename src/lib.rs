pub mod actor;
pub mod archetype;
pub mod base;
pub mod cycle;
pub mod debug;
pub mod encounter;
pub mod grid;
pub mod oracle;
pub mod predict;
pub mod pvp;
pub mod recommend;
pub mod shield;
