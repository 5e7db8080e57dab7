pub(crate) mod bootstrap;
pub(crate) mod loop_runner;

mod collision;
mod config;
mod effects;
mod hud;
mod menu;
mod player;
mod portals;
mod save;
mod session;
mod settings;
mod world;
mod worldgen;
