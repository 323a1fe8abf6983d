/* src/cli/core/src/build/mod.rs */

mod context;
mod desktop;
mod mobile;
mod run;
mod web;

pub(crate) use run::run_build;
