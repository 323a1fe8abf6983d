/* src/cli/core/src/config/tests/mod.rs */

mod json;
mod out_dir;
