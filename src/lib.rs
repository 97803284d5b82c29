pub mod anchor;
pub mod config;
pub mod dom;
pub mod forms;
pub mod logging;
pub mod menu;
pub mod page;
pub mod reveal;
pub mod scroll;
pub mod timing;

#[cfg(target_arch = "wasm32")]
pub mod browser;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;

#[cfg(test)]
mod harness;
