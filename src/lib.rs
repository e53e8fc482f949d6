pub mod api;
pub mod app;
pub mod auth;
pub mod chat;
pub mod components;
pub mod config;
pub mod error;
pub mod types;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run_app() {
    let document = web_sys::window().unwrap().document().unwrap();
    let root = document.get_element_by_id("root").unwrap();
    yew::Renderer::<app::App>::with_root(root).render();
}
