mod app;
mod components;
mod core;
mod pages;
mod round;

use app::*;
use leptos::*;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    mount_to_body(|| {
        view! {
            <App/>
        }
    })
}
