mod api;
mod app;
mod components;
mod config;
mod pages;
mod store;
mod theme;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
