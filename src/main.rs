#[cfg(feature = "csr")]
fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("Starting blog client...");
    leptos::mount::mount_to_body(quill::app::App);
}

// Without `csr` there is nothing to run: the app only lives in the browser.
// Build it with `trunk serve --features csr`.
#[cfg(not(feature = "csr"))]
fn main() {}
