//! Generates the Kotlin and Swift bindings for `biokit`.

fn main() {
    uniffi::uniffi_bindgen_main();
}
