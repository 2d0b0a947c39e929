fn main() {
    println!("cargo:rerun-if-env-changed=DIMMER_CONFIG_JSON");

    // Host-target test builds run without the ESP-IDF toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
