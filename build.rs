fn main() {
    // Host builds (tests, fuzzing) carry no ESP-IDF toolchain environment.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
