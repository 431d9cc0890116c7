fn main() {
    // Only wire up the ESP-IDF build environment when the espidf feature is
    // active; host-side test builds skip it entirely.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
