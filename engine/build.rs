fn main() {
    // write build time info for the run report
    built::write_built_file().expect("Failed to acquire build-time information");
}
