fn main() {
    // Boot is best-effort: load failures are reported on stderr and in the
    // log file, and the process still exits with success status.
    starwisp_lib::run()
}
