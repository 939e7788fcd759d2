use chatmark::cli;

fn main() {
    let code = cli::process_cli();
    if code != 0 {
        // No render state exists past this point, so skipping destructors is harmless.
        std::process::exit(code);
    }
}
