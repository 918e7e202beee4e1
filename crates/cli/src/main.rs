fn main() {
    if let Err(err) = miniscope_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
