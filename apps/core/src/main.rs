fn main() {
    let options = match chrome_profiles_core::runtime::parse_cli_args(std::env::args_os().skip(1)) {
        Ok(options) => options,
        Err(error) => error.exit(),
    };

    if let Err(error) = chrome_profiles_core::runtime::run_with_options(options) {
        eprintln!("[chrome-profiles] runtime failed: {error}");
        std::process::exit(1);
    }
}
