use std::process::ExitCode;

fn main() -> ExitCode {
    rescata_cli::run()
}
