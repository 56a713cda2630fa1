// Stencil CLI Entry Point

use stencil_cli::{logging::VerbosityLevel, output, router::CommandRouter};

fn main() {
    if let Err(e) = CommandRouter::route() {
        output::print_error(&e.report(VerbosityLevel::current()));
        std::process::exit(e.exit_code());
    }
}
